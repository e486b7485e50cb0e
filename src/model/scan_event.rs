/// Structural classification of a decoded QR payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    Certificate,
    Signature,
    Unrecognized,
}

/// A decoded payload string plus its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    payload: String,
    kind: ScanKind,
}

impl ScanEvent {
    pub fn new(payload: impl Into<String>, kind: ScanKind) -> Self {
        Self {
            payload: payload.into(),
            kind,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn kind(&self) -> ScanKind {
        self.kind
    }
}
