use crate::model::Certificate;

/// Single-entry holder for the certificate of the current counterpart
///
/// The verifier pairs with one counterpart at a time, so the slot has a
/// single role and the counterpart is identified by the subject of the
/// certificate it holds. At most one certificate is held at any time. Verification consumes it
/// through [`TrustSlot::take`], so a certificate can back one signature only.
#[derive(Debug, Default)]
pub struct TrustSlot {
    certificate: Option<Certificate>,
}

impl TrustSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `certificate` in the slot, returning the one it displaced
    pub fn store(&mut self, certificate: Certificate) -> Option<Certificate> {
        self.certificate.replace(certificate)
    }

    /// Remove and return the trusted certificate
    pub fn take(&mut self) -> Option<Certificate> {
        self.certificate.take()
    }

    pub fn peek(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }

    /// Subject of the trusted certificate
    pub fn counterpart(&self) -> Option<&str> {
        self.certificate.as_ref().map(Certificate::subject)
    }

    pub fn is_empty(&self) -> bool {
        self.certificate.is_none()
    }

    pub fn clear(&mut self) {
        self.certificate = None;
    }
}
