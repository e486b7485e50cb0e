use std::fmt;

/// Outcome of checking a signature against a certificate and a digest
///
/// `Invalid` is a legitimate answer, not an error: the document does not
/// match the signature/certificate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationResult {
    Valid,
    Invalid,
    Malformed,
}

impl VerificationResult {
    pub fn is_valid(self) -> bool {
        matches!(self, VerificationResult::Valid)
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerificationResult::Valid => "valid",
            VerificationResult::Invalid => "invalid",
            VerificationResult::Malformed => "malformed",
        };
        f.write_str(label)
    }
}
