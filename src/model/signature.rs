use std::fmt;

use p256::ecdsa;

use crate::error::MalformedError;

/// DER encoded ECDSA signature as carried in the signature QR payload
///
/// The bytes are kept as received; they are only parsed when a verifier
/// needs the ECDSA structure.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parse the DER `ECDSA-Sig-Value` into its P-256 components
    pub fn to_ecdsa(&self) -> Result<ecdsa::Signature, MalformedError> {
        ecdsa::Signature::from_der(&self.0).map_err(|e| MalformedError::Signature {
            reason: e.to_string(),
        })
    }
}

impl From<ecdsa::Signature> for Signature {
    fn from(signature: ecdsa::Signature) -> Self {
        Self(signature.to_der().as_bytes().to_vec())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({} bytes)", self.0.len())
    }
}
