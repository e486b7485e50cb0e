//! Self-describing public half of a key pair
//!
//! A [`Certificate`] is an X.509 certificate in DER form whose subject public
//! key is a P-256 EC key. The DER bytes are the canonical form: equality,
//! hashing and the transport encoding all operate on them, which makes the
//! encode/decode round trip lossless by construction.

use std::fmt;

use p256::ecdsa::VerifyingKey;
use p256::pkcs8::DecodePublicKey;
use sha2::{Digest as _, Sha256};
use x509_cert::der::{Decode, Encode};

use crate::error::MalformedError;
use crate::model::Algorithm;

#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
    subject: String,
    verifying_key: VerifyingKey,
}

impl Certificate {
    /// Parse a DER certificate
    ///
    /// # Errors
    ///
    /// Returns [`MalformedError::Certificate`] if the bytes are truncated,
    /// carry trailing data, are not an X.509 structure, or hold a subject
    /// public key that is not a P-256 EC key.
    pub fn from_der(bytes: &[u8]) -> Result<Self, MalformedError> {
        let parsed = x509_cert::Certificate::from_der(bytes).map_err(malformed)?;
        let spki = parsed
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(malformed)?;
        let verifying_key =
            VerifyingKey::from_public_key_der(&spki).map_err(|e| MalformedError::Certificate {
                reason: format!("unsupported subject public key: {e}"),
            })?;

        Ok(Self {
            der: bytes.to_vec(),
            subject: parsed.tbs_certificate.subject.to_string(),
            verifying_key,
        })
    }

    /// Re-encode a parsed X.509 certificate into its canonical DER form
    pub fn from_x509(certificate: &x509_cert::Certificate) -> Result<Self, MalformedError> {
        let der = certificate.to_der().map_err(malformed)?;
        Self::from_der(&der)
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.der.clone()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn algorithm(&self) -> Algorithm {
        Algorithm::EcdsaP256Sha256
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Hex SHA-256 of the DER bytes, for display only
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.der))
    }
}

fn malformed(err: x509_cert::der::Error) -> MalformedError {
    MalformedError::Certificate {
        reason: err.to_string(),
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate {{ subject: {}, fingerprint: {} }}",
            self.subject,
            &self.fingerprint()[..16]
        )
    }
}
