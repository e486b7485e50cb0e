//! Software P-256 key shared by the keystore adapters
//!
//! Generates the key pair and its self-signed certificate, and performs
//! prehash signing. Private key material stays inside this type.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{self, DerSignature, SigningKey};
use rand::rng;
use rand::RngCore;
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Validity;

use crate::error::{CryptoError, KeyManagementError, QuickSignError, QuickSignResult};
use crate::model::{Alias, Certificate, Digest, Signature};

/// Validity of generated certificates: 25 years
const CERTIFICATE_VALIDITY: Duration = Duration::from_secs(25 * 365 * 24 * 60 * 60);

pub(crate) struct SoftwareKey {
    signing_key: SigningKey,
    certificate: Certificate,
}

impl SoftwareKey {
    /// Generate a fresh key pair and a certificate with subject `CN=<alias>`
    pub(crate) fn generate(alias: &Alias) -> QuickSignResult<Self> {
        let signing_key = random_signing_key();
        let certificate = self_signed_certificate(alias, &signing_key)?;
        Ok(Self {
            signing_key,
            certificate,
        })
    }

    /// Reassemble a key loaded from storage
    ///
    /// # Errors
    ///
    /// Returns `KeyManagementError::LoadFailed` if the certificate does not
    /// carry the public half of `signing_key`.
    pub(crate) fn from_parts(
        signing_key: SigningKey,
        certificate: Certificate,
        location: &str,
    ) -> QuickSignResult<Self> {
        if signing_key.verifying_key() != certificate.verifying_key() {
            return Err(QuickSignError::KeyManagement(KeyManagementError::LoadFailed {
                location: location.to_string(),
                reason: "certificate does not match private key".to_string(),
            }));
        }
        Ok(Self {
            signing_key,
            certificate,
        })
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub(crate) fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    pub(crate) fn sign_digest(&self, digest: &Digest) -> QuickSignResult<Signature> {
        let signature: ecdsa::Signature = self
            .signing_key
            .sign_prehash(digest.as_bytes())
            .map_err(|e| {
                QuickSignError::Crypto(CryptoError::SignatureFailed {
                    reason: format!("P-256 sign_prehash failed: {e}"),
                })
            })?;
        Ok(Signature::from(signature))
    }
}

impl fmt::Debug for SoftwareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SoftwareKey {{ private: [REDACTED], certificate: {:?} }}",
            self.certificate
        )
    }
}

fn random_signing_key() -> SigningKey {
    // A random 32-byte string is a valid scalar except with negligible
    // probability (zero or >= group order); draw again in that case.
    loop {
        let mut secret_bytes = [0u8; 32];
        rng().fill_bytes(&mut secret_bytes);
        if let Ok(signing_key) = SigningKey::from_slice(&secret_bytes) {
            return signing_key;
        }
    }
}

fn self_signed_certificate(alias: &Alias, signing_key: &SigningKey) -> QuickSignResult<Certificate> {
    let subject = Name::from_str(&format!("CN={alias}")).map_err(build_failed)?;
    let validity = Validity::from_now(CERTIFICATE_VALIDITY).map_err(build_failed)?;
    let public_key =
        SubjectPublicKeyInfoOwned::from_key(*signing_key.verifying_key()).map_err(build_failed)?;
    let serial_number = SerialNumber::new(&[0x01]).map_err(build_failed)?;

    let builder = CertificateBuilder::new(
        Profile::Root,
        serial_number,
        validity,
        subject,
        public_key,
        signing_key,
    )
    .map_err(build_failed)?;
    let x509 = builder.build::<DerSignature>().map_err(build_failed)?;

    Certificate::from_x509(&x509).map_err(build_failed)
}

fn build_failed(err: impl fmt::Display) -> QuickSignError {
    QuickSignError::Crypto(CryptoError::CertificateBuildFailed {
        reason: err.to_string(),
    })
}
