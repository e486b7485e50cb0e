//! Digest/sign/verify engine
//!
//! `digest` and `verify` are pure. `sign` only forwards to the key custodian:
//! the engine never touches private key material.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use sha2::{Digest as _, Sha256};
use tracing::debug;

use crate::error::QuickSignResult;
use crate::model::{Certificate, Digest, KeyHandle, Signature, VerificationResult};
use crate::ports::KeyFacility;
use crate::use_cases::KeyCustodian;

/// SHA-256 of the document bytes
pub fn digest(bytes: &[u8]) -> Digest {
    Digest::new(Sha256::digest(bytes).into())
}

/// Sign `digest` with the key behind `handle`, through the custodian
pub fn sign<F: KeyFacility>(
    custodian: &mut KeyCustodian<F>,
    handle: &KeyHandle,
    digest: &Digest,
) -> QuickSignResult<Signature> {
    custodian.sign_with_handle(handle, digest)
}

/// Check `signature` over exactly `digest` against the certificate's key
///
/// Never fails: unparseable signatures are reported as
/// [`VerificationResult::Malformed`].
pub fn verify(digest: &Digest, signature: &Signature, certificate: &Certificate) -> VerificationResult {
    let parsed = match signature.to_ecdsa() {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Signature rejected as malformed: {}", e);
            return VerificationResult::Malformed;
        }
    };

    match certificate
        .verifying_key()
        .verify_prehash(digest.as_bytes(), &parsed)
    {
        Ok(()) => VerificationResult::Valid,
        Err(_) => VerificationResult::Invalid,
    }
}

/// Like [`verify`], for a certificate still in DER form
pub fn verify_der(digest: &Digest, signature: &Signature, certificate_der: &[u8]) -> VerificationResult {
    match Certificate::from_der(certificate_der) {
        Ok(certificate) => verify(digest, signature, &certificate),
        Err(e) => {
            debug!("Certificate rejected as malformed: {}", e);
            VerificationResult::Malformed
        }
    }
}
