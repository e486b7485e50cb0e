//! Key facility that refuses every request
//!
//! Stands in for a locked or broken platform keystore in tests.

use crate::error::{CryptoError, KeyManagementError, QuickSignError, QuickSignResult};
use crate::model::{Alias, Certificate, Digest, KeyHandle, KeyPurposes, Signature};
use crate::ports::{DigestSigner, KeyGenerator, KeyLookup};

pub const REFUSAL: &str = "keystore refused the operation";

#[derive(Debug, Default)]
pub struct UnavailableFacility {
    generate_attempts: usize,
}

impl UnavailableFacility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_attempts(&self) -> usize {
        self.generate_attempts
    }
}

fn not_found(alias: &Alias) -> QuickSignError {
    QuickSignError::KeyManagement(KeyManagementError::KeyNotFound {
        alias: alias.to_string(),
    })
}

impl KeyGenerator for UnavailableFacility {
    fn generate_key_pair(&mut self, _alias: &Alias, _purposes: KeyPurposes) -> QuickSignResult<()> {
        self.generate_attempts += 1;
        Err(QuickSignError::Crypto(CryptoError::KeyGenerationFailed {
            reason: REFUSAL.to_string(),
        }))
    }
}

impl KeyLookup for UnavailableFacility {
    fn private_key_handle(&self, alias: &Alias) -> QuickSignResult<KeyHandle> {
        Err(not_found(alias))
    }

    fn certificate(&self, alias: &Alias) -> QuickSignResult<Certificate> {
        Err(not_found(alias))
    }
}

impl DigestSigner for UnavailableFacility {
    fn sign_digest(&mut self, _handle: &KeyHandle, _digest: &Digest) -> QuickSignResult<Signature> {
        Err(QuickSignError::Crypto(CryptoError::SignatureFailed {
            reason: REFUSAL.to_string(),
        }))
    }
}
