//! Process-local software key facility

use std::collections::HashMap;

use tracing::{debug, info};

use crate::adapters::software_key::SoftwareKey;
use crate::error::{CryptoError, KeyManagementError, QuickSignError, QuickSignResult};
use crate::model::{Alias, Algorithm, Certificate, Digest, KeyHandle, KeyPurposes, Signature};
use crate::ports::{DigestSigner, KeyGenerator, KeyLookup};

/// Key facility that keeps every key pair in memory
///
/// Private keys never leave the store; callers only ever see handles and
/// certificates. Everything is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<Alias, SoftwareKey>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, alias: &Alias) -> bool {
        self.keys.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn key(&self, alias: &Alias) -> QuickSignResult<&SoftwareKey> {
        self.keys.get(alias).ok_or_else(|| {
            QuickSignError::KeyManagement(KeyManagementError::KeyNotFound {
                alias: alias.to_string(),
            })
        })
    }
}

impl KeyGenerator for MemoryKeyStore {
    fn generate_key_pair(&mut self, alias: &Alias, purposes: KeyPurposes) -> QuickSignResult<()> {
        if !purposes.sign {
            return Err(QuickSignError::Crypto(CryptoError::KeyGenerationFailed {
                reason: "key purposes must include signing".to_string(),
            }));
        }
        if self.contains(alias) {
            return Err(QuickSignError::KeyManagement(
                KeyManagementError::AliasOccupied {
                    alias: alias.to_string(),
                },
            ));
        }

        let key = SoftwareKey::generate(alias)?;
        info!(
            "Generated in-memory key for {} ({})",
            alias,
            key.certificate().fingerprint()
        );
        self.keys.insert(alias.clone(), key);
        Ok(())
    }
}

impl KeyLookup for MemoryKeyStore {
    fn private_key_handle(&self, alias: &Alias) -> QuickSignResult<KeyHandle> {
        self.key(alias)?;
        Ok(KeyHandle::new(alias.clone(), Algorithm::EcdsaP256Sha256))
    }

    fn certificate(&self, alias: &Alias) -> QuickSignResult<Certificate> {
        Ok(self.key(alias)?.certificate().clone())
    }
}

impl DigestSigner for MemoryKeyStore {
    fn sign_digest(&mut self, handle: &KeyHandle, digest: &Digest) -> QuickSignResult<Signature> {
        debug!("Signing digest {:?} with {:?}", digest, handle);
        self.key(handle.alias())?.sign_digest(digest)
    }
}
