//! Key custodian use case
//!
//! Owns the long-term signing key behind an alias. The key is created on
//! first use and never regenerated once it exists; every facility failure is
//! surfaced to the caller as [`QuickSignError::KeyUnavailable`].

use tracing::{debug, info};

use crate::error::{QuickSignError, QuickSignResult};
use crate::model::{Alias, Certificate, Digest, KeyHandle, KeyPurposes, Signature};
use crate::ports::KeyFacility;

/// Configuration for the key custodian
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodianConfig {
    /// Alias used when the caller does not name one
    pub alias: Alias,
    /// Purposes requested when a key has to be generated
    pub purposes: KeyPurposes,
}

impl Default for CustodianConfig {
    fn default() -> Self {
        Self {
            alias: Alias::default_signer(),
            purposes: KeyPurposes::SIGN_VERIFY,
        }
    }
}

/// Lazily creating front for a secure key facility
///
/// The custodian never sees private key material; it only passes handles
/// and digests to the facility.
#[derive(Debug)]
pub struct KeyCustodian<F: KeyFacility> {
    facility: F,
    config: CustodianConfig,
}

impl<F: KeyFacility> KeyCustodian<F> {
    pub fn new(facility: F) -> Self {
        Self::with_config(facility, CustodianConfig::default())
    }

    pub fn with_config(facility: F, config: CustodianConfig) -> Self {
        Self { facility, config }
    }

    pub fn config(&self) -> &CustodianConfig {
        &self.config
    }

    /// The alias from the configuration
    pub fn default_alias(&self) -> &Alias {
        &self.config.alias
    }

    pub fn facility(&self) -> &F {
        &self.facility
    }

    /// Return the key behind `alias`, generating it if absent
    ///
    /// Idempotent once the key exists. Generation only happens when the
    /// facility reports that no key exists; any other lookup failure is
    /// surfaced without touching the facility again.
    ///
    /// # Errors
    ///
    /// Returns `QuickSignError::KeyUnavailable` carrying the facility's own
    /// error text if the key can neither be found nor generated.
    pub fn get_or_create_key(&mut self, alias: &Alias) -> QuickSignResult<KeyHandle> {
        match self.facility.private_key_handle(alias) {
            Ok(handle) => {
                debug!("Found existing key for {}", alias);
                return Ok(handle);
            }
            Err(e) if e.is_key_not_found() => {}
            Err(e) => return Err(QuickSignError::key_unavailable(alias.as_str(), e)),
        }

        info!("No key for {}, generating one", alias);
        self.facility
            .generate_key_pair(alias, self.config.purposes)
            .map_err(|e| QuickSignError::key_unavailable(alias.as_str(), e))?;

        self.facility
            .private_key_handle(alias)
            .map_err(|e| QuickSignError::key_unavailable(alias.as_str(), e))
    }

    /// Public certificate of the (possibly just created) key behind `alias`
    ///
    /// # Errors
    ///
    /// Same conditions as [`KeyCustodian::get_or_create_key`].
    pub fn certificate(&mut self, alias: &Alias) -> QuickSignResult<Certificate> {
        let handle = self.get_or_create_key(alias)?;
        self.facility
            .certificate(handle.alias())
            .map_err(|e| QuickSignError::key_unavailable(alias.as_str(), e))
    }

    /// Sign exactly `digest` with the key behind `alias`
    ///
    /// The digest is never hashed again. Document bytes are not accepted
    /// here; compute the digest with [`crate::logic::engine::digest`].
    pub fn sign(&mut self, alias: &Alias, digest: &Digest) -> QuickSignResult<Signature> {
        let handle = self.get_or_create_key(alias)?;
        self.sign_with_handle(&handle, digest)
    }

    /// Sign `digest` with an already resolved handle
    pub fn sign_with_handle(
        &mut self,
        handle: &KeyHandle,
        digest: &Digest,
    ) -> QuickSignResult<Signature> {
        debug!("Signing {:?} with {}", digest, handle.alias());
        self.facility
            .sign_digest(handle, digest)
            .map_err(|e| QuickSignError::key_unavailable(handle.alias().as_str(), e))
    }
}
