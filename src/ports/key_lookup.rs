//! KeyLookup trait - capability to resolve an alias to its key material

use crate::error::QuickSignResult;
use crate::model::{Alias, Certificate, KeyHandle};

/// Capability to look up keys that already exist in a key facility
pub trait KeyLookup {
    /// Resolve `alias` to an opaque handle on its private key
    ///
    /// # Errors
    ///
    /// Returns `KeyManagementError::KeyNotFound` if no key exists behind
    /// the alias, or a facility specific error if it cannot be loaded.
    fn private_key_handle(&self, alias: &Alias) -> QuickSignResult<KeyHandle>;

    /// Return the public certificate of the key behind `alias`
    ///
    /// # Errors
    ///
    /// Same conditions as [`KeyLookup::private_key_handle`].
    fn certificate(&self, alias: &Alias) -> QuickSignResult<Certificate>;
}
