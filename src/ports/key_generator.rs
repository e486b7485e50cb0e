//! KeyGenerator trait - capability to create key pairs behind an alias

use crate::error::QuickSignResult;
use crate::model::{Alias, KeyPurposes};

/// Capability to generate a key pair inside a key facility
///
/// The private half never leaves the facility. Implementations must refuse
/// to replace an existing key: regenerating would silently invalidate every
/// certificate already handed out for the alias.
pub trait KeyGenerator {
    /// Generate a new key pair and store it behind `alias`
    ///
    /// # Arguments
    ///
    /// * `alias` - Stable name of the key pair
    /// * `purposes` - Operations the key is scoped to
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The alias already holds a key (`KeyManagementError::AliasOccupied`)
    /// - `purposes` does not include signing
    /// - The facility refuses or fails to generate the key
    fn generate_key_pair(&mut self, alias: &Alias, purposes: KeyPurposes) -> QuickSignResult<()>;
}
