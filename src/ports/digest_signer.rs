//! DigestSigner trait - capability to sign a precomputed digest

use crate::error::QuickSignResult;
use crate::model::{Digest, KeyHandle, Signature};

/// Capability to sign a digest with a key held by the facility
///
/// The digest is signed as given; implementations never hash it again and
/// never see the document it was computed from.
pub trait DigestSigner {
    /// Sign `digest` with the private key referenced by `handle`
    ///
    /// # Returns
    ///
    /// The DER encoded ECDSA signature
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The handle no longer resolves to a key
    /// - The facility fails to produce a signature
    fn sign_digest(&mut self, handle: &KeyHandle, digest: &Digest) -> QuickSignResult<Signature>;
}
