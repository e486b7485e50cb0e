//! Ports (capability traits) for key custody and the outside world
//!
//! These traits define the capabilities the signing core requires.
//! They represent ports in hexagonal architecture - the core depends on
//! these abstractions, not concrete implementations.
//!
//! The key traits are storage agnostic - they define what a secure key
//! facility must offer, not how it protects the private key.

mod digest_signer;
mod document_source;
mod key_generator;
mod key_lookup;
mod qr_codec;

pub use digest_signer::DigestSigner;
pub use document_source::DocumentSource;
pub use key_generator::KeyGenerator;
pub use key_lookup::KeyLookup;
pub use qr_codec::{FrameDecoder, QrRenderer};

/// Combined trait for a secure key facility
///
/// This trait combines all key capabilities into a single interface.
/// A keystore adapter typically implements this.
pub trait KeyFacility: KeyGenerator + KeyLookup + DigestSigner {}

// Blanket implementation for types that implement all key traits
impl<T> KeyFacility for T where T: KeyGenerator + KeyLookup + DigestSigner {}
