//! Domain types
//!
//! Validated wrappers around the primitives that cross the signing and
//! verification boundary. Private key material has no type here: it only
//! exists inside key facility adapters.

mod alias;
mod algorithm;
mod certificate;
mod digest;
mod key_handle;
mod scan_event;
mod signature;
mod verification;

pub use alias::{Alias, AliasError};
pub use algorithm::Algorithm;
pub use certificate::Certificate;
pub use digest::Digest;
pub use key_handle::{KeyHandle, KeyPurposes};
pub use scan_event::{ScanEvent, ScanKind};
pub use signature::Signature;
pub use verification::VerificationResult;
