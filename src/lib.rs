//! Offline document signing and verification over QR payloads
//!
//! A signer shows two QR codes: its certificate, then a signature over the
//! SHA-256 digest of a document. A verifier scans both with a
//! [`pairing::PairingSession`] and checks the signature against its own
//! copy of the document.

pub mod adapters;
pub mod api;
pub mod error;
pub mod logic;
pub mod model;
pub mod pairing;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use error::{QuickSignError, QuickSignResult};

// Re-export public API
pub use api::{
    certificate_fingerprint, certificate_payload, new_pairing_session, open_custodian,
    sign_document, verify_payloads,
};
