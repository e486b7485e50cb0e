//! Pure functions: hashing, verification, payload codecs and classification

pub mod classify;
pub mod engine;
pub mod transport;

pub use classify::classify;
pub use engine::{digest, sign, verify, verify_der};
