//! Adapters - concrete implementations of ports (traits)

mod directory_keystore;
mod document;
mod memory_keystore;
mod software_key;

#[cfg(test)]
pub mod unavailable_facility;

// Re-export for convenience
pub use directory_keystore::DirectoryKeyStore;
pub use document::{FileDocument, InMemoryDocument};
pub use memory_keystore::MemoryKeyStore;
