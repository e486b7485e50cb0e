//! Error types for quicksign
//!
//! This module defines the error hierarchy for all quicksign operations.
//! Errors are organized hierarchically and use thiserror for implementation.

use thiserror::Error;

/// Result type alias for quicksign operations
///
/// This is a convenience alias for `Result<T, QuickSignError>`.
pub type QuickSignResult<T> = Result<T, QuickSignError>;

/// Top-level error type for all quicksign operations
#[derive(Error, Debug)]
pub enum QuickSignError {
    /// The key facility could not produce or return a usable key
    #[error("Key unavailable for alias '{alias}': {reason}")]
    KeyUnavailable { alias: String, reason: String },

    /// A payload or artifact does not parse as the expected structure
    #[error("Malformed input: {0}")]
    Malformed(#[from] MalformedError),

    /// Domain validation errors
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Key facility bookkeeping errors
    #[error("Key management error: {0}")]
    KeyManagement(#[from] KeyManagementError),

    /// Cryptographic operation errors
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// Local document source errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl QuickSignError {
    /// Wrap a facility failure for `alias`, keeping the original text verbatim.
    pub fn key_unavailable(alias: impl Into<String>, cause: QuickSignError) -> Self {
        match cause {
            already @ QuickSignError::KeyUnavailable { .. } => already,
            other => QuickSignError::KeyUnavailable {
                alias: alias.into(),
                reason: other.to_string(),
            },
        }
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(
            self,
            QuickSignError::KeyManagement(KeyManagementError::KeyNotFound { .. })
        )
    }
}

/// Structural decoding failures for QR payloads and their binary artifacts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedError {
    /// Text is not canonical padded base64
    #[error("payload is not valid base64: {reason}")]
    Encoding { reason: String },

    /// Bytes are not a DER X.509 certificate carrying a P-256 key
    #[error("certificate is malformed: {reason}")]
    Certificate { reason: String },

    /// Bytes are not a DER ECDSA signature
    #[error("signature is malformed: {reason}")]
    Signature { reason: String },
}

/// Domain validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Alias validation error
    #[error("Alias error: {0}")]
    Alias(#[from] crate::model::AliasError),
}

/// Key facility bookkeeping errors
#[derive(Error, Debug)]
pub enum KeyManagementError {
    /// A key already exists behind the alias
    #[error("Alias already holds a key: {alias}")]
    AliasOccupied { alias: String },

    /// No key exists behind the alias
    #[error("No key found for alias: {alias}")]
    KeyNotFound { alias: String },

    /// Failed to load key material
    #[error("Failed to load key from {location}: {reason}")]
    LoadFailed { location: String, reason: String },

    /// Failed to persist key material
    #[error("Failed to store key to {destination}: {reason}")]
    StoreFailed { destination: String, reason: String },
}

/// Cryptographic operation errors
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key generation failed or was refused
    #[error("Failed to generate key: {reason}")]
    KeyGenerationFailed { reason: String },

    /// Signature generation failed
    #[error("Failed to generate signature: {reason}")]
    SignatureFailed { reason: String },

    /// Self-signed certificate could not be produced
    #[error("Failed to build certificate: {reason}")]
    CertificateBuildFailed { reason: String },
}

/// Local document source errors
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document {location}: {reason}")]
    ReadFailed { location: String, reason: String },
}

/// Convert model errors to QuickSignError (via DomainError)
impl From<crate::model::AliasError> for QuickSignError {
    fn from(err: crate::model::AliasError) -> Self {
        QuickSignError::Domain(DomainError::Alias(err))
    }
}
