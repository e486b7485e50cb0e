use std::path::{Path, PathBuf};

use crate::adapters::{DirectoryKeyStore, FileDocument};
use crate::error::QuickSignResult;
use crate::logic::{engine, transport};
use crate::pairing::PairingSession;
use crate::use_cases::{issue_proof, CustodianConfig, KeyCustodian};

pub use crate::model::*;
pub use crate::use_cases::ProofPayloads;

/// Default location of the directory keystore
pub const DEFAULT_KEY_DIR: &str = ".quicksign";

pub fn open_custodian(
    key_dir: impl Into<PathBuf>,
    alias: Alias,
) -> QuickSignResult<KeyCustodian<DirectoryKeyStore>> {
    let store = DirectoryKeyStore::open(key_dir)?;
    let config = CustodianConfig {
        alias,
        ..CustodianConfig::default()
    };
    Ok(KeyCustodian::with_config(store, config))
}

/// Certificate QR payload for `alias`, creating the key on first use
pub fn certificate_payload(key_dir: impl Into<PathBuf>, alias: Alias) -> QuickSignResult<String> {
    let mut custodian = open_custodian(key_dir, alias.clone())?;
    let certificate = custodian.certificate(&alias)?;
    Ok(transport::encode_certificate(&certificate))
}

pub fn certificate_fingerprint(key_dir: impl Into<PathBuf>, alias: Alias) -> QuickSignResult<String> {
    let mut custodian = open_custodian(key_dir, alias.clone())?;
    Ok(custodian.certificate(&alias)?.fingerprint())
}

/// Sign the file at `document` and return both QR payloads
pub fn sign_document(
    key_dir: impl Into<PathBuf>,
    alias: Alias,
    document: impl AsRef<Path>,
) -> QuickSignResult<ProofPayloads> {
    let mut custodian = open_custodian(key_dir, alias.clone())?;
    issue_proof(
        &mut custodian,
        &alias,
        &FileDocument::new(document.as_ref()),
    )
}

/// Check a certificate/signature payload pair against local document bytes
///
/// Unparseable payloads are reported as [`VerificationResult::Malformed`].
pub fn verify_payloads(certificate: &str, signature: &str, document: &[u8]) -> VerificationResult {
    let Ok(certificate) = transport::decode_certificate(certificate) else {
        return VerificationResult::Malformed;
    };
    let Ok(signature) = transport::decode_signature(signature) else {
        return VerificationResult::Malformed;
    };
    engine::verify(&engine::digest(document), &signature, &certificate)
}

/// Pairing session checking signatures against the file at `reference`
pub fn new_pairing_session(reference: impl Into<PathBuf>) -> PairingSession<FileDocument> {
    PairingSession::new(FileDocument::new(reference))
}
