//! Directory-backed software key facility
//!
//! Each alias is stored as two files under the root directory:
//! `<alias>.key` holds the PKCS#8 DER private key (mode 0600 on Unix) and
//! `<alias>.crt` holds the DER certificate. Key files are created with
//! `create_new`, so an existing key is never replaced. A certificate left
//! without its key is treated as absent.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use p256::ecdsa::SigningKey;
use p256::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use tracing::{debug, error, info, warn};

use crate::adapters::software_key::SoftwareKey;
use crate::error::{CryptoError, KeyManagementError, QuickSignError, QuickSignResult};
use crate::model::{Alias, Algorithm, Certificate, Digest, KeyHandle, KeyPurposes, Signature};
use crate::ports::{DigestSigner, KeyGenerator, KeyLookup};

const KEY_EXTENSION: &str = "key";
const CERTIFICATE_EXTENSION: &str = "crt";

#[derive(Debug, Clone)]
pub struct DirectoryKeyStore {
    root: PathBuf,
}

impl DirectoryKeyStore {
    /// Open the keystore at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `KeyManagementError::StoreFailed` if the directory cannot be
    /// created.
    pub fn open(root: impl Into<PathBuf>) -> QuickSignResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            QuickSignError::KeyManagement(KeyManagementError::StoreFailed {
                destination: root.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        debug!("Opened key directory {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, alias: &Alias) -> PathBuf {
        self.root.join(format!("{alias}.{KEY_EXTENSION}"))
    }

    fn certificate_path(&self, alias: &Alias) -> PathBuf {
        self.root.join(format!("{alias}.{CERTIFICATE_EXTENSION}"))
    }

    fn load(&self, alias: &Alias) -> QuickSignResult<SoftwareKey> {
        let key_path = self.key_path(alias);
        let key_der = match fs::read(&key_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(QuickSignError::KeyManagement(
                    KeyManagementError::KeyNotFound {
                        alias: alias.to_string(),
                    },
                ));
            }
            Err(e) => return Err(load_failed(&key_path, e)),
        };
        let signing_key =
            SigningKey::from_pkcs8_der(&key_der).map_err(|e| load_failed(&key_path, e))?;

        let certificate_path = self.certificate_path(alias);
        let certificate_der =
            fs::read(&certificate_path).map_err(|e| load_failed(&certificate_path, e))?;
        let certificate = Certificate::from_der(&certificate_der)
            .map_err(|e| load_failed(&certificate_path, e))?;

        SoftwareKey::from_parts(signing_key, certificate, &key_path.display().to_string())
    }
}

impl KeyGenerator for DirectoryKeyStore {
    fn generate_key_pair(&mut self, alias: &Alias, purposes: KeyPurposes) -> QuickSignResult<()> {
        if !purposes.sign {
            return Err(QuickSignError::Crypto(CryptoError::KeyGenerationFailed {
                reason: "key purposes must include signing".to_string(),
            }));
        }

        let key_path = self.key_path(alias);
        if key_path.exists() {
            return Err(QuickSignError::KeyManagement(
                KeyManagementError::AliasOccupied {
                    alias: alias.to_string(),
                },
            ));
        }

        let certificate_path = self.certificate_path(alias);
        if certificate_path.is_file() {
            warn!(
                "Certificate {} has no private key, discarding it",
                certificate_path.display()
            );
            fs::remove_file(&certificate_path).map_err(|e| store_failed(&certificate_path, e))?;
        }

        let key = SoftwareKey::generate(alias)?;
        let key_der = key.signing_key().to_pkcs8_der().map_err(|e| {
            QuickSignError::Crypto(CryptoError::KeyGenerationFailed {
                reason: format!("PKCS#8 encoding failed: {e}"),
            })
        })?;

        write_new_file(&key_path, key_der.as_bytes(), true).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                QuickSignError::KeyManagement(KeyManagementError::AliasOccupied {
                    alias: alias.to_string(),
                })
            } else {
                store_failed(&key_path, e)
            }
        })?;

        if let Err(e) = write_new_file(&certificate_path, key.certificate().as_der(), false) {
            warn!(
                "Key for {} written without certificate, removing {}",
                alias,
                key_path.display()
            );
            discard(&key_path);
            return Err(store_failed(&certificate_path, e));
        }

        info!(
            "Generated key for {} in {} ({})",
            alias,
            self.root.display(),
            key.certificate().fingerprint()
        );
        Ok(())
    }
}

impl KeyLookup for DirectoryKeyStore {
    fn private_key_handle(&self, alias: &Alias) -> QuickSignResult<KeyHandle> {
        self.load(alias)?;
        Ok(KeyHandle::new(alias.clone(), Algorithm::EcdsaP256Sha256))
    }

    fn certificate(&self, alias: &Alias) -> QuickSignResult<Certificate> {
        Ok(self.load(alias)?.certificate().clone())
    }
}

impl DigestSigner for DirectoryKeyStore {
    fn sign_digest(&mut self, handle: &KeyHandle, digest: &Digest) -> QuickSignResult<Signature> {
        debug!("Signing digest {:?} with {:?}", digest, handle);
        self.load(handle.alias())?.sign_digest(digest)
    }
}

fn write_new_file(path: &Path, contents: &[u8], private: bool) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if private {
            options.mode(0o600);
        }
    }
    #[cfg(not(unix))]
    let _ = private;

    let mut file = options.open(path)?;
    let written = file.write_all(contents).and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        discard(path);
    }
    written
}

/// Remove a file this store created, logging rather than masking failures
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        error!("Failed to remove {}: {}", path.display(), e);
    }
}

fn load_failed(path: &Path, err: impl std::fmt::Display) -> QuickSignError {
    QuickSignError::KeyManagement(KeyManagementError::LoadFailed {
        location: path.display().to_string(),
        reason: err.to_string(),
    })
}

fn store_failed(path: &Path, err: impl std::fmt::Display) -> QuickSignError {
    QuickSignError::KeyManagement(KeyManagementError::StoreFailed {
        destination: path.display().to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::keystore_contract;

    fn temp_store() -> DirectoryKeyStore {
        // The directory outlives the store; tests only need it to be unique
        let dir = tempfile::tempdir().unwrap().keep();
        DirectoryKeyStore::open(dir).unwrap()
    }

    contract_tests_for!(
        directory_keystore_contract,
        make = temp_store,
        tests = {
            generate_then_lookup => keystore_contract::test_generate_then_lookup,
            lookup_missing_alias => keystore_contract::test_lookup_missing_alias,
            refuses_overwrite => keystore_contract::test_generate_refuses_overwrite,
            requires_sign_purpose => keystore_contract::test_generate_requires_sign_purpose,
            sign_verifies => keystore_contract::test_sign_verifies_against_certificate,
            sign_missing_alias => keystore_contract::test_sign_with_stale_handle,
            aliases_are_independent => keystore_contract::test_aliases_are_independent,
        }
    );

    #[test]
    fn test_key_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::new("persistent").unwrap();

        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        store
            .generate_key_pair(&alias, KeyPurposes::default())
            .unwrap();
        let before = store.certificate(&alias).unwrap();
        drop(store);

        let reopened = DirectoryKeyStore::open(dir.path()).unwrap();
        assert_eq!(reopened.certificate(&alias).unwrap(), before);
    }

    #[test]
    fn test_files_are_laid_out_per_alias() {
        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::new("laid.out").unwrap();
        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        store
            .generate_key_pair(&alias, KeyPurposes::default())
            .unwrap();

        assert!(dir.path().join("laid.out.key").is_file());
        assert!(dir.path().join("laid.out.crt").is_file());

        let der = fs::read(dir.path().join("laid.out.crt")).unwrap();
        assert_eq!(der, store.certificate(&alias).unwrap().to_der());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::default();
        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        store
            .generate_key_pair(&alias, KeyPurposes::default())
            .unwrap();

        let mode = fs::metadata(dir.path().join(format!("{alias}.key")))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_missing_certificate_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::default();
        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        store
            .generate_key_pair(&alias, KeyPurposes::default())
            .unwrap();
        fs::remove_file(dir.path().join(format!("{alias}.crt"))).unwrap();

        let result = store.certificate(&alias);
        assert!(matches!(
            result.unwrap_err(),
            QuickSignError::KeyManagement(KeyManagementError::LoadFailed { .. })
        ));
    }

    #[test]
    fn test_orphan_certificate_does_not_block_generation() {
        use crate::use_cases::KeyCustodian;

        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::default();
        let certificate_path = dir.path().join(format!("{alias}.crt"));
        fs::write(&certificate_path, [0x30, 0x82]).unwrap();

        let mut custodian = KeyCustodian::new(DirectoryKeyStore::open(dir.path()).unwrap());
        custodian.get_or_create_key(&alias).unwrap();
        custodian.get_or_create_key(&alias).unwrap();

        let certificate = custodian.certificate(&alias).unwrap();
        assert_eq!(fs::read(&certificate_path).unwrap(), certificate.to_der());
        assert!(dir.path().join(format!("{alias}.key")).is_file());
    }

    #[test]
    fn test_failed_certificate_write_leaves_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::default();
        // A directory in the certificate's place makes the write fail
        fs::create_dir(dir.path().join(format!("{alias}.crt"))).unwrap();

        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        let result = store.generate_key_pair(&alias, KeyPurposes::default());

        assert!(matches!(
            result,
            Err(QuickSignError::KeyManagement(
                KeyManagementError::StoreFailed { .. }
            ))
        ));
        assert!(!dir.path().join(format!("{alias}.key")).exists());
        assert!(store.private_key_handle(&alias).unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_corrupt_key_is_load_failure_not_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let alias = Alias::default();
        fs::write(dir.path().join(format!("{alias}.key")), b"garbage").unwrap();

        let mut store = DirectoryKeyStore::open(dir.path()).unwrap();
        let err = store.private_key_handle(&alias).unwrap_err();
        assert!(!err.is_key_not_found());
        assert!(matches!(
            store.generate_key_pair(&alias, KeyPurposes::default()),
            Err(QuickSignError::KeyManagement(
                KeyManagementError::AliasOccupied { .. }
            ))
        ));
    }
}
