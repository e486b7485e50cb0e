//! Local document sources

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DocumentError, QuickSignError, QuickSignResult};
use crate::ports::DocumentSource;

/// Document read from the local filesystem on every call
///
/// The file is read lazily, so a verifier always digests the bytes present
/// at verification time.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn read_bytes(&self) -> QuickSignResult<Vec<u8>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            QuickSignError::Document(DocumentError::ReadFailed {
                location: self.describe(),
                reason: e.to_string(),
            })
        })?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryDocument {
    bytes: Vec<u8>,
}

impl InMemoryDocument {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl DocumentSource for InMemoryDocument {
    fn read_bytes(&self) -> QuickSignResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
