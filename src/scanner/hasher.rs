//! BLAKE3 content fingerprinting with streaming reads.
//!
//! # Overview
//! The [`Hasher`] reads a file front to back in fixed-size blocks, so memory
//! use is bounded regardless of file size. Two files with equal
//! [`Fingerprint`]s are treated as byte-identical.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Default read block size (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Digest over the full byte content of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<blake3::Hash> for Fingerprint {
    fn from(hash: blake3::Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    block_size: usize,
}

impl Hasher {
    /// Create a hasher with the default block size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Set the read block size (minimum 1 byte).
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Hash the full content of a file.
    ///
    /// The file handle is closed before this returns, on success and on error.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.block_size];

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::from_io(path, e)),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().into())
    }

    /// Fingerprint a file, or `None` if it cannot be read.
    ///
    /// Failures are logged at debug level and otherwise swallowed; callers
    /// exclude such files from exact-duplicate grouping.
    #[must_use]
    pub fn fingerprint(&self, path: &Path) -> Option<Fingerprint> {
        match self.full_hash(path) {
            Ok(fingerprint) => Some(fingerprint),
            Err(e) => {
                log::debug!("Skipping fingerprint: {}", e);
                None
            }
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}
