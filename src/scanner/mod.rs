//! Scanner module for cataloging files and computing per-file signatures.
//!
//! This module provides functionality for:
//! - Sequential directory walking with extension-based categorization
//! - Full-content fingerprinting with BLAKE3
//! - Perceptual (difference) hashing of images
//! - Word-set extraction from plain-text documents
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and [`FileRecord`] creation
//! - [`hasher`]: Streaming content fingerprints
//! - [`perceptual`]: 64-bit difference hashes over a luma grid
//! - [`document`]: Text extraction and Jaccard similarity
//!
//! # Example
//!
//! ```no_run
//! use simdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for record in walker.catalog().unwrap() {
//!     println!("{} ({:?}): {} bytes", record.path.display(), record.category(), record.size);
//! }
//! ```

pub mod document;
pub mod hasher;
pub mod perceptual;
pub mod walker;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

pub use hasher::{Fingerprint, Hasher};
pub use perceptual::{PerceptualHash, PerceptualHasher};
pub use walker::{Walker, WalkerConfig};

/// Closed set of content categories a cataloged file can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raster images, compared by perceptual hash.
    Image,
    /// Audio tracks, compared by file name.
    Audio,
    /// Office documents and plain text.
    Document,
    /// Archives and executables, compared by size and name.
    Archive,
}

impl Category {
    /// File extensions (lowercase, without the dot) belonging to this category.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => &["jpg", "jpeg", "png", "bmp", "webp", "tiff", "tif", "gif"],
            Self::Audio => &["mp3", "flac", "wav", "aac", "ogg", "m4a"],
            Self::Document => &["txt", "pdf", "docx", "xlsx", "xls", "csv", "pptx"],
            Self::Archive => &["zip", "rar", "7z", "exe"],
        }
    }

    /// Categorize a file by its extension, case-insensitively.
    ///
    /// Returns `None` for files outside every category; those are never cataloged.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = lowercase_extension(path)?;
        [Self::Image, Self::Audio, Self::Document, Self::Archive]
            .into_iter()
            .find(|category| category.extensions().contains(&extension.as_str()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Audio => write!(f, "audio"),
            Self::Document => write!(f, "document"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// Lowercase extension of a path, if it has one.
#[must_use]
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}

/// Lowercase file stem of a path, or an empty string.
#[must_use]
pub fn lowercase_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// A cataloged file.
///
/// The category is fixed when the record is created. The fingerprint and
/// perceptual hash are filled in by later pipeline stages.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path to the file as discovered by the walker
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Content fingerprint, set by the exact pass (absent if unreadable)
    pub fingerprint: Option<Fingerprint>,
    category: Category,
    perceptual_hash: OnceCell<PerceptualHash>,
}

impl FileRecord {
    /// Create a new record.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `category` - Content category
    #[must_use]
    pub fn new(path: PathBuf, size: u64, category: Category) -> Self {
        Self {
            path,
            size,
            fingerprint: None,
            category,
            perceptual_hash: OnceCell::new(),
        }
    }

    /// The category assigned at catalog time.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// The perceptual hash of this record, computing it on first use.
    pub fn perceptual_hash(&self, hasher: &PerceptualHasher) -> PerceptualHash {
        *self
            .perceptual_hash
            .get_or_init(|| hasher.hash_path(&self.path))
    }

    /// Lowercase extension of the record's path.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        lowercase_extension(&self.path)
    }

    /// Lowercase file stem of the record's path.
    #[must_use]
    pub fn stem(&self) -> String {
        lowercase_stem(&self.path)
    }
}

/// Errors that can occur while cataloging a directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing an entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
