//! Sequential directory walker producing the file catalog.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree with [`walkdir`], visiting entries
//! sorted by file name so the catalog order is deterministic. Regular files
//! whose extension belongs to a [`Category`] become [`FileRecord`]s;
//! everything else is skipped. Errors on individual entries (permission
//! denied, broken links) are logged and the walk continues.
//!
//! # Example
//!
//! ```no_run
//! use simdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     skip_hidden: true,
//!     ..Default::default()
//! };
//! let records = Walker::new(Path::new("/home/user/Downloads"), config)
//!     .catalog()
//!     .unwrap();
//! println!("Found {} files", records.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{Category, FileRecord, ScanError};

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,
}

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('.'))
    }

    /// Walk the tree and collect every categorized regular file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root does not exist or is not a
    /// directory. Errors below the root are logged and skipped.
    pub fn catalog(&self) -> Result<Vec<FileRecord>, ScanError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScanError::NotFound(self.root.clone())
            } else {
                ScanError::Io {
                    path: self.root.clone(),
                    source: e,
                }
            }
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let skip_hidden = self.config.skip_hidden;
        let walk = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && Self::is_hidden(entry)));

        let mut records = Vec::new();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    log::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(category) = Category::from_path(entry.path()) else {
                log::trace!("Uncategorized: {}", entry.path().display());
                continue;
            };

            match entry.metadata() {
                Ok(metadata) => {
                    log::trace!("Cataloged {} ({})", entry.path().display(), category);
                    records.push(FileRecord::new(
                        entry.into_path(),
                        metadata.len(),
                        category,
                    ));
                }
                Err(e) => log::warn!("Skipping {}: {}", entry.path().display(), e),
            }
        }

        log::debug!("Cataloged {} files under {}", records.len(), self.root.display());
        Ok(records)
    }
}
