//! Document comparer collaborators.
//!
//! Spreadsheets, word-processor files and presentations are compared by
//! optional helpers. A helper answers "similar" or "not similar"; any
//! failure to get an answer is reported as an error so the caller can fall
//! back to its own heuristics.
//!
//! Implementations:
//! - [`ProcessComparer`]: runs an external program with the two paths and
//!   maps exit code 0 to "similar"
//! - [`DocxTextComparer`]: compares `.docx` text in process
//! - [`NullComparer`]: always unavailable

use std::collections::HashSet;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::scanner::document::DocumentExtractor;

/// Poll interval while waiting on a helper with a timeout.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Share of words two `.docx` files must have in common to be similar.
const DOCX_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Errors that prevent a comparer from producing an answer.
#[derive(Debug, Error)]
pub enum ComparerError {
    /// No comparer is configured for this format.
    #[error("No comparer available")]
    Unavailable,

    /// The helper process could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The helper process ran past the configured timeout and was killed.
    #[error("{program} timed out after {timeout:?}")]
    Timeout {
        /// Program that timed out
        program: String,
        /// Configured timeout
        timeout: Duration,
    },

    /// The in-process comparer could not read one of the documents.
    #[error(transparent)]
    Document(#[from] crate::scanner::document::DocumentError),
}

/// Decides whether two documents of the same format are similar.
pub trait DocumentComparer {
    /// Compare two documents.
    ///
    /// # Errors
    ///
    /// Returns [`ComparerError`] when no answer could be obtained.
    fn is_similar(&self, a: &Path, b: &Path) -> Result<bool, ComparerError>;
}

/// Comparer that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullComparer;

impl DocumentComparer for NullComparer {
    fn is_similar(&self, _a: &Path, _b: &Path) -> Result<bool, ComparerError> {
        Err(ComparerError::Unavailable)
    }
}

/// Comparer backed by an external helper program.
///
/// The helper is run as `program args... <path a> <path b>` with no stdin
/// and discarded output. Exit code 0 means similar; any other exit means
/// not similar.
#[derive(Debug, Clone)]
pub struct ProcessComparer {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessComparer {
    /// Create a comparer for `program` with leading `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Kill the helper and treat it as failed once `timeout` elapses.
    ///
    /// Without a timeout the call blocks until the helper exits.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn wait_with_timeout(
        &self,
        child: &mut std::process::Child,
        timeout: Duration,
    ) -> Result<std::process::ExitStatus, ComparerError> {
        let spawn_err = |source| ComparerError::Spawn {
            program: self.program.clone(),
            source,
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().map_err(spawn_err)? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(e) = child.kill() {
                    log::warn!("Failed to kill {}: {}", self.program, e);
                }
                // Reap the killed process.
                let _ = child.wait();
                return Err(ComparerError::Timeout {
                    program: self.program.clone(),
                    timeout,
                });
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

impl DocumentComparer for ProcessComparer {
    fn is_similar(&self, a: &Path, b: &Path) -> Result<bool, ComparerError> {
        let spawn_err = |source| ComparerError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(a)
            .arg(b)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_err)?;

        let status = match self.timeout {
            Some(timeout) => self.wait_with_timeout(&mut child, timeout)?,
            None => child.wait().map_err(spawn_err)?,
        };

        log::trace!(
            "{} {} {} -> {}",
            self.program,
            a.display(),
            b.display(),
            status
        );
        Ok(status.success())
    }
}

/// In-process comparer for `.docx` files.
///
/// Documents are similar when the words they share make up more than 60%
/// of the larger word set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextComparer;

impl DocxTextComparer {
    fn words(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Shared-word ratio `|A ∩ B| / max(|A|, |B|)`, 0 if either is empty.
    #[must_use]
    pub fn overlap(a: &str, b: &str) -> f64 {
        let words_a = Self::words(a);
        let words_b = Self::words(b);
        if words_a.is_empty() || words_b.is_empty() {
            return 0.0;
        }
        let common = words_a.intersection(&words_b).count();
        common as f64 / words_a.len().max(words_b.len()) as f64
    }
}

impl DocumentComparer for DocxTextComparer {
    fn is_similar(&self, a: &Path, b: &Path) -> Result<bool, ComparerError> {
        let text_a = DocumentExtractor::extract_docx(a)?;
        let text_b = DocumentExtractor::extract_docx(b)?;
        Ok(Self::overlap(&text_a, &text_b) > DOCX_SIMILARITY_THRESHOLD)
    }
}

/// The set of comparers used by the document matcher, one per format.
pub struct DocumentComparers {
    /// Spreadsheets (`xlsx`, `xls`)
    pub spreadsheet: Box<dyn DocumentComparer>,
    /// Word-processor documents (`docx`)
    pub word: Box<dyn DocumentComparer>,
    /// Presentations (`pptx`)
    pub presentation: Box<dyn DocumentComparer>,
}

impl DocumentComparers {
    /// Comparers that are all unavailable.
    #[must_use]
    pub fn none() -> Self {
        Self {
            spreadsheet: Box::new(NullComparer),
            word: Box::new(NullComparer),
            presentation: Box::new(NullComparer),
        }
    }
}

impl Default for DocumentComparers {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for DocumentComparers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentComparers").finish_non_exhaustive()
    }
}
