//! Document text extraction and word-set similarity.
//!
//! This module provides:
//! - Bounded plain-text extraction (the first [`TEXT_LINE_LIMIT`] lines)
//! - Word-set normalization and the Jaccard index between two sets
//! - Paragraph and table text extraction from Word documents (via docx-rs)

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of lines read from a plain-text document.
pub const TEXT_LINE_LIMIT: usize = 50;

/// Shortest token length (exclusive) kept in a word set.
const MIN_WORD_LEN: usize = 2;

/// Errors that can occur during document text extraction.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An error occurred during DOCX extraction.
    #[error("Failed to extract text from DOCX {path}: {message}")]
    DocxError {
        /// Path to the DOCX file
        path: PathBuf,
        /// Error message
        message: String,
    },
}

/// Extractor for document text.
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Read at most `max_lines` lines of a file as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be opened or read.
    pub fn extract_lines(path: &Path, max_lines: usize) -> Result<String, DocumentError> {
        let io_err = |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = BufReader::new(File::open(path).map_err(io_err)?);

        let mut content = String::new();
        let mut line = Vec::new();
        for _ in 0..max_lines {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(io_err)? == 0 {
                break;
            }
            content.push_str(&String::from_utf8_lossy(&line));
            if !content.ends_with('\n') {
                content.push('\n');
            }
        }
        Ok(content)
    }

    /// Extract paragraph and table text from a DOCX file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the file cannot be read or parsed.
    pub fn extract_docx(path: &Path) -> Result<String, DocumentError> {
        let bytes = fs::read(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| DocumentError::DocxError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut text = String::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => push_paragraph(p, &mut text),
                docx_rs::DocumentChild::Table(t) => push_table(t, &mut text),
                _ => {}
            }
        }
        Ok(text)
    }
}

fn push_paragraph(paragraph: &docx_rs::Paragraph, text: &mut String) {
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text.push('\n');
}

fn push_table(table: &docx_rs::Table, text: &mut String) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(p) => push_paragraph(p, text),
                    docx_rs::TableCellContent::Table(t) => push_table(t, text),
                    _ => {}
                }
            }
        }
    }
}

/// Split text on whitespace into normalized words.
///
/// Each token loses every non-alphanumeric character and is lowercased;
/// only words longer than two characters are kept.
#[must_use]
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| word.chars().count() > MIN_WORD_LEN)
        .collect()
}

/// Jaccard index `|A ∩ B| / |A ∪ B|`, or 0 if either set is empty.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let common = a.intersection(b).count();
    let union = a.len() + b.len() - common;
    common as f64 / union as f64
}

/// Word-set similarity of the leading lines of two text files.
///
/// Unreadable files contribute an empty set and therefore score 0.
#[must_use]
pub fn text_similarity(a: &Path, b: &Path) -> f64 {
    let words = |path: &Path| match DocumentExtractor::extract_lines(path, TEXT_LINE_LIMIT) {
        Ok(text) => word_set(&text),
        Err(e) => {
            log::debug!("Text extraction failed: {}", e);
            HashSet::new()
        }
    };
    jaccard(&words(a), &words(b))
}
