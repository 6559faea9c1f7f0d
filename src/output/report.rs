//! Line-oriented group report.
//!
//! # Format
//!
//! Exact groups:
//!
//! ```text
//! EXACT|1.00
//! /photos/a.jpg
//! /photos/a (1).jpg
//! ---GROUP---
//! ```
//!
//! Similarity groups, with the mean score in the header and each member's
//! score against the anchor (the anchor itself scores 1.00):
//!
//! ```text
//! SIMILAR|0.98
//! /photos/b.jpg|1.00
//! /photos/c.jpg|0.95
//! ---GROUP---
//! ```
//!
//! All exact groups come first. Nothing else is written to the sink.

use std::io::{self, Write};

use crate::duplicates::{Group, GroupKind, GroupingOutcome};

/// Group terminator line.
pub const GROUP_SEPARATOR: &str = "---GROUP---";

/// Writes a [`GroupingOutcome`] in the report format.
#[derive(Debug)]
pub struct ReportOutput<'a> {
    outcome: &'a GroupingOutcome,
}

impl<'a> ReportOutput<'a> {
    /// Create a report over a finished run.
    #[must_use]
    pub fn new(outcome: &'a GroupingOutcome) -> Self {
        Self { outcome }
    }

    /// Write every group to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for group in self.outcome.groups() {
            write_group(&mut writer, group)?;
        }
        writer.flush()
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn write_group<W: Write>(writer: &mut W, group: &Group) -> io::Result<()> {
    match group.kind() {
        GroupKind::Exact => {
            writeln!(writer, "EXACT|1.00")?;
            for member in group.members() {
                writeln!(writer, "{}", member.record.path.display())?;
            }
        }
        GroupKind::Similar => {
            writeln!(writer, "SIMILAR|{:.2}", group.average_score())?;
            for member in group.members() {
                writeln!(
                    writer,
                    "{}|{:.2}",
                    member.record.path.display(),
                    member.score
                )?;
            }
        }
    }
    writeln!(writer, "{}", GROUP_SEPARATOR)
}
