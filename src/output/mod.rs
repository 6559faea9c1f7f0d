//! Output formatters for grouping results.
//!
//! The report is the only thing written to stdout; diagnostics and
//! progress go to stderr.
//!
//! # Example
//!
//! ```no_run
//! use simdupe::duplicates::{CategoryMatcher, GroupingEngine};
//! use simdupe::output::ReportOutput;
//! use simdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let records = Walker::new(Path::new("."), WalkerConfig::default())
//!     .catalog()
//!     .unwrap();
//! let matcher = CategoryMatcher::default();
//! let outcome = GroupingEngine::new(&matcher).run(records, true);
//!
//! ReportOutput::new(&outcome).write_to(std::io::stdout()).unwrap();
//! ```

pub mod report;

pub use report::{ReportOutput, GROUP_SEPARATOR};
