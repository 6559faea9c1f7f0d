//! Grouping engine with an exact pass and an approximate pass.
//!
//! # Overview
//!
//! 1. **Exact pass**: fingerprint every record and bucket equal
//!    fingerprints. Buckets of two or more become exact groups and their
//!    members leave the pipeline.
//! 2. **Approximate pass** (optional): a greedy scan over the remaining
//!    records in catalog order. The first unclaimed record becomes an
//!    anchor and is compared against every later unclaimed record; matches
//!    are claimed and joined to the anchor's group.
//!
//! The approximate pass only ever compares an anchor with a candidate.
//! It does not merge groups transitively, so two non-anchor members of a
//! group may not match each other. Cost is quadratic in the number of
//! records left after the exact pass.
//!
//! # Example
//!
//! ```no_run
//! use simdupe::duplicates::{CategoryMatcher, GroupingEngine};
//! use simdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let records = Walker::new(Path::new("."), WalkerConfig::default())
//!     .catalog()
//!     .unwrap();
//! let matcher = CategoryMatcher::default();
//! let engine = GroupingEngine::new(&matcher);
//!
//! let outcome = engine.run(records, true);
//! println!("{} exact, {} similar", outcome.exact.len(), outcome.similar.len());
//! ```

use std::collections::VecDeque;

use crate::progress::ProgressCallback;
use crate::scanner::{FileRecord, Hasher};

use super::groups::{group_by_fingerprint, Group, GroupKind};
use super::matcher::SimilarityMatcher;

/// Default number of records between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Phase name reported for the exact pass.
pub const PHASE_FINGERPRINT: &str = "fingerprint";

/// Phase name reported for the approximate pass.
pub const PHASE_SIMILARITY: &str = "similarity";

/// Groups produced by a run.
#[derive(Debug, Default)]
pub struct GroupingOutcome {
    /// Byte-identical groups
    pub exact: Vec<Group>,
    /// Anchor-relative similarity groups (empty unless requested)
    pub similar: Vec<Group>,
}

impl GroupingOutcome {
    /// All groups, exact first.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.exact.iter().chain(self.similar.iter())
    }
}

/// Orchestrates the exact and approximate passes.
pub struct GroupingEngine<'a> {
    matcher: &'a dyn SimilarityMatcher,
    hasher: Hasher,
    progress: Option<&'a dyn ProgressCallback>,
    progress_interval: usize,
}

impl<'a> GroupingEngine<'a> {
    /// Create an engine around a matcher.
    pub fn new(matcher: &'a dyn SimilarityMatcher) -> Self {
        Self {
            matcher,
            hasher: Hasher::new(),
            progress: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Use a custom content hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Hasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Report progress to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: &'a dyn ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Emit a progress event every `interval` records (minimum 1).
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Run the exact pass and, if `similar` is set, the approximate pass.
    pub fn run(&self, records: Vec<FileRecord>, similar: bool) -> GroupingOutcome {
        let (exact, rest) = self.exact_pass(records);
        let similar = if similar {
            self.approximate_pass(rest)
        } else {
            Vec::new()
        };
        GroupingOutcome { exact, similar }
    }

    /// Fingerprint every record and group identical content.
    ///
    /// Returns the exact groups and the records that are in none of them.
    /// Records that cannot be read get no fingerprint and are passed on.
    pub fn exact_pass(&self, mut records: Vec<FileRecord>) -> (Vec<Group>, Vec<FileRecord>) {
        let total = records.len();
        self.phase_start(PHASE_FINGERPRINT, total);

        for (index, record) in records.iter_mut().enumerate() {
            record.fingerprint = self.hasher.fingerprint(&record.path);
            let current = index + 1;
            if current % self.progress_interval == 0 || current == total {
                self.report(current, record);
            }
        }

        let (groups, rest) = group_by_fingerprint(records);
        self.phase_end(PHASE_FINGERPRINT);
        log::debug!(
            "Exact pass: {} groups, {} of {} records remain",
            groups.len(),
            rest.len(),
            total
        );
        (groups, rest)
    }

    /// Greedily group records around anchors, in catalog order.
    pub fn approximate_pass(&self, records: Vec<FileRecord>) -> Vec<Group> {
        let total = records.len();
        self.phase_start(PHASE_SIMILARITY, total);

        let mut pool: VecDeque<FileRecord> = records.into();
        let mut groups = Vec::new();
        let mut processed = 0usize;

        while let Some(anchor) = pool.pop_front() {
            let mut group = Group::with_anchor(GroupKind::Similar, anchor);
            let mut unclaimed = VecDeque::with_capacity(pool.len());

            for candidate in pool.drain(..) {
                let result = self.matcher.compare(group.anchor(), &candidate);
                if result.is_match() {
                    group.push(candidate, result.score());
                } else {
                    unclaimed.push_back(candidate);
                }
            }
            pool = unclaimed;

            let before = processed;
            processed = total - pool.len();
            let crossed = processed / self.progress_interval > before / self.progress_interval;
            if crossed || pool.is_empty() {
                self.report(processed, group.anchor());
            }

            if group.has_duplicates() {
                log::trace!(
                    "Similarity group around {} with {} members",
                    group.anchor().path.display(),
                    group.len()
                );
                groups.push(group);
            }
        }

        self.phase_end(PHASE_SIMILARITY);
        log::debug!("Approximate pass: {} groups", groups.len());
        groups
    }

    fn phase_start(&self, phase: &str, total: usize) {
        if let Some(progress) = self.progress {
            progress.on_phase_start(phase, total);
        }
    }

    fn phase_end(&self, phase: &str) {
        if let Some(progress) = self.progress {
            progress.on_phase_end(phase);
        }
    }

    fn report(&self, current: usize, record: &FileRecord) {
        if let Some(progress) = self.progress {
            progress.on_progress(current, &record.path.to_string_lossy());
        }
    }
}
