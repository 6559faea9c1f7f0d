//! Output groups and fingerprint bucketing.
//!
//! # Overview
//!
//! A [`Group`] is an ordered list of members whose first entry is the
//! *anchor*. Exact groups contain byte-identical files; similarity groups
//! contain files that each matched the anchor. Members of a similarity
//! group are not guaranteed to match one another.
//!
//! # Example
//!
//! ```
//! use simdupe::duplicates::group_by_fingerprint;
//! use simdupe::scanner::{Category, FileRecord, Hasher};
//!
//! let dir = tempfile::tempdir().unwrap();
//! for (name, content) in [("a.txt", "dup"), ("b.txt", "dup"), ("c.txt", "other")] {
//!     std::fs::write(dir.path().join(name), content).unwrap();
//! }
//! let hasher = Hasher::new();
//! let records = ["a.txt", "b.txt", "c.txt"].iter().map(|name| {
//!     let mut record = FileRecord::new(dir.path().join(name), 3, Category::Document);
//!     record.fingerprint = hasher.fingerprint(&record.path);
//!     record
//! });
//!
//! let (groups, rest) = group_by_fingerprint(records.collect());
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 2);
//! assert_eq!(rest.len(), 1);
//! ```

use std::collections::HashMap;

use crate::scanner::{FileRecord, Fingerprint};

/// How a group was formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Members share a content fingerprint.
    Exact,
    /// Members matched the anchor under the category rules.
    Similar,
}

/// A file in a group with its score relative to the anchor.
#[derive(Debug, Clone)]
pub struct GroupMember {
    /// The grouped file
    pub record: FileRecord,
    /// Score against the anchor; 1.0 for the anchor itself
    pub score: f64,
}

/// A set of candidate duplicates.
#[derive(Debug, Clone)]
pub struct Group {
    kind: GroupKind,
    members: Vec<GroupMember>,
}

impl Group {
    /// Start a group with its anchor.
    #[must_use]
    pub fn with_anchor(kind: GroupKind, anchor: FileRecord) -> Self {
        Self {
            kind,
            members: vec![GroupMember {
                record: anchor,
                score: 1.0,
            }],
        }
    }

    /// Build an exact group; every member scores 1.0.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn exact(records: Vec<FileRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            kind: GroupKind::Exact,
            members: records
                .into_iter()
                .map(|record| GroupMember { record, score: 1.0 })
                .collect(),
        })
    }

    /// Append a member with its score against the anchor.
    pub fn push(&mut self, record: FileRecord, score: f64) {
        self.members.push(GroupMember { record, score });
    }

    /// How this group was formed.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The anchor (first member).
    #[must_use]
    pub fn anchor(&self) -> &FileRecord {
        &self.members[0].record
    }

    /// All members, anchor first.
    #[must_use]
    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a group has at least its anchor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group has grown beyond its anchor.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// Mean score over all members, anchor included.
    #[must_use]
    pub fn average_score(&self) -> f64 {
        let total: f64 = self.members.iter().map(|m| m.score).sum();
        total / self.members.len() as f64
    }

    /// Combined size of all members in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.members.iter().map(|m| m.record.size).sum()
    }
}

/// Bucket records by fingerprint.
///
/// Buckets with two or more members become exact groups, ordered by the
/// catalog position of their first member. Everything else (singletons and
/// records without a fingerprint) is returned in catalog order.
#[must_use]
pub fn group_by_fingerprint(records: Vec<FileRecord>) -> (Vec<Group>, Vec<FileRecord>) {
    let mut counts: HashMap<Fingerprint, usize> = HashMap::new();
    for fingerprint in records.iter().filter_map(|r| r.fingerprint) {
        *counts.entry(fingerprint).or_default() += 1;
    }

    let mut buckets: HashMap<Fingerprint, Vec<FileRecord>> = HashMap::new();
    let mut order: Vec<Fingerprint> = Vec::new();
    let mut rest = Vec::new();

    for record in records {
        match record.fingerprint {
            Some(fingerprint) if counts[&fingerprint] > 1 => {
                let bucket = buckets.entry(fingerprint).or_insert_with(|| {
                    order.push(fingerprint);
                    Vec::new()
                });
                bucket.push(record);
            }
            _ => rest.push(record),
        }
    }

    let groups = order
        .into_iter()
        .filter_map(|fingerprint| buckets.remove(&fingerprint))
        .filter_map(Group::exact)
        .collect();

    (groups, rest)
}
