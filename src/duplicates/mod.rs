//! Duplicate and near-duplicate detection.
//!
//! This module provides functionality for:
//! - Name similarity shared by every category ([`similarity`])
//! - Document comparer collaborators ([`comparer`])
//! - Per-category match rules ([`matcher`])
//! - Output groups and fingerprint bucketing ([`groups`])
//! - The exact and approximate grouping passes ([`finder`])

pub mod comparer;
pub mod finder;
pub mod groups;
pub mod matcher;
pub mod similarity;

pub use comparer::{
    ComparerError, DocumentComparer, DocumentComparers, DocxTextComparer, NullComparer,
    ProcessComparer,
};
pub use finder::{GroupingEngine, GroupingOutcome};
pub use groups::{group_by_fingerprint, Group, GroupKind, GroupMember};
pub use matcher::{size_ratio, CategoryMatcher, MatchResult, SimilarityMatcher};
pub use similarity::name_similarity;
