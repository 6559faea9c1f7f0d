//! Per-category similarity judgments.
//!
//! # Overview
//!
//! [`CategoryMatcher`] turns a pair of cataloged files into a single
//! [`MatchResult`]. Files of different categories never match. Within a
//! category:
//!
//! - **Image**: difference-hash Hamming distance of at most 10
//! - **Audio**: equal stems, numbered copies (`song` / `song1`), or name
//!   similarity above 0.9
//! - **Document**: size-ratio gate, then format helpers for spreadsheets,
//!   word-processor files and presentations, then name similarity, then
//!   word-set similarity for plain text
//! - **Archive**: size ratio above 0.8 and name similarity above 0.6

use crate::scanner::document::text_similarity;
use crate::scanner::{Category, FileRecord, PerceptualHasher};

use super::comparer::{DocumentComparer, DocumentComparers};
use super::similarity::name_similarity;

/// Name similarity an audio pair must exceed.
pub const AUDIO_NAME_THRESHOLD: f64 = 0.9;
/// Score for `name` vs `name1` / `name2` audio pairs.
pub const NUMBERED_COPY_SCORE: f64 = 0.95;
/// Document pairs below this size ratio are rejected outright.
pub const DOCUMENT_MIN_SIZE_RATIO: f64 = 0.3;
/// Score reported when a format helper says two documents are similar.
pub const HELPER_MATCH_SCORE: f64 = 0.85;
/// Size ratio the helper fallback requires.
pub const HELPER_FALLBACK_SIZE_RATIO: f64 = 0.8;
/// Name similarity for the helper fallback and generic documents.
pub const DOCUMENT_NAME_THRESHOLD: f64 = 0.7;
/// Word-set similarity plain-text documents must exceed.
pub const TEXT_THRESHOLD: f64 = 0.6;
/// Size ratio archives must exceed.
pub const ARCHIVE_SIZE_RATIO: f64 = 0.8;
/// Name similarity archives must exceed.
pub const ARCHIVE_NAME_THRESHOLD: f64 = 0.6;

/// Outcome of comparing two files.
///
/// The score of a non-match is always 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    is_match: bool,
    score: f64,
}

impl MatchResult {
    /// A non-match.
    pub const NO_MATCH: Self = Self {
        is_match: false,
        score: 0.0,
    };

    /// A match with the given score, clamped to [0, 1].
    #[must_use]
    pub fn matched(score: f64) -> Self {
        Self {
            is_match: true,
            score: score.clamp(0.0, 1.0),
        }
    }

    /// A match with `score` if `is_match`, otherwise [`MatchResult::NO_MATCH`].
    #[must_use]
    pub fn when(is_match: bool, score: f64) -> Self {
        if is_match {
            Self::matched(score)
        } else {
            Self::NO_MATCH
        }
    }

    /// Whether the pair matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// Score in [0, 1]; 0 for non-matches.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Pairwise judgment used by the grouping engine.
pub trait SimilarityMatcher {
    /// Compare a group anchor with a candidate.
    fn compare(&self, anchor: &FileRecord, candidate: &FileRecord) -> MatchResult;
}

/// `min / max` of two sizes. Two empty files have ratio 1.
#[must_use]
pub fn size_ratio(a: u64, b: u64) -> f64 {
    let (min, max) = (a.min(b), a.max(b));
    if max == 0 {
        return 1.0;
    }
    min as f64 / max as f64
}

/// Document formats with distinct matching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Spreadsheet,
    Word,
    Presentation,
    PlainText,
    Other,
}

impl DocumentFormat {
    fn of(record: &FileRecord) -> Self {
        match record.extension().as_deref() {
            Some("xlsx" | "xls") => Self::Spreadsheet,
            Some("docx") => Self::Word,
            Some("pptx") => Self::Presentation,
            Some("txt" | "csv") => Self::PlainText,
            _ => Self::Other,
        }
    }
}

/// Dispatches a pair of records to the rule for their category.
#[derive(Debug, Default)]
pub struct CategoryMatcher {
    images: PerceptualHasher,
    comparers: DocumentComparers,
}

impl CategoryMatcher {
    /// Create a matcher from an image hasher and document comparers.
    #[must_use]
    pub fn new(images: PerceptualHasher, comparers: DocumentComparers) -> Self {
        Self { images, comparers }
    }

    fn compare_images(&self, a: &FileRecord, b: &FileRecord) -> MatchResult {
        let hash_a = a.perceptual_hash(&self.images);
        let hash_b = b.perceptual_hash(&self.images);
        if hash_a.is_sentinel() || hash_b.is_sentinel() {
            return MatchResult::NO_MATCH;
        }

        let distance = hash_a.distance(hash_b);
        MatchResult::when(
            distance <= crate::scanner::perceptual::MATCH_THRESHOLD,
            hash_a.similarity(hash_b),
        )
    }

    fn compare_audio(a: &FileRecord, b: &FileRecord) -> MatchResult {
        let (stem_a, stem_b) = (a.stem(), b.stem());
        if stem_a == stem_b {
            return MatchResult::matched(1.0);
        }

        let numbered = |base: &str, other: &str| {
            other
                .strip_prefix(base)
                .is_some_and(|suffix| suffix == "1" || suffix == "2")
        };
        if numbered(&stem_a, &stem_b) || numbered(&stem_b, &stem_a) {
            return MatchResult::matched(NUMBERED_COPY_SCORE);
        }

        let score = name_similarity(&stem_a, &stem_b);
        MatchResult::when(score > AUDIO_NAME_THRESHOLD, score)
    }

    fn compare_documents(&self, a: &FileRecord, b: &FileRecord) -> MatchResult {
        let ratio = size_ratio(a.size, b.size);
        if ratio < DOCUMENT_MIN_SIZE_RATIO {
            return MatchResult::NO_MATCH;
        }

        let format = DocumentFormat::of(a);
        let shared = if format == DocumentFormat::of(b) {
            format
        } else {
            DocumentFormat::Other
        };

        let name_score = name_similarity(&a.stem(), &b.stem());
        let helper: &dyn DocumentComparer = match shared {
            DocumentFormat::Spreadsheet => self.comparers.spreadsheet.as_ref(),
            DocumentFormat::Word => self.comparers.word.as_ref(),
            DocumentFormat::Presentation => self.comparers.presentation.as_ref(),
            DocumentFormat::PlainText | DocumentFormat::Other => {
                if name_score > DOCUMENT_NAME_THRESHOLD {
                    return MatchResult::matched(name_score);
                }
                if shared == DocumentFormat::PlainText {
                    let score = text_similarity(&a.path, &b.path);
                    return MatchResult::when(score > TEXT_THRESHOLD, score);
                }
                return MatchResult::NO_MATCH;
            }
        };

        match helper.is_similar(&a.path, &b.path) {
            Ok(true) => return MatchResult::matched(HELPER_MATCH_SCORE),
            Ok(false) => {}
            Err(e) => log::debug!(
                "{:?} comparer unavailable for {}: {}",
                shared,
                a.path.display(),
                e
            ),
        }

        MatchResult::when(
            ratio > HELPER_FALLBACK_SIZE_RATIO && name_score > DOCUMENT_NAME_THRESHOLD,
            (ratio + name_score) / 2.0,
        )
    }

    fn compare_archives(a: &FileRecord, b: &FileRecord) -> MatchResult {
        let ratio = size_ratio(a.size, b.size);
        let name_score = name_similarity(&a.stem(), &b.stem());
        MatchResult::when(
            ratio > ARCHIVE_SIZE_RATIO && name_score > ARCHIVE_NAME_THRESHOLD,
            (ratio + name_score) / 2.0,
        )
    }
}

impl SimilarityMatcher for CategoryMatcher {
    fn compare(&self, anchor: &FileRecord, candidate: &FileRecord) -> MatchResult {
        if anchor.category() != candidate.category() {
            return MatchResult::NO_MATCH;
        }

        match anchor.category() {
            Category::Image => self.compare_images(anchor, candidate),
            Category::Audio => Self::compare_audio(anchor, candidate),
            Category::Document => self.compare_documents(anchor, candidate),
            Category::Archive => Self::compare_archives(anchor, candidate),
        }
    }
}
