//! Generic name similarity shared by every category.

/// Score returned when one name contains the other.
pub const SUBSTRING_SCORE: f64 = 0.8;

/// Case-insensitive similarity of two names.
///
/// - Equal names score 1.0.
/// - If one contains the other the score is [`SUBSTRING_SCORE`], regardless
///   of the length difference.
/// - Otherwise the score is `2 * common / (len1 + len2)`, where `common`
///   counts every equal (c1, c2) character pair across the two names, so
///   repeated characters multiply. Names with many repeated characters can
///   therefore score above 1.0.
///
/// The function is symmetric.
///
/// # Examples
///
/// ```
/// use simdupe::duplicates::name_similarity;
///
/// assert_eq!(name_similarity("Report", "report"), 1.0);
/// assert_eq!(name_similarity("report", "report_final"), 0.8);
/// assert_eq!(name_similarity("abc", "xyz"), 0.0);
/// ```
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return SUBSTRING_SCORE;
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut len_a = 0usize;
    let mut common = 0usize;
    for c1 in a.chars() {
        len_a += 1;
        common += b_chars.iter().filter(|&&c2| c1 == c2).count();
    }

    let total = len_a + b_chars.len();
    if total == 0 {
        return 0.0;
    }
    2.0 * common as f64 / total as f64
}
