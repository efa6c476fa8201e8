//! String similarity scores in `[0, 100]`.
//!
//! Both scores are built on the insertion/deletion (indel) edit distance:
//!
//! ```text
//! ratio(a, b) = 100 * (1 - indel(a, b) / (|a| + |b|))
//!             = 100 * 2 * lcs(a, b) / (|a| + |b|)
//! ```
//!
//! `partial_ratio` slides the shorter string over every equal-length window
//! of the longer one and keeps the best `ratio`. A shorter string contained
//! in the longer one therefore scores exactly 100. The fuzzy layer's
//! thresholds are tuned against this windowed score; a plain whole-string
//! ratio would score substrings far lower.
//!
//! Inputs are lowercased and compared per Unicode scalar value. Results are
//! rounded half away from zero.

fn chars_lower(s: &str) -> Vec<char> {
    s.to_lowercase().chars().collect()
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Insertion/deletion distance between two char sequences.
pub fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

fn raw_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (1.0 - indel_distance(a, b) as f64 / total as f64)
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Whole-string similarity.
pub fn ratio(s1: &str, s2: &str) -> u8 {
    to_score(raw_ratio(&chars_lower(s1), &chars_lower(s2)))
}

/// Substring-aware similarity: best `ratio` of the shorter string against
/// any equal-length window of the longer one.
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    let a = chars_lower(s1);
    let b = chars_lower(s2);
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return if long.is_empty() { 100 } else { 0 };
    }

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        if window == short.as_slice() {
            return 100;
        }
        best = best.max(raw_ratio(short, window));
    }
    to_score(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(ratio("smith", "smith"), 100);
        assert_eq!(partial_ratio("smith", "smith"), 100);
    }

    #[test]
    fn empty_strings() {
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(partial_ratio("", ""), 100);
        assert_eq!(partial_ratio("", "abc"), 0);
    }

    #[test]
    fn containment_scores_100_ignoring_case() {
        assert_eq!(partial_ratio("smith", "Jon SMITHE transfer"), 100);
        assert_eq!(partial_ratio("jon smithe transfer", "smith"), 100);
    }

    #[test]
    fn plain_ratio_penalizes_length_difference() {
        // 2 * 5 / (5 + 19) = 41.7
        assert_eq!(ratio("smith", "jon smithe transfer"), 42);
    }

    #[test]
    fn ratio_known_values() {
        // lcs("kitten", "sitting") = 4 -> 2 * 4 / 13 = 61.5
        assert_eq!(ratio("kitten", "sitting"), 62);
        // lcs = 5 ("smith") -> 10 / 11 = 90.9
        assert_eq!(ratio("smith", "smithe"), 91);
    }

    #[test]
    fn partial_ratio_best_window() {
        // Best window of "jon smithe transfer" for "j smith" is "n smith":
        // lcs = 6 -> 12 / 14 = 85.7
        assert_eq!(partial_ratio("jon smithe transfer", "j smith"), 86);
        // "jhon" vs "john": lcs = 3 -> 6 / 8 = 75
        assert_eq!(partial_ratio("jhon", "john"), 75);
    }

    #[test]
    fn partial_ratio_is_symmetric() {
        let pairs = [("maria", "mariah silva"), ("abc", "xbcx"), ("joao", "jo")];
        for (x, y) in pairs {
            assert_eq!(partial_ratio(x, y), partial_ratio(y, x), "{x} / {y}");
        }
    }

    #[test]
    fn unicode_is_compared_per_char() {
        assert_eq!(partial_ratio("joão", "JOÃO SILVA"), 100);
        assert_eq!(ratio("é", "e"), 0);
    }

    #[test]
    fn indel_distance_counts_inserts_and_deletes() {
        let a: Vec<char> = "abc".chars().collect();
        let b: Vec<char> = "axc".chars().collect();
        assert_eq!(indel_distance(&a, &b), 2);
    }
}
