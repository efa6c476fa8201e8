use crate::config::{ExactConfig, FuzzyConfig};
use crate::model::{FuzzyEvidence, Record};
use crate::normalize::display_name;
use crate::similarity::partial_ratio;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Layer 1 test: every B token of at least `min_token_len` chars appears
/// verbatim among the first `prefix_tokens` A tokens.
///
/// A B name with no such token passes vacuously (e.g. `"jo li"`). This is
/// known to admit false positives on very short names and is kept as-is.
pub fn strict_match(tokens_a: &[String], tokens_b: &[String], config: &ExactConfig) -> bool {
    let prefix = &tokens_a[..tokens_a.len().min(config.prefix_tokens)];
    tokens_b
        .iter()
        .filter(|t| char_len(t) >= config.min_token_len)
        .all(|t| prefix.contains(t))
}

/// Layer 2 test. Returns the evidence of the sub-test that accepted, or
/// `None` when neither did.
///
/// 1. Per-token: each B token needs some A token among the first
///    `prefix_tokens`, both at least `min_token_len` chars long, with
///    `partial_ratio >= token_threshold`.
/// 2. Fallback, only when (1) fails: `partial_ratio` of the space-joined
///    names `>= fallback_threshold`.
pub fn fuzzy_match(
    tokens_a: &[String],
    tokens_b: &[String],
    config: &FuzzyConfig,
) -> Option<FuzzyEvidence> {
    if let Some(score) = per_token_score(tokens_a, tokens_b, config) {
        return Some(FuzzyEvidence::PerToken { score });
    }

    let score = partial_ratio(&display_name(tokens_a), &display_name(tokens_b));
    (score >= config.fallback_threshold).then_some(FuzzyEvidence::WholeString { score })
}

/// Weakest accepted score across B tokens, or `None` if any B token finds
/// no partner. An empty B passes with score 100.
fn per_token_score(tokens_a: &[String], tokens_b: &[String], config: &FuzzyConfig) -> Option<u8> {
    let prefix = &tokens_a[..tokens_a.len().min(config.prefix_tokens)];
    let mut weakest = 100u8;

    for t2 in tokens_b {
        if char_len(t2) < config.min_token_len {
            return None;
        }
        let score = prefix
            .iter()
            .filter(|t1| char_len(t1) >= config.min_token_len)
            .map(|t1| partial_ratio(t1, t2))
            .find(|&s| s >= config.token_threshold)?;
        weakest = weakest.min(score);
    }

    Some(weakest)
}

/// Greedy tie-break: the first candidate (in the order given) that
/// `accept` approves wins. Returns its id with whatever `accept` produced.
pub fn first_candidate<'a, I, T, F>(candidates: I, mut accept: F) -> Option<(usize, T)>
where
    I: IntoIterator<Item = &'a Record>,
    F: FnMut(&Record) -> Option<T>,
{
    candidates
        .into_iter()
        .find_map(|record| accept(record).map(|found| (record.id, found)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchState, RawValue};
    use crate::normalize::tokenize_str;
    use ordered_float::OrderedFloat;

    fn strict(a: &str, b: &str) -> bool {
        strict_match(&tokenize_str(a), &tokenize_str(b), &ExactConfig::default())
    }

    fn fuzzy(a: &str, b: &str) -> Option<FuzzyEvidence> {
        fuzzy_match(&tokenize_str(a), &tokenize_str(b), &FuzzyConfig::default())
    }

    fn record(id: usize, name: &str) -> Record {
        Record {
            id,
            row: id,
            raw_name: RawValue::Text(name.into()),
            tokens: tokenize_str(name),
            amount: OrderedFloat(1.0),
            state: MatchState::Unmatched,
            identifiers: None,
        }
    }

    #[test]
    fn strict_ignores_token_order() {
        assert!(strict("John Smith", "Smith John"));
    }

    #[test]
    fn strict_only_searches_first_three_a_tokens() {
        assert!(strict("ana maria souza lima", "souza"));
        assert!(!strict("ana maria souza lima", "lima"));
    }

    #[test]
    fn strict_ignores_short_b_tokens() {
        assert!(strict("john smith", "j smith"));
        assert!(strict("john smith", "jo smith"));
        assert!(!strict("john smith", "john smyth"));
    }

    #[test]
    fn strict_requires_exact_tokens() {
        assert!(!strict("jon smith", "john smith"));
    }

    #[test]
    fn strict_vacuous_when_b_has_only_short_tokens() {
        assert!(strict("maria souza", "jo li"));
        assert!(strict("maria souza", ""));
    }

    #[test]
    fn fuzzy_per_token_typos() {
        // "smyth" vs "smith": lcs 4 -> 8 / 10 = 80
        let ev = fuzzy("john smith", "john smyth").unwrap();
        assert_eq!(ev, FuzzyEvidence::PerToken { score: 80 });
    }

    #[test]
    fn fuzzy_short_typo_below_threshold() {
        // "jon" vs "john" scores 67 per token; joined names score 78.
        assert_eq!(fuzzy("john smith", "jon smyth"), None);
    }

    #[test]
    fn fuzzy_per_token_substring() {
        let ev = fuzzy("johnathan smithson", "john smith").unwrap();
        assert_eq!(ev, FuzzyEvidence::PerToken { score: 100 });
    }

    #[test]
    fn fuzzy_falls_back_to_whole_string() {
        // "j" is too short for the per-token test.
        let ev = fuzzy("Jon Smithe Transfer", "J Smith").unwrap();
        assert_eq!(ev, FuzzyEvidence::WholeString { score: 86 });
    }

    #[test]
    fn fuzzy_rejects_unrelated_names() {
        assert_eq!(fuzzy("maria souza", "peter jones"), None);
    }

    #[test]
    fn fuzzy_per_token_only_uses_a_prefix() {
        // "lima" is the 4th A token; whole-string fallback still catches it
        // because "lima" is a substring of the joined A name.
        let ev = fuzzy("ana maria souza lima", "lima").unwrap();
        assert_eq!(ev, FuzzyEvidence::WholeString { score: 100 });
    }

    #[test]
    fn first_candidate_takes_earliest_acceptable() {
        let records = vec![record(0, "peter"), record(1, "john a"), record(2, "john b")];
        let hit = first_candidate(&records, |r| r.tokens.contains(&"john".to_string()).then_some(()));
        assert_eq!(hit, Some((1, ())));
    }

    #[test]
    fn first_candidate_none_when_nothing_accepts() {
        let records = vec![record(0, "peter")];
        let hit: Option<(usize, ())> = first_candidate(&records, |_| None);
        assert_eq!(hit, None);
    }
}
