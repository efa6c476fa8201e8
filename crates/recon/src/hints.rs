//! Advisory pairing of leftover records whose names agree but amounts don't.
//!
//! Runs after the partition is final and never changes it. A typical hit is
//! a transfer recorded with a fee deducted on one side.

use crate::model::{AmountMismatch, Record};

/// Shared-token length needed for a hint (same cut-off as the exact layer).
const MIN_SHARED_TOKEN_LEN: usize = 3;

/// For each leftover B record, the first leftover A record (original order)
/// sharing a token of at least `MIN_SHARED_TOKEN_LEN` chars with a different
/// amount. Each A record is hinted at most once.
pub fn find_amount_mismatches(unmatched_a: &[&Record], unmatched_b: &[&Record]) -> Vec<AmountMismatch> {
    let mut used = vec![false; unmatched_a.len()];
    let mut hints = Vec::new();

    for b in unmatched_b {
        let found = unmatched_a.iter().enumerate().find_map(|(i, a)| {
            if used[i] || a.amount == b.amount {
                return None;
            }
            shared_token(&a.tokens, &b.tokens).map(|token| (i, token))
        });

        if let Some((i, token)) = found {
            used[i] = true;
            hints.push(AmountMismatch {
                a: unmatched_a[i].display(),
                b: b.display(),
                shared_token: token.to_string(),
            });
        }
    }

    hints
}

fn shared_token<'a>(tokens_a: &'a [String], tokens_b: &[String]) -> Option<&'a str> {
    tokens_a
        .iter()
        .filter(|t| t.chars().count() >= MIN_SHARED_TOKEN_LEN)
        .find(|t| tokens_b.contains(*t))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchState, RawValue};
    use crate::normalize::tokenize_str;
    use ordered_float::OrderedFloat;

    fn record(id: usize, name: &str, amount: f64) -> Record {
        Record {
            id,
            row: id,
            raw_name: RawValue::Text(name.into()),
            tokens: tokenize_str(name),
            amount: OrderedFloat(amount),
            state: MatchState::Unmatched,
            identifiers: None,
        }
    }

    #[test]
    fn pairs_names_with_different_amounts() {
        let a = [record(0, "Peter Jones", 10.0), record(1, "Maria Souza", 100.0)];
        let b = [record(0, "Souza Maria", 98.5)];
        let a_refs: Vec<&Record> = a.iter().collect();
        let b_refs: Vec<&Record> = b.iter().collect();

        let hints = find_amount_mismatches(&a_refs, &b_refs);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].a.id, 1);
        assert_eq!(hints[0].b.amount, 98.5);
        assert_eq!(hints[0].shared_token, "maria");
    }

    #[test]
    fn same_amount_or_short_tokens_are_not_hints() {
        let a = [record(0, "Ana Li", 10.0), record(1, "Bo Xu", 10.0)];
        let b = [record(0, "Ana Li", 10.0), record(1, "Bo Xu", 12.0)];
        let a_refs: Vec<&Record> = a.iter().collect();
        let b_refs: Vec<&Record> = b.iter().collect();
        assert!(find_amount_mismatches(&a_refs, &b_refs).is_empty());
    }

    #[test]
    fn each_a_record_hinted_once() {
        let a = [record(0, "Maria Souza", 100.0)];
        let b = [record(0, "Maria", 90.0), record(1, "Maria", 80.0)];
        let a_refs: Vec<&Record> = a.iter().collect();
        let b_refs: Vec<&Record> = b.iter().collect();
        let hints = find_amount_mismatches(&a_refs, &b_refs);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].b.id, 0);
    }
}
