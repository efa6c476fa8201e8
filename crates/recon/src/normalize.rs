//! Name tokenization and amount normalization.

use std::sync::OnceLock;

use ordered_float::OrderedFloat;
use regex::Regex;

use crate::error::DataErrorKind;
use crate::model::{Amount, RawValue};

/// Amount / exchange-rate annotations embedded in name fields, e.g.
/// `"USD 120.50"`, `"$40"`, `"R$ 300Buy@5.12"`.
const ANNOTATION_PATTERN: &str = r"(?:R\$|\$|USD)?\s?\d+(?:\.\d{1,2})?(?:Buy@\d+(?:\.\d{1,2})?)?";

fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ANNOTATION_PATTERN).expect("annotation pattern is valid"))
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '-' | '+' | '(' | ')' | '@' | ',')
}

/// Tokenize a raw name cell. Non-text cells yield no tokens.
pub fn tokenize(raw: &RawValue) -> Vec<String> {
    match raw {
        RawValue::Text(s) => tokenize_str(s),
        RawValue::Number(_) | RawValue::Empty => Vec::new(),
    }
}

/// Strip annotations, lowercase, split on separator runs, drop blanks.
/// Tokens keep their left-to-right order.
pub fn tokenize_str(text: &str) -> Vec<String> {
    let cleaned = annotation_re().replace_all(text, "");
    cleaned
        .to_lowercase()
        .split(is_separator)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Rejoin tokens for display.
pub fn display_name(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Absolute value of a numeric amount cell.
///
/// Text is trimmed and parsed as a float; blanks count as missing.
/// Non-finite values are rejected as non-numeric.
pub fn normalize_amount(raw: &RawValue) -> Result<Amount, DataErrorKind> {
    let value = match raw {
        RawValue::Empty => return Err(DataErrorKind::MissingAmount),
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(DataErrorKind::MissingAmount);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| DataErrorKind::NonNumericAmount)?
        }
    };

    if !value.is_finite() {
        return Err(DataErrorKind::NonNumericAmount);
    }

    Ok(OrderedFloat(value.abs()))
}
