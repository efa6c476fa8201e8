use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::error::{DataError, Side};
use crate::layout::Layout;

/// Normalized (absolute) transfer amount. Totally ordered so pools can
/// index by it; equality is exact.
pub type Amount = OrderedFloat<f64>;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One spreadsheet cell as handed over by the file-parsing side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Empty,
}

impl RawValue {
    /// Absent: an empty cell or text that is blank after trimming.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Cell text used in error messages and display.
    pub fn to_display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Identifier columns carried by the 6-column layout. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifiers {
    pub code_type: String,
    pub code_number: String,
}

/// One side's raw `(name, amount)` tuple, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub name: RawValue,
    pub amount: RawValue,
    pub identifiers: Option<Identifiers>,
}

impl LedgerRow {
    pub fn new(name: impl Into<RawValue>, amount: impl Into<RawValue>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            identifiers: None,
        }
    }
}

/// Both ledgers, ready for a run.
#[derive(Debug, Clone, Default)]
pub struct LedgerInput {
    pub a: Vec<LedgerRow>,
    pub b: Vec<LedgerRow>,
    pub layout: Option<Layout>,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Unmatched,
    MatchedExact,
    MatchedFuzzy,
}

#[derive(Debug, Clone)]
pub struct Record {
    /// Index in the pool, assigned after empty rows are dropped.
    pub id: usize,
    /// Position in the side's input rows.
    pub row: usize,
    pub raw_name: RawValue,
    pub tokens: Vec<String>,
    pub amount: Amount,
    pub state: MatchState,
    pub identifiers: Option<Identifiers>,
}

impl Record {
    pub fn display(&self) -> DisplayRecord {
        DisplayRecord {
            id: self.id,
            row: self.row,
            name: crate::normalize::display_name(&self.tokens),
            raw_name: self.raw_name.to_display(),
            amount: self.amount.into_inner(),
            identifiers: self.identifiers.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLayer {
    Exact,
    Fuzzy,
}

impl MatchLayer {
    pub fn state(self) -> MatchState {
        match self {
            Self::Exact => MatchState::MatchedExact,
            Self::Fuzzy => MatchState::MatchedFuzzy,
        }
    }
}

/// Which fuzzy sub-test accepted a pair, with its partial_ratio score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum FuzzyEvidence {
    /// Every B token found a close A token; `score` is the weakest of them.
    PerToken { score: u8 },
    /// Rejoined names compared as whole strings.
    WholeString { score: u8 },
}

impl FuzzyEvidence {
    pub fn score(&self) -> u8 {
        match self {
            Self::PerToken { score } | Self::WholeString { score } => *score,
        }
    }
}

impl std::fmt::Display for FuzzyEvidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerToken { score } => write!(f, "per_token({score})"),
            Self::WholeString { score } => write!(f, "whole_string({score})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPair {
    pub a: usize,
    pub b: usize,
    pub layer: MatchLayer,
    pub evidence: Option<FuzzyEvidence>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub id: usize,
    pub row: usize,
    /// Tokens rejoined with single spaces.
    pub name: String,
    pub raw_name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Identifiers>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRow {
    pub layer: MatchLayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<FuzzyEvidence>,
    pub a: DisplayRecord,
    pub b: DisplayRecord,
}

/// Unmatched A/B records that share a name token but disagree on amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountMismatch {
    pub a: DisplayRecord,
    pub b: DisplayRecord,
    pub shared_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub records_a: usize,
    pub records_b: usize,
    pub exact_pairs: usize,
    pub fuzzy_pairs: usize,
    pub fuzzy_per_token: usize,
    pub fuzzy_whole_string: usize,
    pub unmatched_a: usize,
    pub unmatched_b: usize,
    pub rejected_rows: usize,
    pub amount_mismatches: usize,
}

impl ReportSummary {
    pub fn is_reconciled(&self) -> bool {
        self.unmatched_a == 0 && self.unmatched_b == 0 && self.rejected_rows == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
    pub engine_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub exact: Vec<MatchedRow>,
    pub fuzzy: Vec<MatchedRow>,
    pub unmatched_a: Vec<DisplayRecord>,
    pub unmatched_b: Vec<DisplayRecord>,
    pub rejected: Vec<DataError>,
    pub amount_mismatches: Vec<AmountMismatch>,
}

impl ReconciliationReport {
    /// Ids of `side` in every partition, in report order.
    pub fn ids(&self, side: Side) -> Vec<usize> {
        let pick = |m: &MatchedRow| match side {
            Side::A => m.a.id,
            Side::B => m.b.id,
        };
        let unmatched = match side {
            Side::A => &self.unmatched_a,
            Side::B => &self.unmatched_b,
        };
        self.exact
            .iter()
            .map(pick)
            .chain(self.fuzzy.iter().map(pick))
            .chain(unmatched.iter().map(|r| r.id))
            .collect()
    }
}
