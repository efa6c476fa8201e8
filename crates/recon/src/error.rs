use std::fmt;

use serde::Serialize;

/// Which ledger a record or row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Fatal conditions. Any of these aborts a run before (or instead of)
/// producing a report.
#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold out of range, bad delimiter, etc.).
    ConfigValidation(String),
    /// Input rows don't fit any supported column layout.
    Schema { columns: usize },
    /// A record was consumed twice. Engine bug, never user input.
    InvariantViolation { side: Side, id: usize },
    /// IO / CSV read error.
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Schema { columns } => write!(
                f,
                "unsupported layout: {columns} non-empty column(s), expected 4, 5 or 6"
            ),
            Self::InvariantViolation { side, id } => write!(
                f,
                "internal error: ledger {side} record {id} consumed twice"
            ),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataErrorKind {
    MissingAmount,
    NonNumericAmount,
}

/// A single bad row. Recoverable: the row is left out of matching and
/// listed in the report instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataError {
    pub side: Side,
    /// 0-based position in that side's input rows.
    pub row: usize,
    pub value: String,
    pub kind: DataErrorKind,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DataErrorKind::MissingAmount => {
                write!(f, "ledger {}, row {}: missing amount", self.side, self.row)
            }
            DataErrorKind::NonNumericAmount => write!(
                f,
                "ledger {}, row {}: cannot parse amount '{}'",
                self.side, self.row, self.value
            ),
        }
    }
}

impl std::error::Error for DataError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_column_count() {
        let err = ReconError::Schema { columns: 3 };
        assert!(err.to_string().contains("3 non-empty column(s)"));
    }

    #[test]
    fn data_error_display() {
        let err = DataError {
            side: Side::B,
            row: 4,
            value: "12,5x".into(),
            kind: DataErrorKind::NonNumericAmount,
        };
        assert_eq!(err.to_string(), "ledger B, row 4: cannot parse amount '12,5x'");
    }
}
