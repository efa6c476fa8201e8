//! Tabular input: column-layout detection and CSV loading.
//!
//! A sheet holds both ledgers side by side:
//!
//! | Layout | Columns                                                  |
//! |--------|----------------------------------------------------------|
//! | 4      | `name_a, amount_a, name_b, amount_b`                     |
//! | 5      | as 4; the fifth column is ignored                        |
//! | 6      | `code_type, code_number, name_a, amount_a, name_b, amount_b` |
//!
//! Columns that are empty in every row are dropped before counting.

use serde::Serialize;

use crate::config::InputConfig;
use crate::error::ReconError;
use crate::model::{Identifiers, LedgerInput, LedgerRow, RawValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    FourColumn,
    FiveColumn,
    SixColumn,
}

impl Layout {
    pub fn from_column_count(columns: usize) -> Result<Self, ReconError> {
        match columns {
            4 => Ok(Self::FourColumn),
            5 => Ok(Self::FiveColumn),
            6 => Ok(Self::SixColumn),
            _ => Err(ReconError::Schema { columns }),
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Self::FourColumn => 4,
            Self::FiveColumn => 5,
            Self::SixColumn => 6,
        }
    }

    /// Offset of `name_a`; everything before it is identifiers.
    fn first_ledger_column(self) -> usize {
        match self {
            Self::FourColumn | Self::FiveColumn => 0,
            Self::SixColumn => 2,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-column", self.columns())
    }
}

/// Split a sheet into the two ledgers.
///
/// Fails with `ReconError::Schema` when the non-empty column count is not
/// 4, 5 or 6. Row order is preserved on both sides.
pub fn split_rows(grid: &[Vec<RawValue>]) -> Result<LedgerInput, ReconError> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let retained: Vec<usize> = (0..width)
        .filter(|&c| grid.iter().any(|row| row.get(c).is_some_and(|v| !v.is_absent())))
        .collect();

    let layout = Layout::from_column_count(retained.len())?;
    let base = layout.first_ledger_column();

    let mut a = Vec::with_capacity(grid.len());
    let mut b = Vec::with_capacity(grid.len());

    for row in grid {
        let cell = |k: usize| row.get(retained[k]).cloned().unwrap_or(RawValue::Empty);

        let identifiers = if layout == Layout::SixColumn {
            let (code_type, code_number) = (cell(0), cell(1));
            if code_type.is_absent() && code_number.is_absent() {
                None
            } else {
                Some(Identifiers {
                    code_type: code_type.to_display(),
                    code_number: code_number.to_display(),
                })
            }
        } else {
            None
        };

        a.push(LedgerRow {
            name: cell(base),
            amount: cell(base + 1),
            identifiers,
        });
        b.push(LedgerRow {
            name: cell(base + 2),
            amount: cell(base + 3),
            identifiers: None,
        });
    }

    log::debug!("detected {layout} layout over {} row(s)", grid.len());

    Ok(LedgerInput {
        a,
        b,
        layout: Some(layout),
    })
}

/// Read delimited text into a grid of raw cells. Rows may be ragged.
pub fn load_csv_rows(data: &str, config: &InputConfig) -> Result<Vec<Vec<RawValue>>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        RawValue::Empty
                    } else {
                        RawValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(grid)
}

/// `load_csv_rows` followed by `split_rows`.
pub fn load_csv(data: &str, config: &InputConfig) -> Result<LedgerInput, ReconError> {
    split_rows(&load_csv_rows(data, config)?)
}
