use std::collections::BTreeMap;

use crate::error::{DataError, ReconError, Side};
use crate::model::{Amount, LedgerRow, MatchState, Record};
use crate::normalize::{normalize_amount, tokenize};

/// One ledger's records plus per-record consumption flags.
///
/// Records are indexed by amount; each index bucket keeps original order,
/// so candidate lookup is order-preserving without a full scan.
#[derive(Debug)]
pub struct LedgerPool {
    side: Side,
    records: Vec<Record>,
    consumed: Vec<bool>,
    by_amount: BTreeMap<Amount, Vec<usize>>,
}

impl LedgerPool {
    /// Build a pool from raw rows.
    ///
    /// Rows with neither name nor amount are dropped before ids are assigned.
    /// Rows whose amount is missing or non-numeric are returned as
    /// `DataError`s and get no id.
    pub fn from_rows(side: Side, rows: &[LedgerRow]) -> (Self, Vec<DataError>) {
        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();
        let mut by_amount: BTreeMap<Amount, Vec<usize>> = BTreeMap::new();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.name.is_absent() && row.amount.is_absent() {
                continue;
            }

            let amount = match normalize_amount(&row.amount) {
                Ok(amount) => amount,
                Err(kind) => {
                    let err = DataError {
                        side,
                        row: row_idx,
                        value: row.amount.to_display(),
                        kind,
                    };
                    log::warn!("skipping row: {err}");
                    rejected.push(err);
                    continue;
                }
            };

            let id = records.len();
            by_amount.entry(amount).or_default().push(id);
            records.push(Record {
                id,
                row: row_idx,
                raw_name: row.name.clone(),
                tokens: tokenize(&row.name),
                amount,
                state: MatchState::Unmatched,
                identifiers: row.identifiers.clone(),
            });
        }

        let consumed = vec![false; records.len()];
        (
            Self {
                side,
                records,
                consumed,
                by_amount,
            },
            rejected,
        )
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_consumed(&self, id: usize) -> bool {
        self.consumed.get(id).copied().unwrap_or(false)
    }

    /// Not-yet-consumed records with exactly this amount, in original order.
    pub fn candidates(&self, amount: Amount) -> impl Iterator<Item = &Record> + '_ {
        self.by_amount
            .get(&amount)
            .into_iter()
            .flatten()
            .filter(|&&id| !self.consumed[id])
            .map(|&id| &self.records[id])
    }

    /// Not-yet-consumed records, in original order.
    pub fn unconsumed(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(|r| !self.consumed[r.id])
    }

    /// Mark a record matched. Consuming twice (or an unknown id) is an
    /// engine bug and fails the run.
    pub fn consume(&mut self, id: usize, state: MatchState) -> Result<(), ReconError> {
        let violation = ReconError::InvariantViolation { side: self.side, id };
        if state == MatchState::Unmatched {
            return Err(violation);
        }
        match self.consumed.get_mut(id) {
            Some(flag) if !*flag => {
                *flag = true;
                self.records[id].state = state;
                Ok(())
            }
            _ => Err(violation),
        }
    }
}
