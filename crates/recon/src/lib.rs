//! `ledgermatch-recon`: two-ledger transfer reconciliation engine.
//!
//! Pure engine crate: receives pre-parsed rows, returns a partitioned report.
//! No CLI or terminal output. Matching runs in two greedy layers over equal
//! amounts: exact token containment first, then fuzzy name similarity on
//! whatever is left.

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod hints;
pub mod layout;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod pool;
pub mod similarity;

pub use config::MatchConfig;
pub use engine::{run, ReconciliationEngine};
pub use error::{DataError, ReconError, Side};
pub use layout::Layout;
pub use model::{LedgerInput, LedgerRow, RawValue, ReconciliationReport};
