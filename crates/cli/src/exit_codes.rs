//! CLI Exit Code Registry
//!
//! Single source of truth for `lmatch` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success (run: every record matched, no rejected rows) |
//! | 1    | Run completed, but unmatched records or rejected rows |
//! | 2    | CLI usage error (bad args)                            |
//! | 3    | Input sheet has an unsupported column layout          |
//! | 4    | Input file could not be read or parsed                |
//! | 5    | Invalid match config                                  |
//! | 6    | Internal invariant violation (engine bug)             |

use ledgermatch_recon::ReconError;

/// Success - command completed, ledgers fully reconciled.
pub const EXIT_SUCCESS: u8 = 0;

/// Like `diff(1)`: 1 means "ledgers differ".
pub const EXIT_UNMATCHED: u8 = 1;

/// Usage error - bad arguments.
pub const EXIT_USAGE: u8 = 2;

/// Column count is not 4, 5 or 6.
pub const EXIT_SCHEMA: u8 = 3;

/// Cannot read the input file or parse it as CSV.
pub const EXIT_INPUT: u8 = 4;

/// Config TOML failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;

/// A record was consumed twice. Never expected; report it.
pub const EXIT_INTERNAL: u8 = 6;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG,
        ReconError::Schema { .. } => EXIT_SCHEMA,
        ReconError::Io(_) => EXIT_INPUT,
        ReconError::InvariantViolation { .. } => EXIT_INTERNAL,
    }
}
