// lmatch - two-ledger transfer reconciliation from the command line

mod exit_codes;
mod inspect;
mod recon;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "lmatch")]
#[command(about = "Reconcile two ledgers of transfers by amount and name")]
#[command(version)]
struct Cli {
    /// Log level filter (error, warn, info, debug, trace, or a directive list)
    #[arg(long, global = true, env = "LMATCH_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the two ledgers laid side by side in a CSV file
    #[command(after_help = "\
Examples:
  lmatch run transfers.csv
  lmatch run transfers.csv --headers
  lmatch run transfers.csv --config strict.match.toml --json
  lmatch run transfers.csv --output report.json
  lmatch run transfers.tsv --delimiter $'\\t'")]
    Run {
        /// CSV with ledger A in the left columns and ledger B in the right
        file: PathBuf,

        /// Match config (.match.toml). Defaults apply when omitted.
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output the JSON report to stdout instead of tables
        #[arg(long)]
        json: bool,

        /// Write the JSON report to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// First row is headers (overrides input.has_headers)
        #[arg(long)]
        headers: bool,

        /// Field delimiter (overrides input.delimiter)
        #[arg(long)]
        delimiter: Option<char>,
    },

    /// Validate a match config without running
    #[command(after_help = "\
Examples:
  lmatch validate strict.match.toml")]
    Validate {
        /// Path to the .match.toml config file
        config: PathBuf,
    },

    /// Show how a name cell is tokenized
    #[command(after_help = "\
Examples:
  lmatch tokens 'Maria Souza USD 98.50'
  lmatch tokens 'Pedro-Alves (ref@123)'")]
    Tokens {
        /// Raw name text
        text: String,
    },

    /// Score two strings with ratio and partial_ratio
    #[command(after_help = "\
Examples:
  lmatch score 'jon smithe transfer' 'j smith'
  lmatch score jhon john")]
    Score {
        s1: String,
        s2: String,
    },
}

fn init_logging(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| CliError::args(format!("invalid --log-level {level:?}: {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(&cli.log_level).and_then(|()| match cli.command {
        Commands::Run {
            file,
            config,
            json,
            output,
            headers,
            delimiter,
        } => recon::cmd_run(recon::RunArgs {
            file,
            config,
            json,
            output,
            headers,
            delimiter,
        }),
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::Tokens { text } => inspect::cmd_tokens(&text),
        Commands::Score { s1, s2 } => inspect::cmd_score(&s1, &s2),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
