//! `lmatch run` and `lmatch validate`.

use std::path::{Path, PathBuf};

use ledgermatch_recon::layout::load_csv;
use ledgermatch_recon::{MatchConfig, ReconError};

use crate::exit_codes::{recon_exit_code, EXIT_CONFIG, EXIT_INPUT, EXIT_INTERNAL, EXIT_UNMATCHED};
use crate::table;
use crate::CliError;

pub struct RunArgs {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub headers: bool,
    pub delimiter: Option<char>,
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError::new(code, msg)
}

fn from_recon(err: ReconError) -> CliError {
    let hint = match &err {
        ReconError::Schema { .. } => {
            Some("expected 4 (name, amount per side), 5 or 6 non-empty columns")
        }
        ReconError::InvariantViolation { .. } => Some("this is a bug; please report it with the input file"),
        _ => None,
    };
    let out = recon_err(recon_exit_code(&err), err.to_string());
    match hint {
        Some(h) => out.with_hint(h),
        None => out,
    }
}

fn load_config(path: &Path) -> Result<MatchConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        recon_err(EXIT_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    MatchConfig::from_toml(&text).map_err(from_recon)
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };

    if args.headers {
        config.input.has_headers = true;
    }
    if let Some(d) = args.delimiter {
        config.input.delimiter = d;
    }
    config.validate().map_err(from_recon)?;

    let data = std::fs::read_to_string(&args.file).map_err(|e| {
        recon_err(EXIT_INPUT, format!("cannot read {}: {e}", args.file.display()))
    })?;

    let input = load_csv(&data, &config.input).map_err(from_recon)?;
    log::info!(
        "loaded {} A row(s) and {} B row(s) from {}",
        input.a.len(),
        input.b.len(),
        args.file.display()
    );

    let report = ledgermatch_recon::run(&config, &input).map_err(from_recon)?;

    if args.json || args.output.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| recon_err(EXIT_INTERNAL, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str).map_err(|e| {
                recon_err(EXIT_INPUT, format!("cannot write output {}: {e}", path.display()))
            })?;
            eprintln!("wrote {}", path.display());
        }

        if args.json {
            println!("{json_str}");
        }
    }

    if !args.json {
        table::print_report(&report);
    }

    // Human summary to stderr
    eprintln!("{}", table::summary_line(&report));

    if report.summary.is_reconciled() {
        Ok(())
    } else {
        Err(recon_err(EXIT_UNMATCHED, "unmatched records remain"))
    }
}

pub fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&path)?;
    match &config.name {
        Some(name) => eprintln!("{}: valid ({name})", path.display()),
        None => eprintln!("{}: valid", path.display()),
    }
    Ok(())
}
