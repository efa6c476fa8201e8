//! `lmatch tokens` and `lmatch score`: look at what the matcher sees.

use ledgermatch_recon::normalize::tokenize_str;
use ledgermatch_recon::similarity::{partial_ratio, ratio};

use crate::CliError;

pub fn cmd_tokens(text: &str) -> Result<(), CliError> {
    for token in tokenize_str(text) {
        println!("{token}");
    }
    Ok(())
}

pub fn cmd_score(s1: &str, s2: &str) -> Result<(), CliError> {
    println!("ratio          {:>3}", ratio(s1, s2));
    println!("partial_ratio  {:>3}", partial_ratio(s1, s2));
    Ok(())
}
