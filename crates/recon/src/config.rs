use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Matching parameters. `MatchConfig::default()` is the calibrated
/// two-layer policy; a TOML file may override any part of it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exact: ExactConfig,
    #[serde(default)]
    pub fuzzy: FuzzyConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

// ---------------------------------------------------------------------------
// Layer 1
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExactConfig {
    /// How many leading A tokens are searched.
    #[serde(default = "default_prefix_tokens")]
    pub prefix_tokens: usize,
    /// B tokens shorter than this (in chars) are not required to appear.
    #[serde(default = "default_exact_min_len")]
    pub min_token_len: usize,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            prefix_tokens: default_prefix_tokens(),
            min_token_len: default_exact_min_len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layer 2
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuzzyConfig {
    #[serde(default = "default_prefix_tokens")]
    pub prefix_tokens: usize,
    /// Both tokens of a per-token comparison must be at least this long.
    #[serde(default = "default_fuzzy_min_len")]
    pub min_token_len: usize,
    #[serde(default = "default_threshold")]
    pub token_threshold: u8,
    #[serde(default = "default_threshold")]
    pub fallback_threshold: u8,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            prefix_tokens: default_prefix_tokens(),
            min_token_len: default_fuzzy_min_len(),
            token_threshold: default_threshold(),
            fallback_threshold: default_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Input + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default)]
    pub has_headers: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: default_delimiter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub amount_mismatch_hints: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            amount_mismatch_hints: true,
        }
    }
}

fn default_prefix_tokens() -> usize {
    3
}

fn default_exact_min_len() -> usize {
    3
}

fn default_fuzzy_min_len() -> usize {
    2
}

fn default_threshold() -> u8 {
    80
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.exact.prefix_tokens == 0 {
            return Err(ReconError::ConfigValidation(
                "exact.prefix_tokens must be at least 1".into(),
            ));
        }
        if self.fuzzy.prefix_tokens == 0 {
            return Err(ReconError::ConfigValidation(
                "fuzzy.prefix_tokens must be at least 1".into(),
            ));
        }

        for (key, value) in [
            ("fuzzy.token_threshold", self.fuzzy.token_threshold),
            ("fuzzy.fallback_threshold", self.fuzzy.fallback_threshold),
        ] {
            if value > 100 {
                return Err(ReconError::ConfigValidation(format!(
                    "{key} must be between 0 and 100, got {value}"
                )));
            }
        }

        if !self.input.delimiter.is_ascii() {
            return Err(ReconError::ConfigValidation(format!(
                "input.delimiter must be a single ASCII character, got '{}'",
                self.input.delimiter
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
