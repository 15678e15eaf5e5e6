//! Settings read from the environment (and `.env`), overridable per command.

use anyhow::{Context, Result, bail};
use clmm_positions_engine::prelude::SlippageTolerance;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Path of the JSON ledger snapshot.
pub const SNAPSHOT_PATH_VAR: &str = "CLMM_SNAPSHOT_PATH";
/// Tolerance used when a command does not pass `--slippage`.
pub const DEFAULT_SLIPPAGE_VAR: &str = "CLMM_DEFAULT_SLIPPAGE";
/// `table` or `json`.
pub const OUTPUT_VAR: &str = "CLMM_OUTPUT";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format '{other}', expected 'table' or 'json'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub snapshot_path: Option<PathBuf>,
    pub default_slippage: SlippageTolerance,
    pub output: OutputFormat,
}

impl CliConfig {
    /// 1%
    pub fn default_slippage() -> Decimal {
        Decimal::new(1, 2)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot_path = lookup(SNAPSHOT_PATH_VAR).map(PathBuf::from);

        let slippage = match lookup(DEFAULT_SLIPPAGE_VAR) {
            Some(raw) => Decimal::from_str(raw.trim())
                .with_context(|| format!("{DEFAULT_SLIPPAGE_VAR} is not a decimal: '{raw}'"))?,
            None => Self::default_slippage(),
        };
        let default_slippage = SlippageTolerance::new(slippage)
            .with_context(|| format!("{DEFAULT_SLIPPAGE_VAR} is out of range"))?;

        let output = match lookup(OUTPUT_VAR) {
            Some(raw) => raw.parse().with_context(|| format!("invalid {OUTPUT_VAR}"))?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            snapshot_path,
            default_slippage,
            output,
        })
    }
}
