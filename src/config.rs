//! Settings for the `lag-csv` tool.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::args::parse_count;
use crate::error::ArgumentError;
use crate::projection::Projection;

/// Output encoding for lagged rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            _ => Err(ArgumentError::Malformed {
                param: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// Lag tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagConfig {
    /// Lookback distance (default: 1)
    pub offset: usize,
    /// Header of the numeric column to lag; the first column when unset
    pub column: Option<String>,
    /// Lagged value for the first `offset` rows; empty when unset
    pub default: Option<f64>,
    /// Reduction applied to each pair (default: pair)
    pub projection: Projection,
    /// Output encoding (default: csv)
    pub format: OutputFormat,
}

impl Default for LagConfig {
    fn default() -> Self {
        LagConfig {
            offset: 1,
            column: None,
            default: None,
            projection: Projection::default(),
            format: OutputFormat::default(),
        }
    }
}

impl LagConfig {
    pub fn new(offset: usize) -> Self {
        LagConfig {
            offset,
            ..Self::default()
        }
    }

    /// Reads `LAG_OFFSET`, `LAG_COLUMN`, `LAG_DEFAULT`, `LAG_PROJECTION` and
    /// `LAG_FORMAT`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ArgumentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LagConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ArgumentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LagConfig::default();

        if let Some(offset) = lookup("LAG_OFFSET") {
            config.offset = parse_count("offset", &offset, 1)?;
        }
        config.column = lookup("LAG_COLUMN").filter(|column| !column.is_empty());
        if let Some(default) = lookup("LAG_DEFAULT") {
            let value = default.trim().parse::<f64>().map_err(|_| ArgumentError::Malformed {
                param: "default",
                value: default.clone(),
            })?;
            config.default = Some(value);
        }
        if let Some(projection) = lookup("LAG_PROJECTION") {
            config.projection = projection.parse()?;
        }
        if let Some(format) = lookup("LAG_FORMAT") {
            config.format = format.parse()?;
        }

        Ok(config)
    }
}
