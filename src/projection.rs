//! Numeric projections of a (current, lagged) pair.
//!
//! The return calculations keep the guard rails of a price series: invalid
//! inputs (non-positive or NaN) produce `0.0` instead of propagating NaN.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArgumentError;

/// `ln(current / lagged)`, or `0.0` unless both sides are strictly positive.
fn log_ratio(current: f64, lagged: f64) -> f64 {
    // NaN fails both comparisons, so it lands in the zero branch too.
    if !(current > 0.0 && lagged > 0.0) {
        return 0.0;
    }
    let ratio = (current / lagged).ln();
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

fn relative_change(current: f64, lagged: f64) -> f64 {
    if lagged == 0.0 || lagged.is_nan() || current.is_nan() {
        return 0.0;
    }
    current / lagged - 1.0
}

/// How a lagged pair is reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Emit the pair as is
    #[default]
    Pair,
    /// `current - lagged`
    Difference,
    /// `ln(current / lagged)`
    LogReturn,
    /// `current / lagged - 1`
    ArithReturn,
}

impl Projection {
    pub fn name(&self) -> &'static str {
        match self {
            Projection::Pair => "pair",
            Projection::Difference => "difference",
            Projection::LogReturn => "log_return",
            Projection::ArithReturn => "arith_return",
        }
    }

    /// Reduces a pair. Returns `None` for [`Projection::Pair`] and while no
    /// lagged value exists.
    pub fn apply(&self, current: f64, lagged: Option<f64>) -> Option<f64> {
        let lagged = lagged?;
        match self {
            Projection::Pair => None,
            Projection::Difference => Some(current - lagged),
            Projection::LogReturn => Some(log_ratio(current, lagged)),
            Projection::ArithReturn => Some(relative_change(current, lagged)),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projection {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pair" => Ok(Projection::Pair),
            "difference" | "diff" => Ok(Projection::Difference),
            "log_return" => Ok(Projection::LogReturn),
            "arith_return" => Ok(Projection::ArithReturn),
            _ => Err(ArgumentError::Malformed {
                param: "projection",
                value: s.to_string(),
            }),
        }
    }
}
