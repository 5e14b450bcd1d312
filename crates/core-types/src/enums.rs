use crate::error::CoreError;
use crate::structs::SimulationParameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The parameter a sensitivity sweep varies while holding the rest fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepField {
    Leverage,
    StepGrowth,
}

impl SweepField {
    /// Returns a copy of `base` with this field replaced by `value`.
    pub fn apply(&self, base: &SimulationParameters, value: f64) -> SimulationParameters {
        let mut params = base.clone();
        match self {
            SweepField::Leverage => params.leverage = value,
            SweepField::StepGrowth => params.step_growth = value,
        }
        params
    }

    /// Converts a raw candidate into the unit it is reported in.
    /// Step growth is a fraction internally but reported as a percentage.
    pub fn display_value(&self, value: f64) -> f64 {
        match self {
            SweepField::Leverage => value,
            SweepField::StepGrowth => value * 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SweepField::Leverage => "Leverage (x)",
            SweepField::StepGrowth => "Step growth (%)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepField::Leverage => "leverage",
            SweepField::StepGrowth => "step_growth",
        }
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leverage" => Ok(SweepField::Leverage),
            "step_growth" | "step-growth" | "stepgrowth" | "steppct" => Ok(SweepField::StepGrowth),
            other => Err(CoreError::UnknownSweepField(other.to_string())),
        }
    }
}
