use core_types::SweepField;
use serde::Deserialize;

/// Candidate ranges for the sensitivity sweep, one per sweepable field.
/// This is deserialized from the `[sensitivity]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    pub leverage: ParameterRange,
    /// Step growth candidates, as fractions (`0.05` is 5%).
    pub step_growth: ParameterRange,
}

impl SensitivityConfig {
    pub fn range_for(&self, field: SweepField) -> &ParameterRange {
        match field {
            SweepField::Leverage => &self.leverage,
            SweepField::StepGrowth => &self.step_growth,
        }
    }
}

// --- Default Implementations ---
// This allows a user to omit the `[sensitivity]` section from their toml
// and still sweep the standard grids.

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            leverage: ParameterRange::Discrete(vec![
                1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 50.0,
            ]),
            step_growth: ParameterRange::Discrete(vec![0.02, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30]),
        }
    }
}

/// Represents the candidate values for a single swept parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterRange {
    Discrete(Vec<f64>),
    Linear { start: f64, end: f64, step: f64 },
}
