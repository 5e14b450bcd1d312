use crate::sensitivity::SensitivityConfig;
use core_types::SimulationParameters;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The base projection parameters used when no CLI override is given.
    pub simulation: SimulationParameters,
    pub sensitivity: SensitivityConfig,
    pub risk: RiskThresholds,
    pub logging: Logging,
}

/// Thresholds that drive the risk classification and warnings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Minimum liquidation distance (%) at or below which a run is flagged as danger.
    pub danger_distance_pct: f64,
    /// Distance (%) at or below which a run is flagged with a plain warning level.
    pub warning_distance_pct: f64,
    /// Distance (%) at or below which a high-risk warning message is raised.
    pub high_risk_distance_pct: f64,
    /// Leverage at or above which the extreme-leverage warning is raised.
    pub extreme_leverage: f64,
    /// High leverage combined with a small step growth is flagged as dangerous.
    pub combo_leverage: f64,
    pub combo_max_step_growth: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            danger_distance_pct: 5.0,
            warning_distance_pct: 15.0,
            high_risk_distance_pct: 10.0,
            extreme_leverage: 50.0,
            combo_leverage: 20.0,
            combo_max_step_growth: 0.05,
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "rolling-perp.log".to_string(),
        }
    }
}
