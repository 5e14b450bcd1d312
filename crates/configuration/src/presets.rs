use crate::error::ConfigError;
use core_types::SimulationParameters;

/// A named starting point for the projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub params: SimulationParameters,
}

const fn template(
    initial_capital: f64,
    leverage: f64,
    step_growth: f64,
    step_count: usize,
) -> SimulationParameters {
    SimulationParameters {
        initial_capital,
        leverage,
        entry_price: 100.0,
        step_growth,
        step_count,
        taker_fee_rate: 0.0006,
        funding_rate_per_step: 0.0,
        maintenance_margin_rate: 0.004,
        close_at_end: true,
    }
}

pub static PRESETS: [Preset; 3] = [
    Preset {
        id: "conservative",
        name: "Conservative",
        description: "Low leverage and wide steps, for cautious capital",
        params: template(1000.0, 3.0, 0.20, 5),
    },
    Preset {
        id: "moderate",
        name: "Moderate",
        description: "Medium leverage and steps, balancing return and risk",
        params: template(500.0, 10.0, 0.10, 8),
    },
    Preset {
        id: "aggressive",
        name: "Aggressive",
        description: "High leverage and tight steps, high risk for high return",
        params: template(100.0, 25.0, 0.05, 15),
    },
];

/// Looks up a preset by identifier, ignoring case.
pub fn find_preset(id: &str) -> Result<&'static Preset, ConfigError> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| ConfigError::UnknownPreset(id.to_string()))
}
