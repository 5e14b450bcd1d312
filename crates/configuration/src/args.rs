use crate::error::ConfigError;
use crate::presets::find_preset;
use crate::state::decode_state_onto;
use clap::Args;
use core_types::SimulationParameters;

/// Command-line overrides for the projection parameters.
///
/// Layers apply in order: configuration file, `--preset`, `--state`, then the
/// individual flags.
#[derive(Debug, Clone, Default, Args)]
pub struct ParameterArgs {
    /// Start from a preset template (conservative, moderate, aggressive).
    #[arg(long)]
    pub preset: Option<String>,

    /// Start from a shared state string or link (e.g. "leverage=5&steps=8").
    #[arg(long)]
    pub state: Option<String>,

    /// Initial capital (E0).
    #[arg(long)]
    pub initial_capital: Option<f64>,

    /// Leverage multiplier, at least 1.
    #[arg(long, short = 'l')]
    pub leverage: Option<f64>,

    /// Entry price (P0).
    #[arg(long)]
    pub entry_price: Option<f64>,

    /// Price growth per step, in percent (10 means 10%).
    #[arg(long)]
    pub step_pct: Option<f64>,

    /// Number of steps.
    #[arg(long, short = 'k')]
    pub steps: Option<usize>,

    /// Taker fee rate (0.0006 means 0.06%).
    #[arg(long)]
    pub taker_fee: Option<f64>,

    /// Funding rate charged on notional every step.
    #[arg(long)]
    pub funding_per_step: Option<f64>,

    /// Maintenance margin rate.
    #[arg(long)]
    pub mmr: Option<f64>,

    /// Charge a closing fee after the last step (true/false).
    #[arg(long)]
    pub close_at_end: Option<bool>,
}

impl ParameterArgs {
    /// Applies every given override on top of `base`.
    pub fn resolve(&self, base: &SimulationParameters) -> Result<SimulationParameters, ConfigError> {
        let mut params = match &self.preset {
            Some(id) => find_preset(id)?.params.clone(),
            None => base.clone(),
        };

        if let Some(state) = &self.state {
            params = decode_state_onto(state, &params);
        }

        if let Some(v) = self.initial_capital {
            params.initial_capital = v;
        }
        if let Some(v) = self.leverage {
            params.leverage = v;
        }
        if let Some(v) = self.entry_price {
            params.entry_price = v;
        }
        if let Some(v) = self.step_pct {
            params.step_growth = v / 100.0;
        }
        if let Some(v) = self.steps {
            params.step_count = v;
        }
        if let Some(v) = self.taker_fee {
            params.taker_fee_rate = v;
        }
        if let Some(v) = self.funding_per_step {
            params.funding_rate_per_step = v;
        }
        if let Some(v) = self.mmr {
            params.maintenance_margin_rate = v;
        }
        if let Some(v) = self.close_at_end {
            params.close_at_end = v;
        }

        Ok(params)
    }
}
