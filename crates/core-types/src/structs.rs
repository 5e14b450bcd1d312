use crate::enums::SweepField;
use serde::{Deserialize, Serialize};

/// The inputs of a single rolling-position projection.
///
/// Rates are fractions (`0.10` is 10%). The engine assumes these values have
/// already been validated; see `configuration::validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Starting equity (E0), in quote currency.
    pub initial_capital: f64,
    /// Leverage applied to the full equity on every re-open.
    pub leverage: f64,
    /// Price at which the first position is opened (P0).
    pub entry_price: f64,
    /// Price growth per step, as a fraction.
    pub step_growth: f64,
    /// Number of close/re-open cycles (K).
    pub step_count: usize,
    /// Taker fee charged on both close and re-open notional.
    pub taker_fee_rate: f64,
    /// Funding charged on opened notional every step.
    pub funding_rate_per_step: f64,
    /// Maintenance margin rate used by the liquidation estimate.
    pub maintenance_margin_rate: f64,
    /// Charge one more taker fee when the last step closes the position.
    pub close_at_end: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_capital: 100.0,
            leverage: 10.0,
            entry_price: 100.0,
            step_growth: 0.10,
            step_count: 10,
            taker_fee_rate: 0.0006,
            funding_rate_per_step: 0.0,
            maintenance_margin_rate: 0.004,
            close_at_end: true,
        }
    }
}

/// One close/re-open cycle of the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// 1-based step index.
    pub step: usize,
    /// Closing price of this step.
    pub price: f64,
    /// Price the position was opened at (the previous step's closing price).
    pub entry_price: f64,
    pub notional: f64,
    pub quantity: f64,
    pub pnl: f64,
    pub close_fee: f64,
    /// Fee paid to re-open on the whole post-close equity.
    pub reopen_fee: f64,
    pub funding_fee: f64,
    /// Non-zero only on the final record when the run closes at the end.
    pub end_close_fee: f64,
    pub liquidation_price: f64,
    pub liquidation_distance_pct: f64,
    pub equity_end: f64,
}

impl StepRecord {
    /// Close, re-open and end-close fees combined (funding excluded).
    pub fn trading_fees(&self) -> f64 {
        self.close_fee + self.reopen_fee + self.end_close_fee
    }

    pub fn total_fees(&self) -> f64 {
        self.trading_fees() + self.funding_fee
    }
}

/// The full trajectory and summary of one projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// `step_count + 1` prices, starting at the entry price.
    pub prices: Vec<f64>,
    pub rows: Vec<StepRecord>,
    /// `step_count + 1` equity values, starting at the initial capital.
    pub equity_series: Vec<f64>,
    pub final_equity: f64,
    /// Return on the initial capital, as a fraction.
    pub roi: f64,
    pub total_fees: f64,
    /// Tightest liquidation distance seen, `+inf` when no finite value was observed.
    pub min_distance_pct: f64,
    /// Liquidation price of the step that produced `min_distance_pct`.
    pub min_liquidation_price: f64,
}

impl SimulationResult {
    pub fn roi_pct(&self) -> f64 {
        self.roi * 100.0
    }

    pub fn has_finite_min_distance(&self) -> bool {
        self.min_distance_pct.is_finite()
    }

    pub fn initial_equity(&self) -> f64 {
        self.equity_series.first().copied().unwrap_or(f64::NAN)
    }
}

/// Summary of one sweep candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Candidate value, in percent when sweeping step growth.
    pub value: f64,
    pub roi_pct: f64,
    pub final_equity: f64,
    pub min_distance_pct: f64,
}

/// Results of a sensitivity sweep, in the order the candidates were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub field: SweepField,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point with the highest finite ROI. Ties keep the earliest candidate.
    pub fn best_by_roi(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .filter(|p| p.roi_pct.is_finite())
            .fold(None, |best: Option<&SweepPoint>, p| match best {
                Some(b) if b.roi_pct >= p.roi_pct => Some(b),
                _ => Some(p),
            })
    }
}
