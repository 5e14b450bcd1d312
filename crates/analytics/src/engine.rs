use crate::report::{DistanceLevel, RiskReport, RiskWarning, RiskWarningKind, SeriesPoint};
use configuration::RiskThresholds;
use core_types::{SimulationParameters, SimulationResult};

/// A stateless calculator that turns a projection into a risk report.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    thresholds: RiskThresholds,
}

impl AnalyticsEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// The main entry point for building the report.
    ///
    /// # Arguments
    ///
    /// * `params` - The parameters the projection was run with.
    /// * `result` - The projection output.
    pub fn calculate(&self, params: &SimulationParameters, result: &SimulationResult) -> RiskReport {
        let initial = params.initial_capital;
        let distance_level = self.classify_distance(result.min_distance_pct);
        let warnings = self.collect_warnings(params, result);

        let at_risk_steps = result
            .rows
            .iter()
            .filter(|r| {
                r.liquidation_distance_pct.is_finite()
                    && r.liquidation_distance_pct <= self.thresholds.danger_distance_pct
            })
            .map(|r| r.step)
            .collect();

        for warning in &warnings {
            tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        }

        RiskReport {
            final_equity: result.final_equity,
            roi_pct: result.roi_pct(),
            total_fees: result.total_fees,
            fee_drag_pct: result.total_fees / initial * 100.0,
            steps: result.rows.len(),
            min_distance_pct: result.min_distance_pct,
            min_liquidation_price: result.min_liquidation_price,
            distance_level,
            at_risk_steps,
            warnings,
            max_drawdown_pct: max_drawdown_pct(&result.equity_series),
            series: chart_series(result),
        }
    }

    pub fn classify_distance(&self, min_distance_pct: f64) -> DistanceLevel {
        if !min_distance_pct.is_finite() {
            DistanceLevel::Unknown
        } else if min_distance_pct <= self.thresholds.danger_distance_pct {
            DistanceLevel::Danger
        } else if min_distance_pct <= self.thresholds.warning_distance_pct {
            DistanceLevel::Warning
        } else {
            DistanceLevel::Safe
        }
    }

    fn collect_warnings(&self, params: &SimulationParameters, result: &SimulationResult) -> Vec<RiskWarning> {
        let t = &self.thresholds;
        let mut warnings = Vec::new();

        let min = result.min_distance_pct;
        if min.is_finite() {
            if min <= t.danger_distance_pct {
                warnings.push(RiskWarning {
                    kind: RiskWarningKind::ExtremeDistance,
                    message: format!(
                        "Extreme risk: minimum liquidation distance is only {min:.1}%, consider lower leverage or a wider step"
                    ),
                });
            } else if min <= t.high_risk_distance_pct {
                warnings.push(RiskWarning {
                    kind: RiskWarningKind::HighDistance,
                    message: format!("High risk: minimum liquidation distance is {min:.1}%, proceed with caution"),
                });
            }
        }

        if params.leverage >= t.extreme_leverage {
            warnings.push(RiskWarning {
                kind: RiskWarningKind::ExtremeLeverage,
                message: format!(
                    "Extreme leverage: at {}x a small adverse move can liquidate the position",
                    params.leverage
                ),
            });
        }

        if params.leverage >= t.combo_leverage && params.step_growth <= t.combo_max_step_growth {
            warnings.push(RiskWarning {
                kind: RiskWarningKind::DangerousCombination,
                message: format!(
                    "Dangerous combination: high leverage ({}x) with a small step ({:.1}%) is easily liquidated",
                    params.leverage,
                    params.step_growth * 100.0
                ),
            });
        }

        warnings
    }
}

/// Equity, rescaled price and ROI per index, starting from the initial state.
pub fn chart_series(result: &SimulationResult) -> Vec<SeriesPoint> {
    let initial_equity = result.initial_equity();
    let initial_price = result.prices.first().copied().unwrap_or(f64::NAN);

    result
        .equity_series
        .iter()
        .zip(&result.prices)
        .enumerate()
        .map(|(step, (&equity, &price))| SeriesPoint {
            step,
            equity,
            relative_price: price / initial_price * initial_equity,
            roi_pct: (equity - initial_equity) / initial_equity * 100.0,
        })
        .collect()
}

/// Largest peak-to-trough equity decline, as a percentage of the peak.
pub fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    let Some(&first) = equity_curve.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown_pct = 0.0;
    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let drawdown_pct = (peak - equity) / peak * 100.0;
            if drawdown_pct > max_drawdown_pct {
                max_drawdown_pct = drawdown_pct;
            }
        }
    }
    max_drawdown_pct
}
