use serde::Serialize;

/// Coarse classification of the tightest liquidation distance of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceLevel {
    Safe,
    Warning,
    Danger,
    /// No finite distance was observed.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWarningKind {
    ExtremeDistance,
    HighDistance,
    ExtremeLeverage,
    DangerousCombination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskWarning {
    pub kind: RiskWarningKind,
    pub message: String,
}

/// One point of the chartable series, index 0 being the starting state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub step: usize,
    pub equity: f64,
    /// Price rescaled so it starts at the initial equity, for overlaying on equity.
    pub relative_price: f64,
    pub roi_pct: f64,
}

/// Risk and summary view of a single projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    // I. Headline Metrics
    pub final_equity: f64,
    pub roi_pct: f64,
    pub total_fees: f64,
    /// Total fees as a percentage of the initial capital.
    pub fee_drag_pct: f64,
    pub steps: usize,

    // II. Liquidation Risk
    pub min_distance_pct: f64,
    pub min_liquidation_price: f64,
    pub distance_level: DistanceLevel,
    /// Steps whose liquidation distance is at or below the danger threshold.
    pub at_risk_steps: Vec<usize>,
    pub warnings: Vec<RiskWarning>,

    // III. Path Statistics
    pub max_drawdown_pct: f64,
    pub series: Vec<SeriesPoint>,
}

impl RiskReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_step_at_risk(&self, step: usize) -> bool {
        self.at_risk_steps.binary_search(&step).is_ok()
    }
}
