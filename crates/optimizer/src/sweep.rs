use core_types::{SimulationParameters, SweepField, SweepPoint, SweepResult};
use rayon::prelude::*;
use simulator::simulate;

/// Runs the projection for one candidate and keeps its summary.
pub fn sweep_point(base: &SimulationParameters, field: SweepField, value: f64) -> SweepPoint {
    let out = simulate(&field.apply(base, value));
    SweepPoint {
        value: field.display_value(value),
        roi_pct: out.roi_pct(),
        final_equity: out.final_equity,
        min_distance_pct: out.min_distance_pct,
    }
}

/// Re-runs the projection once per candidate, replacing `field` in `base`.
///
/// Points come back in candidate order, without sorting or de-duplication.
/// Candidates that drive the engine into non-finite territory are kept as-is.
pub fn sweep(base: &SimulationParameters, field: SweepField, candidates: &[f64]) -> SweepResult {
    let points = candidates
        .iter()
        .map(|&value| sweep_point(base, field, value))
        .collect();
    SweepResult { field, points }
}

/// Same contract as [`sweep`], spread across the rayon thread pool.
pub fn par_sweep(base: &SimulationParameters, field: SweepField, candidates: &[f64]) -> SweepResult {
    let points = candidates
        .par_iter()
        .map(|&value| sweep_point(base, field, value))
        .collect();
    SweepResult { field, points }
}
