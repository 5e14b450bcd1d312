use crate::error::OptimizerError;
use configuration::{ParameterRange, SensitivityConfig};
use core_types::SweepField;

/// Upper bound on the number of candidates a linear range may expand to.
pub const MAX_CANDIDATES: usize = 10_000;

/// Converts a configured range into its concrete, ordered candidate list.
///
/// Linear ranges are generated index-wise (`start + i * step`) so the last
/// value does not drift, and include `end` when it lies on the grid.
pub fn expand_range(range: &ParameterRange) -> Result<Vec<f64>, OptimizerError> {
    match range {
        ParameterRange::Discrete(values) => {
            if values.is_empty() {
                return Err(OptimizerError::ParameterGeneration(
                    "Discrete candidate list is empty.".to_string(),
                ));
            }
            Ok(values.clone())
        }
        ParameterRange::Linear { start, end, step } => {
            let (start, end, step) = (*start, *end, *step);
            if !(start.is_finite() && end.is_finite() && step.is_finite()) {
                return Err(OptimizerError::ParameterGeneration(
                    "Range bounds and step must be finite.".to_string(),
                ));
            }
            if step <= 0.0 {
                return Err(OptimizerError::ParameterGeneration(format!(
                    "Step must be positive, got {step}."
                )));
            }
            if end < start {
                return Err(OptimizerError::ParameterGeneration(format!(
                    "Range end {end} is below start {start}."
                )));
            }

            let intervals = ((end - start) / step + 1e-9).floor();
            if intervals >= MAX_CANDIDATES as f64 {
                return Err(OptimizerError::ParameterGeneration(format!(
                    "Range expands to more than {MAX_CANDIDATES} candidates."
                )));
            }

            let count = intervals as usize + 1;
            Ok((0..count).map(|i| start + i as f64 * step).collect())
        }
    }
}

/// The configured candidates for `field`.
pub fn candidates_for(
    config: &SensitivityConfig,
    field: SweepField,
) -> Result<Vec<f64>, OptimizerError> {
    expand_range(config.range_for(field))
}

/// The standard candidate grid for `field`.
pub fn default_candidates(field: SweepField) -> Vec<f64> {
    candidates_for(&SensitivityConfig::default(), field).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grids() {
        assert_eq!(
            default_candidates(SweepField::Leverage),
            vec![1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 50.0]
        );
        assert_eq!(
            default_candidates(SweepField::StepGrowth),
            vec![0.02, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30]
        );
    }

    #[test]
    fn linear_range_includes_end_on_grid() {
        let values = expand_range(&ParameterRange::Linear {
            start: 0.01,
            end: 0.05,
            step: 0.01,
        })
        .unwrap();
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 0.01);
        assert!((values[4] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn linear_range_stops_before_off_grid_end() {
        let values = expand_range(&ParameterRange::Linear {
            start: 1.0,
            end: 10.0,
            step: 4.0,
        })
        .unwrap();
        assert_eq!(values, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn rejects_bad_ranges() {
        let bad = [
            ParameterRange::Discrete(vec![]),
            ParameterRange::Linear { start: 1.0, end: 2.0, step: 0.0 },
            ParameterRange::Linear { start: 1.0, end: 2.0, step: -1.0 },
            ParameterRange::Linear { start: 3.0, end: 2.0, step: 1.0 },
            ParameterRange::Linear { start: 0.0, end: f64::INFINITY, step: 1.0 },
            ParameterRange::Linear { start: 0.0, end: 1.0, step: 1e-9 },
        ];
        for range in &bad {
            assert!(
                matches!(expand_range(range), Err(OptimizerError::ParameterGeneration(_))),
                "{range:?} should be rejected"
            );
        }
    }
}
