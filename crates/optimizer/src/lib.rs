use crate::error::OptimizerError;
use crate::generator::candidates_for;
use crate::sweep::sweep_point;
use configuration::{SensitivityConfig, validate};
use core_types::{SimulationParameters, SweepField, SweepResult};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use rayon::prelude::*;

pub mod error;
pub mod generator;
pub mod sweep;

pub use sweep::{par_sweep, sweep};

/// Drives a sensitivity sweep with validation, logging and an optional progress bar.
pub struct SweepRunner {
    base: SimulationParameters,
    field: SweepField,
    candidates: Vec<f64>,
    parallel: bool,
    show_progress: bool,
}

impl SweepRunner {
    pub fn new(base: SimulationParameters, field: SweepField, candidates: Vec<f64>) -> Self {
        Self {
            base,
            field,
            candidates,
            parallel: false,
            show_progress: false,
        }
    }

    /// Builds a runner over the candidates configured for `field`.
    pub fn from_config(
        base: SimulationParameters,
        field: SweepField,
        config: &SensitivityConfig,
    ) -> Result<Self, OptimizerError> {
        let candidates = candidates_for(config, field)?;
        Ok(Self::new(base, field, candidates))
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }

    /// Validates the base parameters, then sweeps every candidate.
    ///
    /// Candidates themselves are not validated; out-of-range values simply
    /// produce whatever the engine yields for them.
    pub fn run(&self) -> Result<SweepResult, OptimizerError> {
        validate(&self.base)?;

        let total_runs = self.candidates.len();
        tracing::info!(
            field = %self.field,
            candidates = total_runs,
            parallel = self.parallel,
            threads = rayon::current_num_threads(),
            "Starting sensitivity sweep"
        );

        let progress_bar = if self.show_progress {
            let pb = ProgressBar::new(total_runs as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                    .progress_chars("=>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let (base, field) = (&self.base, self.field);
        let points: Vec<_> = if self.parallel {
            self.candidates
                .par_iter()
                .progress_with(progress_bar.clone())
                .map(|&value| sweep_point(base, field, value))
                .collect()
        } else {
            self.candidates
                .iter()
                .progress_with(progress_bar.clone())
                .map(|&value| sweep_point(base, field, value))
                .collect()
        };
        progress_bar.finish_and_clear();

        let result = SweepResult { field, points };
        match result.best_by_roi() {
            Some(best) => tracing::info!(
                field = %field,
                best_value = best.value,
                best_roi_pct = best.roi_pct,
                "Sensitivity sweep complete"
            ),
            None => tracing::warn!(field = %field, "Sensitivity sweep produced no finite ROI"),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_rejects_invalid_base() {
        let base = SimulationParameters {
            initial_capital: -1.0,
            ..SimulationParameters::default()
        };
        let runner = SweepRunner::new(base, SweepField::Leverage, vec![1.0]);
        assert!(matches!(runner.run(), Err(OptimizerError::InvalidBase(_))));
    }

    #[test]
    fn runner_uses_configured_candidates() {
        let runner = SweepRunner::from_config(
            SimulationParameters::default(),
            SweepField::StepGrowth,
            &SensitivityConfig::default(),
        )
        .unwrap();
        assert_eq!(runner.candidates().len(), 7);
        assert_eq!(runner.run().unwrap().len(), 7);
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let candidates = generator::default_candidates(SweepField::Leverage);
        let base = SimulationParameters::default();
        let seq = SweepRunner::new(base.clone(), SweepField::Leverage, candidates.clone())
            .run()
            .unwrap();
        let par = SweepRunner::new(base, SweepField::Leverage, candidates)
            .parallel(true)
            .run()
            .unwrap();
        assert_eq!(seq, par);
    }
}
