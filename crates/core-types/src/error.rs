use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown sweep field '{0}' (expected 'leverage' or 'step_growth')")]
    UnknownSweepField(String),
}
