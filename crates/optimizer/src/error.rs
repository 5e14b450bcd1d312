use configuration::ValidationErrors;
use indicatif::style::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Base parameters are invalid: {0}")]
    InvalidBase(#[from] ValidationErrors),

    #[error("Parameter generation failed: {0}")]
    ParameterGeneration(String),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<TemplateError> for OptimizerError {
    fn from(error: TemplateError) -> Self {
        OptimizerError::ProgressBarTemplate(error.to_string())
    }
}
