use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod args;
pub mod error;
pub mod logging;
pub mod presets;
pub mod sensitivity;
pub mod settings;
pub mod state;
pub mod validation;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use args::ParameterArgs;
pub use logging::init_tracing;
pub use presets::{PRESETS, Preset, find_preset};
pub use sensitivity::{ParameterRange, SensitivityConfig};
pub use settings::{Config, Logging, RiskThresholds};
pub use state::{decode_state, decode_state_onto, encode_state};
pub use validation::{ParameterViolation, ValidationErrors, validate};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `ROLLING_PERP__SIMULATION__LEVERAGE=5`.
pub const ENV_PREFIX: &str = "ROLLING_PERP";

/// Loads the application configuration.
///
/// Reads `path` (or `config.toml` in the working directory), then layers
/// `ROLLING_PERP__*` environment variables on top. The default file may be
/// absent; an explicitly given path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (file, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let builder = config::Config::builder()
        .add_source(config::File::from(file).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
