use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DashboardSettings, FilterDefaults, JournalSettings, LoggingSettings};

/// Prefix for environment overrides, e.g. `TRADELENS__DASHBOARD__TOP_SYMBOLS=5`.
pub const ENV_PREFIX: &str = "TRADELENS";

/// Loads the application configuration from a TOML file, layered with environment overrides.
///
/// The file is optional: when it does not exist every section falls back to its defaults.
/// The result is validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects settings that would make a metric meaningless.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let dashboard = &config.dashboard;

    if dashboard.histogram_bins == 0 {
        return Err(ConfigError::Invalid {
            key: "dashboard.histogram_bins",
            reason: "must be at least 1".to_string(),
        });
    }
    if dashboard.consistency_window_days == 0 {
        return Err(ConfigError::Invalid {
            key: "dashboard.consistency_window_days",
            reason: "must be at least 1".to_string(),
        });
    }
    if dashboard.risk_medium_threshold > dashboard.risk_high_threshold {
        return Err(ConfigError::Invalid {
            key: "dashboard.risk_medium_threshold",
            reason: format!(
                "{} exceeds dashboard.risk_high_threshold ({})",
                dashboard.risk_medium_threshold, dashboard.risk_high_threshold
            ),
        });
    }

    Ok(())
}
