use thiserror::Error;

/// Failures while assembling the `Config`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `TRADELENS__` environment override could not be read or
    /// deserialized into the expected shape.
    #[error("Failed to read settings from the config file or TRADELENS__ environment: {0}")]
    Load(#[from] config::ConfigError),

    /// The settings parsed but would make a dashboard metric meaningless.
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
