use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to read trade journal {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trade journal {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Trade journal {0} must be an array of trades or an object with a `trades` key")]
    UnexpectedShape(PathBuf),
}
