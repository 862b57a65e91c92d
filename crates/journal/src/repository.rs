use crate::JournalError;
use core_types::{TradeRecord, normalize_all};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key under which the browser dashboard stores its trade log.
pub const STORAGE_KEY: &str = "trades";

/// The `TradeJournal` provides read access to a persisted trade log.
///
/// Two layouts are accepted: a bare JSON array of trade objects, or a storage dump
/// object whose `trades` entry holds that array, either directly or as a JSON string.
#[derive(Debug, Clone)]
pub struct TradeJournal {
    path: PathBuf,
}

impl TradeJournal {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and normalizes every trade in the journal.
    ///
    /// A journal file that does not exist yet is an empty journal.
    pub fn load(&self) -> Result<Vec<TradeRecord>, JournalError> {
        let entries = self.load_raw()?;
        let trades = normalize_all(&entries);
        tracing::info!(
            path = %self.path.display(),
            trades = trades.len(),
            skipped = entries.len() - trades.len(),
            "Loaded trade journal."
        );
        Ok(trades)
    }

    /// Loads the raw journal entries without normalizing them.
    pub fn load_raw(&self) -> Result<Vec<Value>, JournalError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Trade journal not found, treating it as empty.");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(JournalError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: Value = serde_json::from_str(&text).map_err(|source| self.parse_error(source))?;
        self.entries(document)
    }

    fn entries(&self, document: Value) -> Result<Vec<Value>, JournalError> {
        match document {
            Value::Array(entries) => Ok(entries),
            Value::Null => Ok(Vec::new()),
            Value::Object(mut map) => match map.remove(STORAGE_KEY) {
                Some(Value::Array(entries)) => Ok(entries),
                Some(Value::Null) => Ok(Vec::new()),
                // Storage values are strings, so a dump holds the log JSON-encoded twice.
                Some(Value::String(inner)) => {
                    let nested: Value =
                        serde_json::from_str(&inner).map_err(|source| self.parse_error(source))?;
                    match nested {
                        Value::Array(entries) => Ok(entries),
                        Value::Null => Ok(Vec::new()),
                        _ => Err(JournalError::UnexpectedShape(self.path.clone())),
                    }
                }
                _ => Err(JournalError::UnexpectedShape(self.path.clone())),
            },
            _ => Err(JournalError::UnexpectedShape(self.path.clone())),
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> JournalError {
        JournalError::Parse {
            path: self.path.clone(),
            source,
        }
    }
}
