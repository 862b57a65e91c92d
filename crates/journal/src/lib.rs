//! # Tradelens Journal Crate
//!
//! This crate is the read-only adapter between the persisted trade log and the rest
//! of the workspace. The log is the same JSON the browser dashboard keeps under its
//! `trades` storage key.
//!
//! ## Public API
//!
//! - `TradeJournal`: points at a journal file and loads it as normalized `TradeRecord`s.
//! - `JournalError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::JournalError;
pub use repository::TradeJournal;
