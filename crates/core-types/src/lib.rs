//! # Tradelens Core Types
//!
//! Layer 0 of the workspace: the trade record every other crate works with, the small
//! enums used to describe trades and reporting periods, and the defensive
//! normalization that turns a raw journal entry into a typed record.

pub mod enums;
pub mod error;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use enums::{DateRange, Outcome, TradeType};
pub use error::CoreError;
pub use record::{TradeRecord, coerce_decimal, normalize_all, parse_trade_date};
