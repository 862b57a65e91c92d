//! # Tradelens Analytics
//!
//! This crate turns a journal of logged trades into the metrics a trading dashboard
//! shows: summary cards, win/loss breakdowns, grouped performance, a PnL calendar,
//! a distribution histogram and a handful of series for charts.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where trades
//!   are stored or how results are displayed. It depends only on `core-types` and the
//!   `[dashboard]` settings from `configuration`.
//! - **Stateless Calculation:** Every function takes a read-only slice of
//!   `TradeRecord`s and returns plain data. Filter criteria and the current time are
//!   explicit parameters, so the same input always gives the same output.
//! - **Total Functions:** Malformed or empty trade data produces zeroed or "not
//!   applicable" results, never an error.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: runs the whole pipeline and returns a `DashboardReport`.
//! - `filter`, `summary`, `win_loss`, `grouping`, `calendar`, `distribution`, `trend`,
//!   `activity`, `behavior`: the individual aggregations.
//! - `format`: display strings for derived metrics.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod activity;
pub mod behavior;
pub mod calendar;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod grouping;
pub mod report;
pub mod summary;
pub mod trend;
pub mod win_loss;

// Re-export the key components to create a clean, public-facing API.
pub use calendar::{CalendarDay, CalendarMonth, DayTone, YearMonth, map_to_calendar_days};
pub use distribution::{Bucket, Histogram, histogram};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{FilterCriteria, SymbolFilter, TypeFilter, filter_trades};
pub use grouping::{GroupStats, TimeSlot};
pub use report::DashboardReport;
pub use summary::{PerformanceSummary, summarize};
pub use trend::WinRateTrend;
pub use win_loss::{WinLossBreakdown, classify};
