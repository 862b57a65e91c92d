use core_types::DateRange;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub journal: JournalSettings,
    pub dashboard: DashboardSettings,
    pub filters: FilterDefaults,
    pub logging: LoggingSettings,
}

/// Where the trade log lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Path to the JSON array of logged trades.
    pub path: PathBuf,
}

/// Tunables for the derived metrics shown on the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of buckets in the pnl distribution histogram.
    pub histogram_bins: usize,
    /// How many symbols the "top symbols" list keeps.
    pub top_symbols: usize,
    /// Length of the recent trades list in the full report.
    pub recent_trades: usize,
    /// Length of the short recent activity feed.
    pub recent_activity: usize,
    /// Number of calendar days (ending today) in the rolling activity window.
    pub activity_window_days: u32,
    /// Days used as the denominator of the trading consistency metric.
    pub consistency_window_days: u32,
    /// Mean position size above which risk appetite is "Medium".
    pub risk_medium_threshold: Decimal,
    /// Mean position size above which risk appetite is "High".
    pub risk_high_threshold: Decimal,
}

/// The filter applied when the command line does not override it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub date_range: DateRange,
    /// `"all"`, `"buy"` or `"sell"`.
    pub trade_type: String,
    /// `"all"` or an exact symbol.
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trades.json"),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
            top_symbols: 8,
            recent_trades: 10,
            recent_activity: 5,
            activity_window_days: 7,
            consistency_window_days: 30,
            risk_medium_threshold: Decimal::from(5_000),
            risk_high_threshold: Decimal::from(10_000),
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            date_range: DateRange::All,
            trade_type: "all".to_string(),
            symbol: "all".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
