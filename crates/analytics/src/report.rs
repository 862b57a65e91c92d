use crate::activity::{CategoryAllocation, DailyActivity};
use crate::behavior::BehaviorProfile;
use crate::calendar::{CalendarMonth, YearMonth};
use crate::distribution::Histogram;
use crate::filter::FilterCriteria;
use crate::grouping::{DayExtremes, GroupStats, TimeSlot};
use crate::summary::PerformanceSummary;
use crate::trend::{EquityPoint, ExposurePoint, TrendPoint};
use crate::win_loss::WinLossBreakdown;
use chrono::{NaiveDateTime, Weekday};
use core_types::TradeRecord;
use serde::Serialize;

/// Everything the dashboard shows, derived from one filtered snapshot of the journal.
///
/// This struct is the final output of the `AnalyticsEngine` and the only thing a
/// renderer needs; it carries no references back into the journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    // I. Scope
    pub criteria: FilterCriteria,
    pub as_of: NaiveDateTime,
    pub total_in_journal: usize,
    pub total_considered: usize,
    /// Trades counted in totals but missing from every date-keyed breakdown.
    pub undated_trades: usize,

    // II. Headline metrics
    pub summary: PerformanceSummary,
    pub win_loss: WinLossBreakdown,
    pub behavior: BehaviorProfile,

    // III. Breakdowns
    pub monthly: Vec<GroupStats<YearMonth>>,
    pub strategies: Vec<GroupStats<String>>,
    pub best_strategy: Option<GroupStats<String>>,
    pub time_slots: Vec<GroupStats<TimeSlot>>,
    pub weekdays: Vec<GroupStats<Weekday>>,
    pub day_extremes: Option<DayExtremes>,
    pub top_symbols: Vec<GroupStats<String>>,

    // IV. Series
    pub equity_curve: Vec<EquityPoint>,
    pub win_rate_trend: Vec<TrendPoint>,
    pub distribution: Histogram,
    pub exposure: Vec<ExposurePoint>,
    pub recent_activity: Vec<DailyActivity>,
    pub allocation: Vec<CategoryAllocation>,
    pub calendar: CalendarMonth,
    pub recent_trades: Vec<TradeRecord>,
}
