use crate::activity::{allocation_by_category, daily_window, recent_trades};
use crate::behavior::analyze_behavior;
use crate::calendar::{YearMonth, map_to_calendar_days};
use crate::distribution::histogram;
use crate::error::AnalyticsError;
use crate::filter::{FilterCriteria, filter_trades};
use crate::grouping::{
    best_and_worst_days, best_group, by_month, by_strategy, by_symbol, by_time_slot, by_weekday,
    top_by_pnl,
};
use crate::report::DashboardReport;
use crate::summary::summarize;
use crate::trend::{WinRateTrend, equity_curve, exposure_vs_pnl};
use crate::win_loss::classify;
use chrono::NaiveDateTime;
use configuration::DashboardSettings;
use core_types::TradeRecord;

/// A stateless calculator that turns a journal snapshot into a `DashboardReport`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: DashboardSettings,
}

impl AnalyticsEngine {
    pub fn new(settings: DashboardSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// The main entry point for calculating the dashboard.
    ///
    /// # Arguments
    ///
    /// * `records` - Every trade in the journal.
    /// * `criteria` - The filters to apply before aggregating.
    /// * `now` - Local wall-clock time; anchors date ranges, the rolling window and the calendar.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DashboardReport` or an `AnalyticsError`. Trade data alone
    /// never causes an error; only invalid settings do.
    pub fn build_report(
        &self,
        records: &[TradeRecord],
        criteria: &FilterCriteria,
        now: NaiveDateTime,
    ) -> Result<DashboardReport, AnalyticsError> {
        let trades = filter_trades(records, criteria, now);
        let today = now.date();
        let period = YearMonth::of(today);

        let strategies = by_strategy(&trades);
        let best_strategy = best_group(&strategies).cloned();

        let report = DashboardReport {
            criteria: criteria.clone(),
            as_of: now,
            total_in_journal: records.len(),
            total_considered: trades.len(),
            undated_trades: trades.iter().filter(|t| t.trade_date.is_none()).count(),

            summary: summarize(&trades),
            win_loss: classify(&trades),
            behavior: analyze_behavior(&trades, &self.settings),

            monthly: by_month(&trades),
            strategies,
            best_strategy,
            time_slots: by_time_slot(&trades),
            weekdays: by_weekday(&trades),
            day_extremes: best_and_worst_days(&trades),
            top_symbols: top_by_pnl(&by_symbol(&trades), self.settings.top_symbols),

            equity_curve: equity_curve(&trades),
            win_rate_trend: WinRateTrend::new(&trades).collect(),
            distribution: histogram(&trades, self.settings.histogram_bins)?,
            exposure: exposure_vs_pnl(&trades),
            recent_activity: daily_window(&trades, today, self.settings.activity_window_days),
            allocation: allocation_by_category(&trades),
            calendar: map_to_calendar_days(&trades, period.year, period.month)?,
            recent_trades: recent_trades(&trades, self.settings.recent_trades),
        };

        tracing::debug!(
            considered = report.total_considered,
            total = report.total_in_journal,
            undated = report.undated_trades,
            "Built dashboard report."
        );

        Ok(report)
    }
}
