//! Terminal rendering of analytics results.
//!
//! Every function builds a fresh `comfy_table::Table` from plain report data; nothing is
//! cached between commands.

use analytics::activity::DailyActivity;
use analytics::behavior::BehaviorProfile;
use analytics::distribution::Histogram;
use analytics::format::{money, number, percent, ratio, signed_money};
use analytics::grouping::{DayExtremes, weekday_name};
use analytics::trend::TrendPoint;
use analytics::{CalendarMonth, DashboardReport, DayTone, GroupStats, PerformanceSummary, WinLossBreakdown};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::fmt::Display;

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const HISTOGRAM_WIDTH: usize = 40;

fn table<T: Into<comfy_table::Row>>(header: T) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn tone_color(value: Decimal) -> Option<Color> {
    match DayTone::of(value) {
        DayTone::Gain => Some(Color::Green),
        DayTone::Loss => Some(Color::Red),
        DayTone::Neutral => None,
    }
}

/// A right-aligned pnl cell, coloured by sign.
fn pnl_cell(value: Decimal) -> Cell {
    let cell = Cell::new(signed_money(value)).set_alignment(CellAlignment::Right);
    match tone_color(value) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

fn right(content: impl Display) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

// ==============================================================================
// Headline Metrics
// ==============================================================================

pub fn summary_table(summary: &PerformanceSummary, win_loss: &WinLossBreakdown) -> Table {
    let mut table = table(vec!["Metric", "Value"]);
    table
        .add_row(vec![Cell::new("Total PnL"), pnl_cell(summary.total_pnl)])
        .add_row(vec![Cell::new("Total Trades"), right(summary.total_trades)])
        .add_row(vec![Cell::new("Win Rate"), right(percent(summary.win_rate_pct))])
        .add_row(vec![Cell::new("Avg Trade"), pnl_cell(summary.avg_trade)])
        .add_row(vec![Cell::new("Risk/Reward"), right(ratio(summary.risk_reward_ratio))])
        .add_row(vec![Cell::new("Sharpe-like Ratio"), right(number(summary.sharpe_like_ratio, 2))])
        .add_row(vec![Cell::new("Portfolio Value"), right(money(summary.portfolio_value))])
        .add_row(vec![
            Cell::new("Winning / Losing / Break-even"),
            right(format!(
                "{} ({}) / {} ({}) / {} ({})",
                win_loss.winning,
                percent(win_loss.pct_winning()),
                win_loss.losing,
                percent(win_loss.pct_losing()),
                win_loss.break_even,
                percent(win_loss.pct_break_even()),
            )),
        ])
        .add_row(vec![Cell::new("Avg Win"), pnl_cell(win_loss.avg_win)])
        .add_row(vec![Cell::new("Avg Loss"), pnl_cell(-win_loss.avg_loss)])
        .add_row(vec![Cell::new("Largest Win"), pnl_cell(win_loss.largest_win)])
        .add_row(vec![Cell::new("Largest Loss"), pnl_cell(win_loss.largest_loss)]);
    table
}

pub fn behavior_table(behavior: &BehaviorProfile) -> Table {
    let mut table = table(vec!["Behavior", "Value"]);
    table
        .add_row(vec![Cell::new("Trading Days"), right(behavior.trading_days)])
        .add_row(vec![Cell::new("Avg Trades / Day"), right(number(behavior.avg_trades_per_day, 1))])
        .add_row(vec![
            Cell::new("Most Traded"),
            right(behavior.most_traded_symbol.as_deref().unwrap_or("-")),
        ])
        .add_row(vec![Cell::new("Consistency"), right(percent(behavior.consistency_pct))])
        .add_row(vec![Cell::new("Avg Position"), right(money(behavior.avg_position_size))])
        .add_row(vec![Cell::new("Risk Appetite"), right(behavior.risk_appetite)]);
    table
}

// ==============================================================================
// Breakdowns
// ==============================================================================

/// A grouped-performance table; `label` renders each group's key.
pub fn groups_table<K>(title: &str, groups: &[GroupStats<K>], label: impl Fn(&K) -> String) -> Table {
    let mut table = table(vec![title, "Trades", "PnL", "Win Rate"]);
    for group in groups {
        table.add_row(vec![
            Cell::new(label(&group.key)),
            right(group.trades),
            pnl_cell(group.total_pnl),
            right(percent(group.win_rate_pct())),
        ]);
    }
    table
}

pub fn day_extremes_table(extremes: &DayExtremes) -> Table {
    let mut table = table(vec!["", "Date", "PnL", "Trades"]);
    table
        .add_row(vec![
            Cell::new("Best Day"),
            Cell::new(extremes.best.key),
            pnl_cell(extremes.best.total_pnl),
            right(extremes.best.trades),
        ])
        .add_row(vec![
            Cell::new("Worst Day"),
            Cell::new(extremes.worst.key),
            pnl_cell(extremes.worst.total_pnl),
            right(extremes.worst.trades),
        ]);
    table
}

/// A Sunday-first month grid; each cell shows the day number and its net pnl.
pub fn calendar_table(calendar: &CalendarMonth) -> Table {
    let mut table = table(WEEKDAY_HEADER.to_vec());
    for week in calendar.weeks() {
        let row: Vec<Cell> = week
            .iter()
            .map(|cell| match cell {
                None => Cell::new(""),
                Some(day) if day.tone == DayTone::Neutral => Cell::new(day.day),
                Some(day) => {
                    let cell = Cell::new(format!("{}\n{}", day.day, signed_money(day.value)));
                    match tone_color(day.value) {
                        Some(color) => cell.fg(color),
                        None => cell,
                    }
                }
            })
            .collect();
        table.add_row(row);
    }
    table
}

pub fn calendar_footer(calendar: &CalendarMonth) -> String {
    format!(
        "{} {}: {} profitable, {} losing, {} trading days",
        calendar.period.name(),
        calendar.period.year,
        calendar.profitable_days(),
        calendar.loss_days(),
        calendar.trading_days(),
    )
}

// ==============================================================================
// Series
// ==============================================================================

pub fn histogram_table(histogram: &Histogram) -> Table {
    let peak = histogram.buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let mut table = table(vec!["Range", "Trades", ""]);
    for bucket in &histogram.buckets {
        let width = if peak == 0 { 0 } else { bucket.count * HISTOGRAM_WIDTH / peak };
        table.add_row(vec![
            Cell::new(&bucket.label),
            right(bucket.count),
            Cell::new("█".repeat(width)),
        ]);
    }
    table
}

pub fn trend_table(points: &[TrendPoint]) -> Table {
    let mut table = table(vec!["#", "Trade", "Win Rate"]);
    for point in points {
        table.add_row(vec![
            right(point.position),
            Cell::new(&point.label),
            right(percent(point.win_rate_pct)),
        ]);
    }
    table
}

pub fn activity_table(activity: &[DailyActivity]) -> Table {
    let mut table = table(vec!["Day", "Trades", "PnL", "Cumulative"]);
    for day in activity {
        table.add_row(vec![
            Cell::new(day.date),
            right(day.trades),
            pnl_cell(day.pnl),
            pnl_cell(day.cumulative_pnl),
        ]);
    }
    table
}

pub fn trades_table(trades: &[TradeRecord]) -> Table {
    let mut table = table(vec!["Date", "Symbol", "Type", "Qty", "Entry", "Exit", "PnL"]);
    for trade in trades {
        table.add_row(vec![
            Cell::new(trade.trade_date.map_or_else(|| "-".to_string(), |d| d.to_string())),
            Cell::new(&trade.symbol),
            Cell::new(trade.trade_type.map_or("-", |t| t.as_str())),
            right(trade.quantity.normalize()),
            right(money(trade.entry_price)),
            right(money(trade.exit_price)),
            pnl_cell(trade.pnl),
        ]);
    }
    table
}

pub fn symbols_table(symbols: &[String]) -> Table {
    let mut table = table(vec!["Symbol"]);
    for symbol in symbols {
        table.add_row(vec![symbol]);
    }
    table
}

// ==============================================================================
// Full Report
// ==============================================================================

/// Prints every section of the dashboard to stdout.
pub fn print_report(report: &DashboardReport) {
    println!(
        "Dashboard as of {} (range: {}, type: {}, symbol: {})",
        report.as_of.format("%Y-%m-%d %H:%M"),
        report.criteria.date_range,
        report.criteria.trade_type,
        report.criteria.symbol,
    );
    println!(
        "{} of {} trades considered, {} without a usable date",
        report.total_considered, report.total_in_journal, report.undated_trades
    );

    println!("\n== Performance ==\n{}", summary_table(&report.summary, &report.win_loss));
    println!("\n== Behavior ==\n{}", behavior_table(&report.behavior));

    println!("\n== Monthly ==\n{}", groups_table("Month", &report.monthly, |m| m.to_string()));
    println!("\n== Strategies ==\n{}", groups_table("Strategy", &report.strategies, Clone::clone));
    if let Some(best) = &report.best_strategy {
        println!("Best strategy: {} ({})", best.key, signed_money(best.total_pnl));
    }
    println!("\n== Time of Day ==\n{}", groups_table("Slot", &report.time_slots, |s| s.label().to_string()));
    println!(
        "\n== Weekdays ==\n{}",
        groups_table("Weekday", &report.weekdays, |d| weekday_name(*d).to_string())
    );
    if let Some(extremes) = &report.day_extremes {
        println!("\n== Best / Worst Day ==\n{}", day_extremes_table(extremes));
    }
    println!("\n== Top Symbols ==\n{}", groups_table("Symbol", &report.top_symbols, Clone::clone));

    if let Some(last) = report.equity_curve.last() {
        println!("\nEquity curve: {} points, ending at {}", report.equity_curve.len(), signed_money(last.cumulative_pnl));
    }
    println!("\n== PnL Distribution ==\n{}", histogram_table(&report.distribution));
    println!("\n== Recent Activity ==\n{}", activity_table(&report.recent_activity));

    let mut allocation = table(vec!["Category", "Net Value"]);
    for slice in &report.allocation {
        allocation.add_row(vec![Cell::new(&slice.category), right(money(slice.value))]);
    }
    println!("\n== Allocation ==\n{allocation}");

    println!("\n== Calendar ==\n{}\n{}", calendar_table(&report.calendar), calendar_footer(&report.calendar));
    println!("\n== Recent Trades ==\n{}", trades_table(&report.recent_trades));
}
