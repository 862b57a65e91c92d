//! End-to-end scenarios: raw journal JSON in, dashboard numbers out.

use analytics::calendar::DayTone;
use analytics::{
    AnalyticsEngine, FilterCriteria, classify, format, histogram, map_to_calendar_days, summarize,
};
use chrono::NaiveDate;
use core_types::{TradeRecord, normalize_all};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn journal(value: Value) -> Vec<TradeRecord> {
    let entries = value.as_array().cloned().unwrap_or_default();
    normalize_all(&entries)
}

fn three_trades() -> Vec<TradeRecord> {
    journal(json!([
        { "symbol": "BTCUSDT", "tradeType": "buy", "pnl": 100, "tradeDate": "2024-03-01" },
        { "symbol": "BTCUSDT", "tradeType": "sell", "pnl": "-40", "tradeDate": "2024-03-01" },
        { "symbol": "ETHUSDT", "tradeType": "buy", "pnl": "25.00", "tradeDate": "2024-03-02" }
    ]))
}

#[test]
fn three_trade_journal() {
    let trades = three_trades();

    let summary = summarize(&trades);
    assert_eq!(summary.total_pnl, dec!(85));
    assert_eq!(format::percent(summary.win_rate_pct), "66.7%");
    assert_eq!(format::money(summary.total_pnl), "$85.00");

    let march = map_to_calendar_days(&trades, 2024, 3).expect("valid period");
    let first = march.day(1).expect("day 1");
    assert_eq!(first.value, dec!(60));
    assert_eq!(first.tone, DayTone::Gain);
    assert_eq!(march.day(2).map(|d| d.value), Some(dec!(25)));
    assert_eq!(march.day(3).map(|d| d.tone), Some(DayTone::Neutral));
}

#[test]
fn empty_journal() {
    let trades = journal(json!([]));

    let summary = summarize(&trades);
    assert_eq!(summary.total_pnl, Decimal::ZERO);
    assert_eq!(summary.win_rate_pct, Decimal::ZERO);
    assert_eq!(format::ratio(summary.risk_reward_ratio), "N/A");
    assert_eq!(summary.sharpe_like_ratio, Decimal::ZERO);

    let hist = histogram(&trades, 10).expect("valid bin count");
    assert_eq!(hist.counts(), vec![0; 10]);
}

#[test]
fn identical_pnl_values() {
    let trades = journal(json!([
        { "pnl": 50, "tradeDate": "2024-03-01" },
        { "pnl": "50", "tradeDate": "2024-03-02" },
        { "pnl": 50.0, "tradeDate": "2024-03-03" }
    ]));

    let hist = histogram(&trades, 10).expect("valid bin count");
    assert_eq!(hist.counts()[0], 3);
    assert_eq!(hist.total(), 3);
    assert_eq!(summarize(&trades).sharpe_like_ratio, Decimal::ZERO);
}

#[test]
fn malformed_entries_are_coerced_not_rejected() {
    let trades = journal(json!([
        { "symbol": "BTCUSDT", "pnl": "oops", "tradeDate": "2024-03-01" },
        { "symbol": "ETHUSDT", "pnl": 12, "tradeDate": "not-a-date" },
        "not even an object",
        { "symbol": "ADAUSDT", "pnl": -3 }
    ]));

    assert_eq!(trades.len(), 3);
    let breakdown = classify(&trades);
    assert_eq!((breakdown.winning, breakdown.losing, breakdown.break_even), (1, 1, 1));

    // The undated gain counts in the total but not on the calendar.
    assert_eq!(summarize(&trades).total_pnl, dec!(9));
    let march = map_to_calendar_days(&trades, 2024, 3).expect("valid period");
    assert_eq!(march.days.iter().map(|d| d.value).sum::<Decimal>(), Decimal::ZERO);
}

#[test]
fn full_report_round_trips_to_json() {
    let now = NaiveDate::from_ymd_opt(2024, 3, 20)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid timestamp");
    let report = AnalyticsEngine::default()
        .build_report(&three_trades(), &FilterCriteria::all(), now)
        .expect("report builds");

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["criteria"]["date_range"], "all");
    assert_eq!(value["criteria"]["trade_type"], "all");
    assert_eq!(value["summary"]["total_trades"], 3);
    assert_eq!(value["time_slots"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["calendar"]["days"][0]["tone"], "gain");
}

#[test]
fn huge_pnl_spread_degrades_instead_of_overflowing() {
    let trades = journal(json!([
        { "symbol": "BTCUSDT", "pnl": 1e15, "tradeDate": "2024-03-01" },
        { "symbol": "BTCUSDT", "pnl": -1e15, "tradeDate": "2024-03-01" }
    ]));

    // The squared deviation (1e30) is past Decimal::MAX.
    let summary = summarize(&trades);
    assert_eq!(summary.total_pnl, Decimal::ZERO);
    assert_eq!(summary.sharpe_like_ratio, Decimal::ZERO);

    let extremes = journal(json!([{ "pnl": "7e28" }, { "pnl": "-7e28" }]));
    let hist = histogram(&extremes, 10).expect("valid bin count");
    assert_eq!(hist.counts()[0], 2);
    assert_eq!(hist.total(), 2);
}

#[test]
fn extreme_values_still_build_a_report() {
    let trades = journal(json!([
        { "symbol": "BTCUSDT", "quantity": 1e15, "entryPrice": 1e15, "pnl": "7e28", "tradeDate": "2024-03-01" },
        { "symbol": "BTCUSDT", "quantity": 1e15, "entryPrice": 1e15, "pnl": "7e28", "tradeDate": "2024-03-01", "investment": "7e28" },
        { "symbol": "ETHUSDT", "pnl": "-7e28", "tradeDate": "2024-03-02" }
    ]));
    let now = NaiveDate::from_ymd_opt(2024, 3, 2)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid timestamp");

    let report = AnalyticsEngine::default()
        .build_report(&trades, &FilterCriteria::all(), now)
        .expect("report builds");

    // Sums saturate at the Decimal bounds; an unrepresentable exposure is zero.
    assert_eq!(report.calendar.day(1).map(|d| d.value), Some(Decimal::MAX));
    assert!(report.summary.total_pnl > Decimal::ZERO);
    assert_eq!(report.exposure[0].exposure, Decimal::ZERO);
    assert_eq!(report.behavior.avg_position_size, Decimal::ZERO);
    assert_eq!(report.distribution.total(), 3);
    assert_eq!(report.equity_curve.len(), 3);
}
