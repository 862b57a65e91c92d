use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use core_types::{CoreError, DateRange, TradeRecord, TradeType};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// The sentinel that disables a type or symbol filter.
pub const ALL: &str = "all";

/// Restricts trades to one direction, or lets everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(TradeType),
}

/// Restricts trades to one exact symbol, or lets everything through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SymbolFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        if text.trim().eq_ignore_ascii_case(ALL) {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(text.parse()?))
        }
    }

    pub fn matches(&self, record: &TradeRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => record.trade_type == Some(*wanted),
        }
    }
}

impl SymbolFilter {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text == ALL {
            SymbolFilter::All
        } else {
            SymbolFilter::Only(text.to_string())
        }
    }

    pub fn matches(&self, record: &TradeRecord) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Only(wanted) => record.symbol == *wanted,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL),
            TypeFilter::Only(t) => write!(f, "{t}"),
        }
    }
}

impl fmt::Display for SymbolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolFilter::All => f.write_str(ALL),
            SymbolFilter::Only(s) => f.write_str(s),
        }
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

impl From<SymbolFilter> for String {
    fn from(filter: SymbolFilter) -> Self {
        filter.to_string()
    }
}

/// The full set of dashboard filters, applied as date range AND type AND symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub trade_type: TypeFilter,
    pub symbol: SymbolFilter,
}

impl FilterCriteria {
    /// Criteria that let every record through.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds criteria from their textual form, where `"all"` disables a filter.
    pub fn parse(date_range: DateRange, trade_type: &str, symbol: &str) -> Result<Self, CoreError> {
        Ok(Self {
            date_range,
            trade_type: TypeFilter::parse(trade_type)?,
            symbol: SymbolFilter::parse(symbol),
        })
    }

    pub fn matches(&self, record: &TradeRecord, now: NaiveDateTime) -> bool {
        matches_date_range(self.date_range, record, now)
            && self.trade_type.matches(record)
            && self.symbol.matches(record)
    }
}

/// The closed `[start, end]` window a date range covers at `now`, or `None` for `All`.
///
/// A trade is placed at midnight of its trade date when compared against the window.
pub fn date_window(range: DateRange, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let today = now.date();
    let window = match range {
        DateRange::All => return None,
        DateRange::Today => {
            let start = midnight(today);
            (start, start)
        }
        DateRange::Week => (now - Duration::days(7), now),
        DateRange::Month => (midnight(today.with_day(1)?), now),
        DateRange::Quarter => {
            // Three whole months back from the first of the current month.
            let months = today.year() * 12 + today.month0() as i32 - 3;
            let first = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)?;
            (midnight(first), now)
        }
        DateRange::Year => (midnight(NaiveDate::from_ymd_opt(today.year(), 1, 1)?), now),
    };
    Some(window)
}

fn matches_date_range(range: DateRange, record: &TradeRecord, now: NaiveDateTime) -> bool {
    let Some((start, end)) = date_window(range, now) else {
        return true;
    };
    match record.trade_date {
        Some(date) => {
            let at = midnight(date);
            at >= start && at <= end
        }
        // An undated trade cannot be shown to fall inside any window.
        None => false,
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns the records matching `criteria`, in their original order.
pub fn filter_trades(
    records: &[TradeRecord],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Vec<TradeRecord> {
    let filtered: Vec<TradeRecord> = records
        .iter()
        .filter(|r| criteria.matches(r, now))
        .cloned()
        .collect();

    tracing::debug!(
        kept = filtered.len(),
        total = records.len(),
        range = %criteria.date_range,
        trade_type = %criteria.trade_type,
        symbol = %criteria.symbol,
        "Filtered trades."
    );
    filtered
}

/// Every non-empty symbol in the journal, in first-seen order.
pub fn distinct_symbols(records: &[TradeRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for record in records {
        if !record.symbol.is_empty() && seen.insert(record.symbol.as_str()) {
            symbols.push(record.symbol.clone());
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid test timestamp")
    }

    fn trade(symbol: &str, kind: TradeType, date: Option<(i32, u32, u32)>) -> TradeRecord {
        TradeRecord {
            symbol: symbol.to_string(),
            trade_type: Some(kind),
            trade_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            pnl: dec!(1),
            ..Default::default()
        }
    }

    fn dates(records: &[TradeRecord]) -> Vec<Option<NaiveDate>> {
        records.iter().map(|r| r.trade_date).collect()
    }

    #[test]
    fn all_criteria_pass_everything_including_undated() {
        let records = vec![
            trade("BTC", TradeType::Buy, None),
            trade("ETH", TradeType::Sell, Some((2020, 1, 1))),
        ];
        let out = filter_trades(&records, &FilterCriteria::all(), at(2024, 3, 15, 12));
        assert_eq!(out, records);
    }

    #[test]
    fn today_is_only_the_current_calendar_day() {
        let now = at(2024, 3, 15, 12);
        let records = vec![
            trade("A", TradeType::Buy, Some((2024, 3, 14))),
            trade("B", TradeType::Buy, Some((2024, 3, 15))),
            trade("C", TradeType::Buy, Some((2024, 3, 16))),
            trade("D", TradeType::Buy, None),
        ];
        let criteria = FilterCriteria { date_range: DateRange::Today, ..Default::default() };
        let out = filter_trades(&records, &criteria, now);
        assert_eq!(dates(&out), vec![NaiveDate::from_ymd_opt(2024, 3, 15)]);
    }

    #[test]
    fn week_is_a_rolling_seven_day_window() {
        let now = at(2024, 3, 15, 10);
        let records = vec![
            trade("A", TradeType::Buy, Some((2024, 3, 8))),
            trade("B", TradeType::Buy, Some((2024, 3, 9))),
            trade("C", TradeType::Buy, Some((2024, 3, 15))),
        ];
        let criteria = FilterCriteria { date_range: DateRange::Week, ..Default::default() };
        let out = filter_trades(&records, &criteria, now);
        // March 8th midnight is before now - 7 days (March 8th 10:00).
        assert_eq!(
            dates(&out),
            vec![NaiveDate::from_ymd_opt(2024, 3, 9), NaiveDate::from_ymd_opt(2024, 3, 15)]
        );
    }

    #[test]
    fn quarter_wraps_into_the_previous_year() {
        let now = at(2024, 2, 10, 9);
        let (start, end) = date_window(DateRange::Quarter, now).expect("bounded range");
        assert_eq!(start, at(2023, 11, 1, 0));
        assert_eq!(end, now);
    }

    #[test]
    fn month_and_year_start_on_their_first_day() {
        let now = at(2024, 7, 20, 18);
        assert_eq!(date_window(DateRange::Month, now).map(|w| w.0), Some(at(2024, 7, 1, 0)));
        assert_eq!(date_window(DateRange::Year, now).map(|w| w.0), Some(at(2024, 1, 1, 0)));
        assert_eq!(date_window(DateRange::All, now), None);
    }

    #[test]
    fn future_dates_fall_outside_bounded_ranges() {
        let now = at(2024, 7, 20, 18);
        let records = vec![trade("A", TradeType::Buy, Some((2024, 7, 21)))];
        let criteria = FilterCriteria { date_range: DateRange::Month, ..Default::default() };
        assert!(filter_trades(&records, &criteria, now).is_empty());
    }

    #[test]
    fn type_and_symbol_filters_compose() {
        let now = at(2024, 3, 15, 12);
        let records = vec![
            trade("BTC", TradeType::Buy, Some((2024, 3, 1))),
            trade("BTC", TradeType::Sell, Some((2024, 3, 2))),
            trade("ETH", TradeType::Sell, Some((2024, 3, 3))),
        ];
        let criteria = FilterCriteria::parse(DateRange::All, "sell", "BTC").expect("valid criteria");
        let out = filter_trades(&records, &criteria, now);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].trade_date, NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn untyped_records_only_pass_the_all_type_filter() {
        let now = at(2024, 3, 15, 12);
        let mut untyped = trade("BTC", TradeType::Buy, None);
        untyped.trade_type = None;
        let criteria = FilterCriteria::parse(DateRange::All, "buy", "all").expect("valid criteria");
        assert!(!criteria.matches(&untyped, now));
        assert!(FilterCriteria::all().matches(&untyped, now));
    }

    #[test]
    fn all_is_a_sentinel_not_a_symbol() {
        assert_eq!(SymbolFilter::parse("all"), SymbolFilter::All);
        assert_eq!(TypeFilter::parse("ALL"), Ok(TypeFilter::All));
        assert!(TypeFilter::parse("hold").is_err());
    }

    #[test]
    fn distinct_symbols_keep_first_seen_order() {
        let records = vec![
            trade("ETH", TradeType::Buy, None),
            trade("", TradeType::Buy, None),
            trade("BTC", TradeType::Buy, None),
            trade("ETH", TradeType::Sell, None),
        ];
        assert_eq!(distinct_symbols(&records), vec!["ETH".to_string(), "BTC".to_string()]);
    }
}
