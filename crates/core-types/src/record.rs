use crate::enums::{Outcome, TradeType};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A single logged trade, normalized from the loosely-typed journal entry.
///
/// Every numeric field is guaranteed to hold a real number: anything missing or
/// unparsable in the source becomes zero. A `trade_date` of `None` means the source
/// date could not be parsed; such records still count towards totals but are left
/// out of any date-keyed bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: Option<String>,
    pub symbol: String,
    pub trade_type: Option<TradeType>,
    pub category: Option<String>,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub investment: Decimal,
    pub pnl: Decimal,
    pub trade_date: Option<NaiveDate>,
    /// The date exactly as it appeared in the journal, kept for labels.
    pub trade_date_raw: Option<String>,
    pub entry_time: Option<String>,
    pub strategy: Option<String>,
    pub broker: Option<String>,
    pub notes: Option<String>,
}

impl TradeRecord {
    /// Builds a record from one raw journal object.
    ///
    /// This never fails: each field is coerced on its own, so one bad value cannot
    /// take the rest of the record down with it.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let trade_date_raw = string_field(raw, "tradeDate");
        let trade_date = trade_date_raw.as_deref().and_then(parse_trade_date);

        let quantity = coerce_decimal(raw.get("quantity"));

        Self {
            id: string_field(raw, "id"),
            symbol: string_field(raw, "symbol").unwrap_or_default(),
            trade_type: string_field(raw, "tradeType").and_then(|t| t.parse().ok()),
            category: string_field(raw, "category"),
            quantity: quantity.max(Decimal::ZERO),
            entry_price: coerce_decimal(raw.get("entryPrice")),
            exit_price: coerce_decimal(raw.get("exitPrice")),
            investment: coerce_decimal(raw.get("investment")),
            pnl: coerce_decimal(raw.get("pnl")),
            trade_date,
            trade_date_raw,
            // Imported records carry the time under `tradeTime`.
            entry_time: string_field(raw, "entryTime").or_else(|| string_field(raw, "tradeTime")),
            strategy: string_field(raw, "strategy"),
            broker: string_field(raw, "broker"),
            notes: string_field(raw, "notes"),
        }
    }

    /// The notional size of the position at entry, or zero when the product is out of
    /// `Decimal` range.
    pub fn exposure(&self) -> Decimal {
        self.quantity.checked_mul(self.entry_price).unwrap_or_default()
    }

    /// Capital committed plus the realised result, saturating at the `Decimal` bounds.
    pub fn net_value(&self) -> Decimal {
        self.investment.saturating_add(self.pnl)
    }

    pub fn outcome(&self) -> Outcome {
        if self.pnl > Decimal::ZERO {
            Outcome::Win
        } else if self.pnl < Decimal::ZERO {
            Outcome::Loss
        } else {
            Outcome::BreakEven
        }
    }

    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }
}

/// Normalizes a whole journal. Entries that are not JSON objects are skipped.
pub fn normalize_all(values: &[Value]) -> Vec<TradeRecord> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match value.as_object() {
            Some(raw) => Some(TradeRecord::from_raw(raw)),
            None => {
                tracing::warn!(index, "Skipping journal entry that is not an object.");
                None
            }
        })
        .collect()
}

/// Parses a journal date. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps; only the calendar date is kept.
pub fn parse_trade_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|ts| ts.date())
}

/// Coerces an arbitrary JSON value to a decimal, falling back to zero.
///
/// Strings are read up to the first character that cannot belong to a number, so
/// `"12.5 USDT"` yields `12.5` and `"n/a"` yields zero.
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_number_text(&n.to_string()).unwrap_or_default(),
        Some(Value::String(s)) => parse_leading_number(s).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

fn parse_number_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_leading_number(text: &str) -> Option<Decimal> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only taken when it is complete.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let number = text[..end].trim_end_matches('.');
    let number = number.strip_prefix('+').unwrap_or(number);
    let number = if let Some(rest) = number.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = number.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        number.to_string()
    };
    parse_number_text(&number)
}

fn string_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(value: Value) -> TradeRecord {
        TradeRecord::from_raw(value.as_object().expect("test input is an object"))
    }

    #[test]
    fn well_formed_entry_is_normalized() {
        let trade = record(json!({
            "id": 1712,
            "symbol": "BTCUSDT",
            "tradeType": "buy",
            "category": "crypto",
            "quantity": "0.5",
            "entryPrice": 42000,
            "exitPrice": "43000.5",
            "investment": 21000,
            "pnl": "500.25",
            "tradeDate": "2024-03-01",
            "entryTime": "09:45",
            "strategy": "Breakout"
        }));

        assert_eq!(trade.id.as_deref(), Some("1712"));
        assert_eq!(trade.symbol, "BTCUSDT");
        assert_eq!(trade.trade_type, Some(TradeType::Buy));
        assert_eq!(trade.quantity, dec!(0.5));
        assert_eq!(trade.exit_price, dec!(43000.5));
        assert_eq!(trade.pnl, dec!(500.25));
        assert_eq!(trade.trade_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(trade.entry_time.as_deref(), Some("09:45"));
        assert_eq!(trade.exposure(), dec!(21000));
        assert_eq!(trade.net_value(), dec!(21500.25));
    }

    #[test]
    fn out_of_range_products_do_not_overflow() {
        let trade = TradeRecord {
            quantity: Decimal::from(1_000_000_000_000_000_i64),
            entry_price: Decimal::from(1_000_000_000_000_000_i64),
            investment: Decimal::MAX,
            pnl: dec!(1),
            ..Default::default()
        };
        assert_eq!(trade.exposure(), Decimal::ZERO);
        assert_eq!(trade.net_value(), Decimal::MAX);
    }

    #[test]
    fn malformed_numbers_become_zero() {
        let trade = record(json!({
            "pnl": "not a number",
            "quantity": null,
            "entryPrice": true,
            "investment": {"amount": 3}
        }));

        assert_eq!(trade.pnl, Decimal::ZERO);
        assert_eq!(trade.quantity, Decimal::ZERO);
        assert_eq!(trade.entry_price, Decimal::ZERO);
        assert_eq!(trade.investment, Decimal::ZERO);
        assert_eq!(trade.exit_price, Decimal::ZERO);
    }

    #[test]
    fn numeric_prefix_is_kept() {
        assert_eq!(coerce_decimal(Some(&json!("12.5 USDT"))), dec!(12.5));
        assert_eq!(coerce_decimal(Some(&json!("  -40"))), dec!(-40));
        assert_eq!(coerce_decimal(Some(&json!("+7."))), dec!(7));
        assert_eq!(coerce_decimal(Some(&json!(".25"))), dec!(0.25));
        assert_eq!(coerce_decimal(Some(&json!("1e3"))), dec!(1000));
        assert_eq!(coerce_decimal(Some(&json!("2e"))), dec!(2));
        assert_eq!(coerce_decimal(Some(&json!("-"))), Decimal::ZERO);
        assert_eq!(coerce_decimal(Some(&json!("."))), Decimal::ZERO);
    }

    #[test]
    fn negative_quantity_is_clamped() {
        let trade = record(json!({ "quantity": -3 }));
        assert_eq!(trade.quantity, Decimal::ZERO);
    }

    #[test]
    fn unparsable_date_is_retained_raw_only() {
        let trade = record(json!({ "tradeDate": "last tuesday", "pnl": 10 }));
        assert_eq!(trade.trade_date, None);
        assert_eq!(trade.trade_date_raw.as_deref(), Some("last tuesday"));
        assert_eq!(trade.pnl, dec!(10));
    }

    #[test]
    fn timestamp_dates_keep_the_calendar_day() {
        assert_eq!(
            parse_trade_date("2024-03-02T15:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(
            parse_trade_date("2024-03-02T15:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(parse_trade_date("2024-02-30"), None);
    }

    #[test]
    fn imported_trade_time_fills_entry_time() {
        let trade = record(json!({ "tradeTime": "14:05", "tradeType": "SELL" }));
        assert_eq!(trade.entry_time.as_deref(), Some("14:05"));
        assert_eq!(trade.trade_type, Some(TradeType::Sell));
    }

    #[test]
    fn unknown_trade_type_is_none() {
        let trade = record(json!({ "tradeType": "short" }));
        assert_eq!(trade.trade_type, None);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let values = vec![json!({"pnl": 1}), json!("garbage"), json!(null), json!({"pnl": 2})];
        let trades = normalize_all(&values);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[1].pnl, dec!(2));
    }

    #[test]
    fn outcome_follows_pnl_sign() {
        let mut trade = TradeRecord::default();
        assert_eq!(trade.outcome(), Outcome::BreakEven);
        trade.pnl = dec!(0.01);
        assert_eq!(trade.outcome(), Outcome::Win);
        trade.pnl = dec!(-0.01);
        assert_eq!(trade.outcome(), Outcome::Loss);
    }
}
