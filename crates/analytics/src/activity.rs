use chrono::{Datelike, Duration, NaiveDate};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const OTHER_CATEGORY: &str = "Other";

/// One day of the rolling activity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    /// Short `M/D` label.
    pub label: String,
    pub pnl: Decimal,
    pub cumulative_pnl: Decimal,
    pub trades: usize,
}

/// The last `days` calendar days ending on `today`, oldest first.
///
/// Trades outside the window, or without a date, are ignored.
pub fn daily_window(records: &[TradeRecord], today: NaiveDate, days: u32) -> Vec<DailyActivity> {
    if days == 0 {
        return Vec::new();
    }
    let Some(start) = today.checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
    else {
        return Vec::new();
    };

    let mut window: Vec<DailyActivity> = start
        .iter_days()
        .take(days as usize)
        .map(|date| DailyActivity {
            date,
            label: format!("{}/{}", date.month(), date.day()),
            pnl: Decimal::ZERO,
            cumulative_pnl: Decimal::ZERO,
            trades: 0,
        })
        .collect();

    for record in records {
        let Some(date) = record.trade_date else {
            continue;
        };
        if date < start || date > today {
            continue;
        }
        if let Some(slot) = window.get_mut((date - start).num_days() as usize) {
            slot.pnl = slot.pnl.saturating_add(record.pnl);
            slot.trades += 1;
        }
    }

    let mut running = Decimal::ZERO;
    for day in &mut window {
        running = running.saturating_add(day.pnl);
        day.cumulative_pnl = running;
    }

    window
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    pub value: Decimal,
}

/// Current value (investment + pnl) held per category, in first-seen order.
///
/// Only trades whose value is positive contribute; a category with none is absent.
pub fn allocation_by_category(records: &[TradeRecord]) -> Vec<CategoryAllocation> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut allocation: Vec<CategoryAllocation> = Vec::new();

    for record in records {
        let value = record.net_value();
        if value <= Decimal::ZERO {
            continue;
        }
        let category = record.category.as_deref().unwrap_or(OTHER_CATEGORY);
        let slot = *index.entry(category).or_insert_with(|| {
            allocation.push(CategoryAllocation {
                category: category.to_string(),
                value: Decimal::ZERO,
            });
            allocation.len() - 1
        });
        allocation[slot].value = allocation[slot].value.saturating_add(value);
    }

    allocation
}

/// The last `n` records of the journal, newest first.
pub fn recent_trades(records: &[TradeRecord], n: usize) -> Vec<TradeRecord> {
    records.iter().rev().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid day")
    }

    fn trade(pnl: Decimal, date: Option<NaiveDate>) -> TradeRecord {
        TradeRecord { pnl, trade_date: date, ..Default::default() }
    }

    #[test]
    fn window_covers_the_last_n_days() {
        let records = vec![
            trade(dec!(10), Some(day(9))),
            trade(dec!(5), Some(day(10))),
            trade(dec!(-2), Some(day(15))),
            trade(dec!(-1), Some(day(15))),
            trade(dec!(7), Some(day(16))),
            trade(dec!(1), None),
        ];
        let window = daily_window(&records, day(15), 7);

        assert_eq!(window.len(), 7);
        assert_eq!(window[0].date, day(9));
        assert_eq!(window[0].label, "3/9");
        assert_eq!(window[6].date, day(15));
        assert_eq!(window[6].trades, 2);
        assert_eq!(window[6].pnl, dec!(-3));
        assert_eq!(window[6].cumulative_pnl, dec!(12));
    }

    #[test]
    fn zero_day_window_is_empty() {
        assert!(daily_window(&[], day(15), 0).is_empty());
    }

    #[test]
    fn allocation_skips_non_positive_values() {
        let records = vec![
            TradeRecord {
                category: Some("crypto".into()),
                investment: dec!(100),
                pnl: dec!(10),
                ..Default::default()
            },
            TradeRecord { investment: dec!(50), pnl: dec!(-60), ..Default::default() },
            TradeRecord { investment: dec!(40), ..Default::default() },
            TradeRecord {
                category: Some("crypto".into()),
                investment: dec!(5),
                ..Default::default()
            },
        ];
        assert_eq!(
            allocation_by_category(&records),
            vec![
                CategoryAllocation { category: "crypto".into(), value: dec!(115) },
                CategoryAllocation { category: OTHER_CATEGORY.into(), value: dec!(40) },
            ]
        );
    }

    #[test]
    fn recent_trades_are_newest_first() {
        let records: Vec<TradeRecord> = (1..=4).map(|i| trade(Decimal::from(i), None)).collect();
        let recent: Vec<Decimal> = recent_trades(&records, 3).iter().map(|r| r.pnl).collect();
        assert_eq!(recent, vec![dec!(4), dec!(3), dec!(2)]);
    }
}
