use crate::calendar::YearMonth;
use crate::summary::percentage;
use chrono::{Datelike, NaiveDate, Weekday};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

pub const UNKNOWN_SYMBOL: &str = "Unknown";
pub const NO_STRATEGY: &str = "No Strategy";

/// Sunday-first, matching the calendar grid.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Aggregate of every trade that shares one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats<K> {
    pub key: K,
    pub trades: usize,
    pub total_pnl: Decimal,
    pub wins: usize,
}

impl<K> GroupStats<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            trades: 0,
            total_pnl: Decimal::ZERO,
            wins: 0,
        }
    }

    fn add(&mut self, record: &TradeRecord) {
        self.trades += 1;
        self.total_pnl = self.total_pnl.saturating_add(record.pnl);
        if record.is_win() {
            self.wins += 1;
        }
    }

    pub fn win_rate_pct(&self) -> Decimal {
        percentage(self.wins, self.trades)
    }
}

/// Groups records by `key_fn`, keeping groups in first-encountered order.
///
/// Records for which `key_fn` returns `None` are left out entirely.
pub fn group_by<K, F>(records: &[TradeRecord], key_fn: F) -> Vec<GroupStats<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&TradeRecord) -> Option<K>,
{
    accumulate(Vec::new(), records, key_fn)
}

/// Like [`group_by`] but starts from a fixed list of keys, so every key is present
/// in the output (in the given order) even when no record maps to it.
pub fn group_by_fixed<K, F>(records: &[TradeRecord], keys: &[K], key_fn: F) -> Vec<GroupStats<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&TradeRecord) -> Option<K>,
{
    let seeded = keys.iter().cloned().map(GroupStats::new).collect();
    accumulate(seeded, records, key_fn)
}

fn accumulate<K, F>(mut groups: Vec<GroupStats<K>>, records: &[TradeRecord], key_fn: F) -> Vec<GroupStats<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&TradeRecord) -> Option<K>,
{
    let mut index: HashMap<K, usize> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| (g.key.clone(), i))
        .collect();

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupStats::new(key));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    groups
}

pub fn by_symbol(records: &[TradeRecord]) -> Vec<GroupStats<String>> {
    group_by(records, |r| {
        Some(if r.symbol.is_empty() {
            UNKNOWN_SYMBOL.to_string()
        } else {
            r.symbol.clone()
        })
    })
}

pub fn by_strategy(records: &[TradeRecord]) -> Vec<GroupStats<String>> {
    group_by(records, |r| {
        Some(r.strategy.clone().unwrap_or_else(|| NO_STRATEGY.to_string()))
    })
}

/// Always seven groups, Sunday through Saturday. Undated trades are not counted.
pub fn by_weekday(records: &[TradeRecord]) -> Vec<GroupStats<Weekday>> {
    group_by_fixed(records, &WEEKDAYS, |r| r.trade_date.map(|d| d.weekday()))
}

/// Always the four slots in [`TimeSlot::ALL`] order.
pub fn by_time_slot(records: &[TradeRecord]) -> Vec<GroupStats<TimeSlot>> {
    group_by_fixed(records, &TimeSlot::ALL, |r| {
        Some(TimeSlot::from_entry_time(r.entry_time.as_deref()))
    })
}

/// Net result per trading day, in the order days first appear.
pub fn by_day(records: &[TradeRecord]) -> Vec<GroupStats<NaiveDate>> {
    group_by(records, |r| r.trade_date)
}

/// Net result per calendar month, oldest month first.
pub fn by_month(records: &[TradeRecord]) -> Vec<GroupStats<YearMonth>> {
    let mut months = group_by(records, |r| r.trade_date.map(YearMonth::of));
    months.sort_by_key(|g| g.key);
    months
}

/// The `n` groups with the highest total pnl; equal totals keep their input order.
pub fn top_by_pnl<K: Clone>(groups: &[GroupStats<K>], n: usize) -> Vec<GroupStats<K>> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
    ranked.truncate(n);
    ranked
}

/// The group with the highest total pnl; the first one wins a tie.
pub fn best_group<K>(groups: &[GroupStats<K>]) -> Option<&GroupStats<K>> {
    groups.iter().fold(None, |best, g| match best {
        Some(b) if g.total_pnl <= b.total_pnl => Some(b),
        _ => Some(g),
    })
}

/// The group with the lowest total pnl; the first one wins a tie.
pub fn worst_group<K>(groups: &[GroupStats<K>]) -> Option<&GroupStats<K>> {
    groups.iter().fold(None, |worst, g| match worst {
        Some(w) if g.total_pnl >= w.total_pnl => Some(w),
        _ => Some(g),
    })
}

/// The best and worst trading days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayExtremes {
    pub best: GroupStats<NaiveDate>,
    pub worst: GroupStats<NaiveDate>,
}

pub fn best_and_worst_days(records: &[TradeRecord]) -> Option<DayExtremes> {
    let days = by_day(records);
    Some(DayExtremes {
        best: best_group(&days)?.clone(),
        worst: worst_group(&days)?.clone(),
    })
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Fixed hour-of-day buckets for time-of-day performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "9-11 AM")]
    Morning,
    #[serde(rename = "11-2 PM")]
    Midday,
    #[serde(rename = "2-4 PM")]
    Afternoon,
    #[serde(rename = "Other")]
    Other,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Other,
    ];

    /// Trades without an entry time are treated as entered at noon.
    pub const DEFAULT_HOUR: u32 = 12;

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            9..=10 => TimeSlot::Morning,
            11..=13 => TimeSlot::Midday,
            14..=15 => TimeSlot::Afternoon,
            _ => TimeSlot::Other,
        }
    }

    /// Buckets an `HH:MM` style entry time. Text without a leading hour is `Other`.
    pub fn from_entry_time(entry_time: Option<&str>) -> Self {
        match entry_time {
            None => Self::from_hour(Self::DEFAULT_HOUR),
            Some(text) => match leading_hour(text) {
                Some(hour) => Self::from_hour(hour),
                None => TimeSlot::Other,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "9-11 AM",
            TimeSlot::Midday => "11-2 PM",
            TimeSlot::Afternoon => "2-4 PM",
            TimeSlot::Other => "Other",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn leading_hour(text: &str) -> Option<u32> {
    let head = text.split(':').next()?.trim();
    let digits: String = head.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
