//! The month view of the PnL calendar.
//!
//! Day values are accumulated in full before any day is classified, so a day whose
//! trades offset each other is tagged by its net result rather than by whichever trade
//! happened to be processed last.

use crate::error::AnalyticsError;
use chrono::{Datelike, NaiveDate};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, with `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, AnalyticsError> {
        let ym = Self { year, month };
        ym.first_day()?;
        Ok(ym)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Result<NaiveDate, AnalyticsError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(AnalyticsError::InvalidPeriod {
            year: self.year,
            month: self.month,
        })
    }

    pub fn days_in_month(&self) -> Result<u32, AnalyticsError> {
        let first = self.first_day()?;
        let next = self.next().first_day()?;
        Ok((next - first).num_days() as u32)
    }

    /// The previous month, wrapping January back into December of the prior year.
    pub fn prev(&self) -> Self {
        if self.month <= 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// The next month, wrapping December into January of the following year.
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        NAMES.get(self.month.wrapping_sub(1) as usize).copied().unwrap_or("Unknown")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Colour class of a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayTone {
    Gain,
    Loss,
    Neutral,
}

impl DayTone {
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            DayTone::Gain
        } else if value < Decimal::ZERO {
            DayTone::Loss
        } else {
            DayTone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Day of month, starting at 1.
    pub day: u32,
    pub value: Decimal,
    pub tone: DayTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub period: YearMonth,
    /// Number of empty cells before day 1 in a Sunday-first week grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn profitable_days(&self) -> usize {
        self.count_tone(DayTone::Gain)
    }

    pub fn loss_days(&self) -> usize {
        self.count_tone(DayTone::Loss)
    }

    /// Days with a non-zero net result.
    pub fn trading_days(&self) -> usize {
        self.days.iter().filter(|d| d.tone != DayTone::Neutral).count()
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    /// The month laid out as Sunday-first weeks; `None` marks a cell outside the month.
    pub fn weeks(&self) -> Vec<[Option<&CalendarDay>; 7]> {
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().map(Some));

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                for (slot, cell) in week.iter_mut().zip(chunk) {
                    *slot = *cell;
                }
                week
            })
            .collect()
    }

    fn count_tone(&self, tone: DayTone) -> usize {
        self.days.iter().filter(|d| d.tone == tone).count()
    }
}

/// Maps trades onto the days of `month` (1-based) of `year`.
pub fn map_to_calendar_days(
    records: &[TradeRecord],
    year: i32,
    month: u32,
) -> Result<CalendarMonth, AnalyticsError> {
    let period = YearMonth::new(year, month)?;
    let days_in_month = period.days_in_month()?;
    let leading_blanks = period.first_day()?.weekday().num_days_from_sunday();

    let mut values = vec![Decimal::ZERO; days_in_month as usize];
    for record in records {
        let Some(date) = record.trade_date else {
            continue;
        };
        if period.contains(date) {
            let value = &mut values[date.day0() as usize];
            *value = value.saturating_add(record.pnl);
        }
    }

    let days = values
        .into_iter()
        .zip(1..)
        .map(|(value, day)| CalendarDay {
            day,
            value,
            tone: DayTone::of(value),
        })
        .collect();

    tracing::debug!(period = %period, "Mapped trades onto calendar.");

    Ok(CalendarMonth {
        period,
        leading_blanks,
        days,
    })
}
