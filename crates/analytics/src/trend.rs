use crate::summary::percentage;
use chrono::NaiveDate;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based position in the input.
    pub position: usize,
    pub label: String,
    pub win_rate_pct: Decimal,
}

/// Cumulative win rate after each trade, in input order.
///
/// The iterator is lazy and borrows the records; clone it to walk the sequence again
/// from wherever the clone was taken.
#[derive(Debug, Clone)]
pub struct WinRateTrend<'a> {
    records: std::slice::Iter<'a, TradeRecord>,
    seen: usize,
    wins: usize,
}

impl<'a> WinRateTrend<'a> {
    pub fn new(records: &'a [TradeRecord]) -> Self {
        Self {
            records: records.iter(),
            seen: 0,
            wins: 0,
        }
    }
}

impl Iterator for WinRateTrend<'_> {
    type Item = TrendPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.seen += 1;
        if record.is_win() {
            self.wins += 1;
        }

        Some(TrendPoint {
            position: self.seen,
            label: record
                .trade_date_raw
                .clone()
                .unwrap_or_else(|| format!("Trade {}", self.seen)),
            win_rate_pct: percentage(self.wins, self.seen),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for WinRateTrend<'_> {}

/// Position size against outcome, one point per trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposurePoint {
    pub exposure: Decimal,
    pub pnl: Decimal,
}

/// Projects each trade to `(quantity × entry price, pnl)` for a scatter plot.
pub fn exposure_vs_pnl(records: &[TradeRecord]) -> Vec<ExposurePoint> {
    records
        .iter()
        .map(|r| ExposurePoint {
            exposure: r.exposure(),
            pnl: r.pnl,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub cumulative_pnl: Decimal,
}

/// Running pnl total over dated trades, oldest first. Same-day trades keep input order.
pub fn equity_curve(records: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut dated: Vec<(NaiveDate, Decimal)> = records
        .iter()
        .filter_map(|r| r.trade_date.map(|d| (d, r.pnl)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);

    let mut running = Decimal::ZERO;
    dated
        .into_iter()
        .map(|(date, pnl)| {
            running = running.saturating_add(pnl);
            EquityPoint {
                date,
                cumulative_pnl: running,
            }
        })
        .collect()
}
