use crate::summary::{mean, percentage, sum_count};
use core_types::{Outcome, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trades partitioned by the sign of their pnl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinLossBreakdown {
    pub winning: usize,
    pub losing: usize,
    pub break_even: usize,
    pub total: usize,
    pub avg_win: Decimal,
    /// Mean of the absolute losses, so it is never negative.
    pub avg_loss: Decimal,
    pub largest_win: Decimal,
    /// The most negative pnl among losing trades.
    pub largest_loss: Decimal,
}

impl WinLossBreakdown {
    pub fn pct_winning(&self) -> Decimal {
        percentage(self.winning, self.total)
    }

    pub fn pct_losing(&self) -> Decimal {
        percentage(self.losing, self.total)
    }

    pub fn pct_break_even(&self) -> Decimal {
        percentage(self.break_even, self.total)
    }
}

pub fn classify(records: &[TradeRecord]) -> WinLossBreakdown {
    let winners = || records.iter().filter(|r| r.outcome() == Outcome::Win);
    let losers = || records.iter().filter(|r| r.outcome() == Outcome::Loss);

    let (win_sum, winning) = sum_count(winners());
    let (loss_sum, losing) = sum_count(losers());

    WinLossBreakdown {
        winning,
        losing,
        break_even: records.len() - winning - losing,
        total: records.len(),
        avg_win: mean(win_sum, winning),
        avg_loss: mean(loss_sum, losing).abs(),
        largest_win: winners().map(|r| r.pnl).max().unwrap_or_default(),
        largest_loss: losers().map(|r| r.pnl).min().unwrap_or_default(),
    }
}
