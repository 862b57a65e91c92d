use core_types::TradeRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// The headline numbers of the dashboard's summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_pnl: Decimal,
    pub total_trades: usize,
    pub win_rate_pct: Decimal,
    pub avg_trade: Decimal,
    /// Mean win over mean absolute loss. `None` when there are no losing trades.
    pub risk_reward_ratio: Option<Decimal>,
    /// Mean pnl over its population standard deviation.
    ///
    /// This is a per-trade, dispersion-normalized return measure with no risk-free rate
    /// and no annualization, so it is not comparable to a published Sharpe ratio.
    /// Zero when the input is empty or every trade has the same pnl.
    pub sharpe_like_ratio: Decimal,
    /// Sum of capital committed plus realised pnl across all trades.
    pub portfolio_value: Decimal,
}

impl PerformanceSummary {
    /// A zeroed-out summary, which is also the summary of an empty journal.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            total_trades: 0,
            win_rate_pct: Decimal::ZERO,
            avg_trade: Decimal::ZERO,
            risk_reward_ratio: None,
            sharpe_like_ratio: Decimal::ZERO,
            portfolio_value: Decimal::ZERO,
        }
    }
}

impl Default for PerformanceSummary {
    fn default() -> Self {
        Self::new()
    }
}

pub fn summarize(records: &[TradeRecord]) -> PerformanceSummary {
    let mut summary = PerformanceSummary::new();
    if records.is_empty() {
        return summary;
    }

    let count = Decimal::from(records.len());
    let wins = records.iter().filter(|r| r.is_win()).count();

    summary.total_trades = records.len();
    summary.total_pnl = total(records.iter().map(|r| r.pnl));
    summary.portfolio_value = total(records.iter().map(TradeRecord::net_value));
    summary.win_rate_pct = percentage(wins, records.len());
    summary.avg_trade = summary.total_pnl / count;
    summary.risk_reward_ratio = risk_reward_ratio(records);
    summary.sharpe_like_ratio = sharpe_like_ratio(records);

    summary
}

/// Mean win divided by mean absolute loss, or `None` without losing trades.
///
/// With losers but no winners the mean win is zero, so the ratio is zero. A ratio too
/// large for `Decimal` is also `None`.
pub fn risk_reward_ratio(records: &[TradeRecord]) -> Option<Decimal> {
    let (win_sum, win_count) = sum_count(records.iter().filter(|r| r.pnl > Decimal::ZERO));
    let (loss_sum, loss_count) = sum_count(records.iter().filter(|r| r.pnl < Decimal::ZERO));

    let avg_win = mean(win_sum, win_count);
    let avg_loss = mean(loss_sum, loss_count).abs();

    if avg_loss > Decimal::ZERO {
        avg_win.checked_div(avg_loss)
    } else {
        None
    }
}

/// Mean pnl over population standard deviation.
///
/// Zero when the deviation is zero, and also when any intermediate value leaves the
/// `Decimal` range.
pub fn sharpe_like_ratio(records: &[TradeRecord]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    dispersion_ratio(records).unwrap_or_default()
}

fn dispersion_ratio(records: &[TradeRecord]) -> Option<Decimal> {
    let n = Decimal::from(records.len());
    let mean_pnl = records
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.pnl))?
        / n;
    let variance = records.iter().try_fold(Decimal::ZERO, |acc, r| {
        let deviation = r.pnl.checked_sub(mean_pnl)?;
        acc.checked_add(deviation.checked_mul(deviation)?)
    })? / n;

    if variance <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    match variance.sqrt() {
        Some(std_dev) if std_dev > Decimal::ZERO => mean_pnl.checked_div(std_dev),
        _ => Some(Decimal::ZERO),
    }
}

/// `part / whole * 100`, or zero for an empty whole.
pub(crate) fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED
}

pub(crate) fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

/// Sums decimals, saturating at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub(crate) fn total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

pub(crate) fn sum_count<'a>(records: impl Iterator<Item = &'a TradeRecord>) -> (Decimal, usize) {
    records.fold((Decimal::ZERO, 0), |(sum, count), r| (sum.saturating_add(r.pnl), count + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trades(pnls: &[Decimal]) -> Vec<TradeRecord> {
        pnls.iter()
            .map(|&pnl| TradeRecord { pnl, ..Default::default() })
            .collect()
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, PerformanceSummary::new());
        assert_eq!(summary.risk_reward_ratio, None);
    }

    #[test]
    fn totals_and_rates() {
        let summary = summarize(&trades(&[dec!(100), dec!(-40), dec!(25)]));
        assert_eq!(summary.total_pnl, dec!(85));
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.win_rate_pct.round_dp(1), dec!(66.7));
        assert_eq!(summary.avg_trade.round_dp(4), dec!(28.3333));
        // mean win 62.5 over mean loss 40
        assert_eq!(summary.risk_reward_ratio, Some(dec!(1.5625)));
    }

    #[test]
    fn no_losers_means_no_risk_reward() {
        assert_eq!(risk_reward_ratio(&trades(&[dec!(10), dec!(0)])), None);
    }

    #[test]
    fn only_losers_gives_zero_risk_reward() {
        assert_eq!(risk_reward_ratio(&trades(&[dec!(-10), dec!(-30)])), Some(Decimal::ZERO));
    }

    #[test]
    fn sharpe_like_ratio_uses_population_deviation() {
        // mean 2, population std dev 1
        let ratio = sharpe_like_ratio(&trades(&[dec!(1), dec!(3)]));
        assert_eq!(ratio.round_dp(6), dec!(2));
    }

    #[test]
    fn constant_pnl_has_zero_sharpe_like_ratio() {
        assert_eq!(sharpe_like_ratio(&trades(&[dec!(50), dec!(50), dec!(50)])), Decimal::ZERO);
    }

    #[test]
    fn portfolio_value_adds_investment_and_pnl() {
        let records = vec![
            TradeRecord { investment: dec!(1000), pnl: dec!(50), ..Default::default() },
            TradeRecord { investment: dec!(500), pnl: dec!(-20), ..Default::default() },
        ];
        assert_eq!(summarize(&records).portfolio_value, dec!(1530));
    }
}
