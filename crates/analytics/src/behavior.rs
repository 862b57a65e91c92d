use crate::summary::total;
use configuration::DashboardSettings;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAppetite {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskAppetite::Low => "Low",
            RiskAppetite::Medium => "Medium",
            RiskAppetite::High => "High",
        };
        f.write_str(label)
    }
}

/// How the trader behaves, as opposed to how the trades performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub trading_days: usize,
    pub avg_trades_per_day: Decimal,
    pub most_traded_symbol: Option<String>,
    /// Trading days as a share of the configured consistency window.
    pub consistency_pct: Decimal,
    pub avg_position_size: Decimal,
    pub risk_appetite: RiskAppetite,
}

pub fn analyze_behavior(records: &[TradeRecord], settings: &DashboardSettings) -> BehaviorProfile {
    // Days are told apart by their journal text, so undated trades with the same
    // (unparsable) text share a day.
    let trading_days = records
        .iter()
        .map(|r| r.trade_date_raw.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let avg_trades_per_day = if trading_days == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(records.len()) / Decimal::from(trading_days)
    };

    let consistency_pct = if settings.consistency_window_days == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(trading_days) / Decimal::from(settings.consistency_window_days)
            * Decimal::ONE_HUNDRED
    };

    let avg_position_size = if records.is_empty() {
        Decimal::ZERO
    } else {
        total(records.iter().map(TradeRecord::exposure)) / Decimal::from(records.len())
    };

    BehaviorProfile {
        trading_days,
        avg_trades_per_day,
        most_traded_symbol: most_traded_symbol(records),
        consistency_pct,
        avg_position_size,
        risk_appetite: risk_appetite(avg_position_size, settings, records.is_empty()),
    }
}

/// The symbol with the most trades; the first one seen wins a tie.
pub fn most_traded_symbol(records: &[TradeRecord]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        counts.entry(record.symbol.as_str()).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (a_count, a_first)), (_, (b_count, b_first))| {
            a_count.cmp(b_count).then(b_first.cmp(a_first))
        })
        .map(|(symbol, _)| symbol.to_string())
}

fn risk_appetite(avg_position_size: Decimal, settings: &DashboardSettings, empty: bool) -> RiskAppetite {
    if empty {
        RiskAppetite::Low
    } else if avg_position_size > settings.risk_high_threshold {
        RiskAppetite::High
    } else if avg_position_size > settings.risk_medium_threshold {
        RiskAppetite::Medium
    } else {
        RiskAppetite::Low
    }
}
