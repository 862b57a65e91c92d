use crate::error::AnalyticsError;
use core_types::TradeRecord;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIN_COUNT: usize = 10;

/// One equal-width slice of the pnl range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.count).collect()
    }
}

/// Bins pnl values into `bin_count` equal-width buckets between the minimum and maximum.
///
/// The maximum lands in the last bucket. When every value is the same the width is zero
/// and all records are placed in the first bucket. An empty input still yields
/// `bin_count` buckets, all empty.
pub fn histogram(records: &[TradeRecord], bin_count: usize) -> Result<Histogram, AnalyticsError> {
    if bin_count == 0 {
        return Err(AnalyticsError::InvalidBinCount(bin_count));
    }

    let min = records.iter().map(|r| r.pnl).min().unwrap_or_default();
    let max = records.iter().map(|r| r.pnl).max().unwrap_or_default();
    // A spread beyond `Decimal` range degrades to a zero width: one bucket holds everything.
    let width = max
        .checked_sub(min)
        .map_or(Decimal::ZERO, |range| range / Decimal::from(bin_count));

    let mut counts = vec![0usize; bin_count];
    for record in records {
        counts[bucket_index(record.pnl, min, width, bin_count)] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min.saturating_add(width.saturating_mul(Decimal::from(i)));
            let upper = min.saturating_add(width.saturating_mul(Decimal::from(i + 1)));
            Bucket {
                label: format!("{} to {}", whole(lower), whole(upper)),
                lower,
                upper,
                count,
            }
        })
        .collect();

    Ok(Histogram { buckets })
}

fn bucket_index(value: Decimal, min: Decimal, width: Decimal, bin_count: usize) -> usize {
    if width.is_zero() {
        return 0;
    }
    value
        .checked_sub(min)
        .and_then(|offset| offset.checked_div(width))
        .and_then(|position| position.floor().to_usize())
        .unwrap_or(0)
        .min(bin_count - 1)
}

fn whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
