//! Display strings for derived metrics, shared by every renderer.

use rust_decimal::{Decimal, RoundingStrategy};

pub const NOT_APPLICABLE: &str = "N/A";

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round(value, dp))
}

/// `$1234.50`, with the sign in front of the currency symbol.
pub fn money(value: Decimal) -> String {
    let cents = round(value, 2);
    if cents < Decimal::ZERO {
        format!("-${}", fixed(cents.abs(), 2))
    } else {
        format!("${}", fixed(cents.abs(), 2))
    }
}

/// `+$12.00` / `-$3.00`; anything that rounds to zero is shown as a gain.
pub fn signed_money(value: Decimal) -> String {
    if round(value, 2) < Decimal::ZERO {
        money(value)
    } else {
        format!("+{}", money(value))
    }
}

/// `66.7%`
pub fn percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 1))
}

/// A ratio to two decimals, or `N/A` when it is undefined.
pub fn ratio(value: Option<Decimal>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), |v| fixed(v, 2))
}

/// A plain number to `dp` decimals.
pub fn number(value: Decimal, dp: u32) -> String {
    fixed(value, dp)
}
