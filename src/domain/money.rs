use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MINOR_UNIT_SCALE: u32 = 2;

/// Converts a major-unit amount (e.g. euros) into integer minor units (cents).
///
/// Sub-cent fractions are rounded half away from zero. Returns `None` when the
/// result does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

pub fn normalize_currency(currency: &str) -> String {
    currency.trim().to_ascii_uppercase()
}

pub fn is_valid_currency(currency: &str) -> bool {
    currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic())
}
