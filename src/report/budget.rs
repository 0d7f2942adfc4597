//! Needs/wants/savings split, a 50/30/20 rule generalized to any savings
//! rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Savings rate used when the user has not configured one.
pub const DEFAULT_SAVINGS_RATE: Decimal = dec!(20);

/// Share of the non-savings remainder assigned to needs (5/8).
const NEEDS_SHARE: Decimal = dec!(0.625);

/// Share of the non-savings remainder assigned to wants (3/8).
const WANTS_SHARE: Decimal = dec!(0.375);

/// Suggested allocation of a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSplit {
    /// Percentage for needs, rounded to a whole number.
    pub needs_percent: Decimal,
    /// Percentage for wants, rounded to a whole number.
    pub wants_percent: Decimal,
    /// Percentage for savings, as supplied.
    pub savings_percent: Decimal,
    /// Amount for needs, from the rounded percentage.
    pub needs_amount: Decimal,
    /// Amount for wants, from the rounded percentage.
    pub wants_amount: Decimal,
    /// Amount for savings.
    pub savings_amount: Decimal,
}

/// Splits `base_amount` given a savings rate in percent.
///
/// Needs and wants share what savings leave over in a 5:3 ratio, so a 20%
/// rate gives the classic 50/30/20. The two percentages are rounded half
/// up independently and may not add up to exactly 100 with savings. No
/// input is rejected: negative bases or rates outside 0-100 flow straight
/// through the arithmetic.
#[must_use]
pub fn budget_split(base_amount: Decimal, savings_rate: Decimal) -> BudgetSplit {
    let remaining = Decimal::ONE_HUNDRED - savings_rate;
    let needs_percent = round_half_up(remaining * NEEDS_SHARE);
    let wants_percent = round_half_up(remaining * WANTS_SHARE);
    BudgetSplit {
        needs_percent,
        wants_percent,
        savings_percent: savings_rate,
        needs_amount: portion(base_amount, needs_percent),
        wants_amount: portion(base_amount, wants_percent),
        savings_amount: portion(base_amount, savings_rate),
    }
}

/// Rounds to the nearest integer, halves towards positive infinity.
fn round_half_up(value: Decimal) -> Decimal {
    (value + dec!(0.5)).floor()
}

/// `percent` percent of `base`.
fn portion(base: Decimal, percent: Decimal) -> Decimal {
    percent * base / Decimal::ONE_HUNDRED
}
