//! Financial context model (`/contextos-financieros`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FinancialContextId, IncomeFrequency};
use crate::report::DEFAULT_SAVINGS_RATE;

/// User-level settings that parameterize budgeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContext {
    /// Unique identifier.
    pub id: FinancialContextId,
    /// How often income arrives.
    pub income_frequency: IncomeFrequency,
    /// Expected income per month, if the user declared one.
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
    /// Desired savings rate as a percentage (0-100).
    #[serde(default)]
    pub savings_rate: Option<Decimal>,
}

impl FinancialContext {
    /// Returns the configured savings rate, or 20% when none is stored.
    #[inline]
    #[must_use]
    pub fn savings_rate_or_default(&self) -> Decimal {
        self.savings_rate.unwrap_or(DEFAULT_SAVINGS_RATE)
    }
}

/// Payload for updating a financial context. Absent fields are left
/// unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContextUpdate {
    /// New income frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_frequency: Option<IncomeFrequency>,
    /// New monthly income.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub monthly_income: Option<Decimal>,
    /// New savings rate.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub savings_rate: Option<Decimal>,
}
