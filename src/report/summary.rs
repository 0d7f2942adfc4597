//! Monthly income statement with an all-time running balance.

use rust_decimal::Decimal;
use serde::Serialize;

use super::YearMonth;
use crate::models::{Movement, MovementType};

/// Flows for one month plus the balance across the whole history.
///
/// `income`, `expense` and `savings` only cover the queried month, while
/// `balance` covers every movement passed in: a running account balance
/// shown next to a monthly statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Income received in the month.
    pub income: Decimal,
    /// Expenses paid in the month.
    pub expense: Decimal,
    /// Savings contributions made in the month.
    pub savings: Decimal,
    /// All-time income minus expenses minus savings.
    pub balance: Decimal,
}

impl MonthlySummary {
    /// What the month left over after expenses and savings.
    #[inline]
    #[must_use]
    pub fn net_flow(&self) -> Decimal {
        self.income - self.expense - self.savings
    }
}

/// Summarizes `month` from the given movements.
///
/// Movements whose date cannot be read still count towards the balance
/// but never towards a month.
#[must_use]
pub fn monthly_summary(movements: &[Movement], month: YearMonth) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for movement in movements {
        let amount = movement.amount;
        match movement.movement_type() {
            MovementType::Income => summary.balance += amount,
            MovementType::Expense | MovementType::Savings => summary.balance -= amount,
            MovementType::Loan | MovementType::Transfer => {}
        }

        let Some(date) = movement.local_date() else {
            tracing::trace!(id = %movement.id, occurred_at = %movement.occurred_at, "skipping undated movement");
            continue;
        };
        if !month.contains(date) {
            continue;
        }
        match movement.movement_type() {
            MovementType::Income => summary.income += amount,
            MovementType::Expense => summary.expense += amount,
            MovementType::Savings => summary.savings += amount,
            MovementType::Loan | MovementType::Transfer => {}
        }
    }
    summary
}
