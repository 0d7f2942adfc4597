//! Enumeration types for constrained API values.

use serde::{Deserialize, Serialize};

/// Kind of a financial movement.
///
/// Only [`Income`](Self::Income), [`Expense`](Self::Expense) and
/// [`Savings`](Self::Savings) take part in report aggregation; loans and
/// transfers are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
    /// Money moved into a savings goal.
    Savings,
    /// Loan given or taken.
    Loan,
    /// Transfer between the user's own funds.
    Transfer,
}

impl MovementType {
    /// Parses the wire name (`INCOME`, `EXPENSE`, ...), ignoring case.
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            "SAVINGS" => Some(Self::Savings),
            "LOAN" => Some(Self::Loan),
            "TRANSFER" => Some(Self::Transfer),
            _ => None,
        }
    }

    /// Returns the wire name of this type.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Savings => "SAVINGS",
            Self::Loan => "LOAN",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl core::fmt::Display for MovementType {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often the user receives income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeFrequency {
    /// Paid every week.
    Weekly,
    /// Paid every two weeks.
    Biweekly,
    /// Paid once a month.
    Monthly,
}
