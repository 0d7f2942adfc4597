//! Movement model.
//!
//! The backend sends movements as one flat record with three optional
//! relation names. Here the relation lives inside [`MovementKind`], so an
//! expense can only ever carry a category and an income only a source.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryId, GoalId, IncomeSourceId, MovementId, MovementType};

/// Date layout of the calendar part of `occurredAt`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Type of a movement together with the one relation that type may carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Money received, optionally attributed to an income source.
    Income {
        /// Income source name.
        source: Option<String>,
    },
    /// Money spent, optionally filed under a category.
    Expense {
        /// Category name.
        category: Option<String>,
    },
    /// Contribution to savings, optionally towards a goal.
    Savings {
        /// Goal name.
        goal: Option<String>,
    },
    /// Loan given or taken.
    Loan,
    /// Transfer between the user's own funds.
    Transfer,
}

impl MovementKind {
    /// Returns the plain type of this kind.
    #[inline]
    #[must_use]
    pub const fn movement_type(&self) -> MovementType {
        match *self {
            Self::Income { .. } => MovementType::Income,
            Self::Expense { .. } => MovementType::Expense,
            Self::Savings { .. } => MovementType::Savings,
            Self::Loan => MovementType::Loan,
            Self::Transfer => MovementType::Transfer,
        }
    }
}

/// A single financial movement fetched from `/movimientos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MovementRecord", into = "MovementRecord")]
pub struct Movement {
    /// Unique identifier.
    pub id: MovementId,
    /// Type and type-specific relation.
    pub kind: MovementKind,
    /// Non-negative amount in whole currency units.
    pub amount: Decimal,
    /// Free-text label.
    pub description: String,
    /// ISO 8601 date or date-time as sent by the backend.
    pub occurred_at: String,
    /// Informational flag, unused by reports.
    pub is_recurrent: bool,
}

impl Movement {
    /// Returns the plain type of this movement.
    #[inline]
    #[must_use]
    pub const fn movement_type(&self) -> MovementType {
        self.kind.movement_type()
    }

    /// Category name, for expenses that have one.
    #[inline]
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        match self.kind {
            MovementKind::Expense { ref category } => category.as_deref(),
            MovementKind::Income { .. }
            | MovementKind::Savings { .. }
            | MovementKind::Loan
            | MovementKind::Transfer => None,
        }
    }

    /// Income source name, for incomes that have one.
    #[inline]
    #[must_use]
    pub fn income_source_name(&self) -> Option<&str> {
        match self.kind {
            MovementKind::Income { ref source } => source.as_deref(),
            MovementKind::Expense { .. }
            | MovementKind::Savings { .. }
            | MovementKind::Loan
            | MovementKind::Transfer => None,
        }
    }

    /// Goal name, for savings that have one.
    #[inline]
    #[must_use]
    pub fn goal_name(&self) -> Option<&str> {
        match self.kind {
            MovementKind::Savings { ref goal } => goal.as_deref(),
            MovementKind::Income { .. }
            | MovementKind::Expense { .. }
            | MovementKind::Loan
            | MovementKind::Transfer => None,
        }
    }

    /// Calendar date of the movement.
    ///
    /// Only the date portion of `occurred_at` (everything before a `T` or a
    /// space) is read, so a stored UTC midnight never rolls over into the
    /// neighbouring day. Returns `None` when that portion is not a valid
    /// `YYYY-MM-DD` date.
    #[must_use]
    pub fn local_date(&self) -> Option<NaiveDate> {
        let date_part = self.occurred_at.trim().split(['T', ' ']).next()?;
        NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
    }
}

/// Flat wire representation of a movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovementRecord {
    /// Unique identifier.
    id: MovementId,
    /// Movement type.
    #[serde(rename = "type")]
    movement_type: MovementType,
    /// Amount.
    amount: Decimal,
    /// Free-text label.
    #[serde(default)]
    description: String,
    /// ISO 8601 timestamp.
    occurred_at: String,
    /// Category name (expenses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_name: Option<String>,
    /// Income source name (incomes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    income_source_name: Option<String>,
    /// Goal name (savings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    goal_name: Option<String>,
    /// Recurrence flag.
    #[serde(default)]
    is_recurrent: bool,
}

/// Treats blank relation names as absent.
fn named(value: Option<String>) -> Option<String> {
    value.filter(|name| !name.trim().is_empty())
}

impl From<MovementRecord> for Movement {
    fn from(record: MovementRecord) -> Self {
        let kind = match record.movement_type {
            MovementType::Income => MovementKind::Income {
                source: named(record.income_source_name),
            },
            MovementType::Expense => MovementKind::Expense {
                category: named(record.category_name),
            },
            MovementType::Savings => MovementKind::Savings {
                goal: named(record.goal_name),
            },
            MovementType::Loan => MovementKind::Loan,
            MovementType::Transfer => MovementKind::Transfer,
        };
        Self {
            id: record.id,
            kind,
            amount: record.amount,
            description: record.description,
            occurred_at: record.occurred_at,
            is_recurrent: record.is_recurrent,
        }
    }
}

impl From<Movement> for MovementRecord {
    fn from(movement: Movement) -> Self {
        let movement_type = movement.movement_type();
        let (category_name, income_source_name, goal_name) = match movement.kind {
            MovementKind::Income { source } => (None, source, None),
            MovementKind::Expense { category } => (category, None, None),
            MovementKind::Savings { goal } => (None, None, goal),
            MovementKind::Loan | MovementKind::Transfer => (None, None, None),
        };
        Self {
            id: movement.id,
            movement_type,
            amount: movement.amount,
            description: movement.description,
            occurred_at: movement.occurred_at,
            category_name,
            income_source_name,
            goal_name,
            is_recurrent: movement.is_recurrent,
        }
    }
}

/// Payload for creating or replacing a movement.
///
/// Built through the per-type constructors so that only the relation legal
/// for the type can be attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    /// Movement type.
    #[serde(rename = "type")]
    movement_type: MovementType,
    /// Amount, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    /// Free-text label.
    description: String,
    /// Calendar date of the movement.
    occurred_at: NaiveDate,
    /// Recurrence flag.
    is_recurrent: bool,
    /// Linked category (expenses).
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<CategoryId>,
    /// Linked income source (incomes).
    #[serde(skip_serializing_if = "Option::is_none")]
    income_source_id: Option<IncomeSourceId>,
    /// Linked goal (savings).
    #[serde(skip_serializing_if = "Option::is_none")]
    goal_id: Option<GoalId>,
}

impl NewMovement {
    /// Shared constructor with no relation attached.
    fn bare(
        movement_type: MovementType,
        amount: Decimal,
        occurred_at: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            movement_type,
            amount,
            description,
            occurred_at,
            is_recurrent: false,
            category_id: None,
            income_source_id: None,
            goal_id: None,
        }
    }

    /// An income, optionally attributed to a source.
    #[inline]
    #[must_use]
    pub fn income<T: Into<String>>(
        amount: Decimal,
        occurred_at: NaiveDate,
        description: T,
        source: Option<IncomeSourceId>,
    ) -> Self {
        let mut movement = Self::bare(MovementType::Income, amount, occurred_at, description.into());
        movement.income_source_id = source;
        movement
    }

    /// An expense, optionally filed under a category.
    #[inline]
    #[must_use]
    pub fn expense<T: Into<String>>(
        amount: Decimal,
        occurred_at: NaiveDate,
        description: T,
        category: Option<CategoryId>,
    ) -> Self {
        let mut movement = Self::bare(MovementType::Expense, amount, occurred_at, description.into());
        movement.category_id = category;
        movement
    }

    /// A savings contribution, optionally towards a goal.
    #[inline]
    #[must_use]
    pub fn savings<T: Into<String>>(
        amount: Decimal,
        occurred_at: NaiveDate,
        description: T,
        goal: Option<GoalId>,
    ) -> Self {
        let mut movement = Self::bare(MovementType::Savings, amount, occurred_at, description.into());
        movement.goal_id = goal;
        movement
    }

    /// A loan.
    #[inline]
    #[must_use]
    pub fn loan<T: Into<String>>(amount: Decimal, occurred_at: NaiveDate, description: T) -> Self {
        Self::bare(MovementType::Loan, amount, occurred_at, description.into())
    }

    /// A transfer between the user's own funds.
    #[inline]
    #[must_use]
    pub fn transfer<T: Into<String>>(
        amount: Decimal,
        occurred_at: NaiveDate,
        description: T,
    ) -> Self {
        Self::bare(MovementType::Transfer, amount, occurred_at, description.into())
    }

    /// Marks the movement as recurrent.
    #[inline]
    #[must_use]
    pub const fn recurrent(mut self, is_recurrent: bool) -> Self {
        self.is_recurrent = is_recurrent;
        self
    }

    /// Returns the type of the movement being created.
    #[inline]
    #[must_use]
    pub const fn movement_type(&self) -> MovementType {
        self.movement_type
    }
}
