//! Data models for the finance backend's resources.
//!
//! This module contains strongly-typed representations of movements,
//! goals, categories, income sources and the financial context, the
//! newtype ID wrappers, and the request payloads sent back to the API.

mod category;
mod enums;
mod filter;
mod financial_context;
mod goal;
mod ids;
mod movement;

pub use category::{Category, IncomeSource, NewCategory, NewIncomeSource};
pub use chrono::NaiveDate;
pub use enums::{IncomeFrequency, MovementType};
pub use filter::MovementFilter;
pub use financial_context::{FinancialContext, FinancialContextUpdate};
pub use goal::{Goal, NewGoal};
pub use ids::{CategoryId, FinancialContextId, GoalId, IncomeSourceId, MovementId};
pub use movement::{Movement, MovementKind, NewMovement};
pub use rust_decimal::Decimal;
