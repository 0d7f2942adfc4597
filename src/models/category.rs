//! Expense category (`/categorias`) and income source (`/fuentes-ingreso`)
//! models.

use serde::{Deserialize, Serialize};

use super::{CategoryId, IncomeSourceId};

/// A user-defined expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name, used as the ranking label for expenses.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named origin of income (salary, freelance, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    /// Unique identifier.
    pub id: IncomeSourceId,
    /// Display name, used as the ranking label for incomes.
    pub name: String,
}

/// Payload for creating an income source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncomeSource {
    /// Display name.
    pub name: String,
}
