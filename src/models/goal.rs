//! Savings goal model (`/metas`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::GoalId;

/// Factor converting a ratio into a percentage.
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A user-defined savings target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier.
    pub id: GoalId,
    /// Display name, also used as the label of SAVINGS movements.
    pub name: String,
    /// Amount the user wants to reach.
    pub target_amount: Decimal,
    /// Amount saved so far.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Optional deadline as an ISO date string.
    #[serde(default)]
    pub deadline: Option<String>,
}

impl Goal {
    /// Percentage of the target already saved.
    ///
    /// A goal with a zero target reports 0% rather than dividing by zero.
    #[inline]
    #[must_use]
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount * HUNDRED
    }

    /// Amount still missing to reach the target, never negative.
    #[inline]
    #[must_use]
    pub fn remaining_amount(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Whether the saved amount has reached the target.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// Payload for creating or replacing a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    /// Display name.
    pub name: String,
    /// Amount to reach, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    /// Optional deadline (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn goal(target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: GoalId::new(1),
            name: "Viaje".to_owned(),
            target_amount: target,
            current_amount: current,
            deadline: None,
        }
    }

    #[test]
    fn deserialize_goal() {
        let json = r#"{"id":9,"name":"Fondo de emergencia","targetAmount":6000000,"currentAmount":1500000,"deadline":"2025-12-31"}"#;
        let parsed: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, GoalId::new(9));
        assert_eq!(parsed.progress_percent(), dec!(25));
        assert_eq!(parsed.deadline.as_deref(), Some("2025-12-31"));
    }

    #[test]
    fn progress_with_zero_target_is_zero() {
        assert_eq!(goal(dec!(0), dec!(500)).progress_percent(), Decimal::ZERO);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(goal(dec!(1000), dec!(400)).remaining_amount(), dec!(600));
        assert_eq!(goal(dec!(1000), dec!(1400)).remaining_amount(), Decimal::ZERO);
        assert!(goal(dec!(1000), dec!(1000)).is_complete());
    }

    #[test]
    fn new_goal_sends_number() {
        let payload = NewGoal {
            name: "Carro".to_owned(),
            target_amount: dec!(20000000),
            deadline: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["targetAmount"], serde_json::json!(20_000_000.0));
        assert!(value.get("deadline").is_none());
    }
}
