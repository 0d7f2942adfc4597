//! Expense-by-category and income-by-source rankings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{YearMonth, percent_of};
use crate::models::{Movement, MovementType};

/// Chart colours handed out to ranking entries in first-seen order.
pub const CHART_PALETTE: [&str; 8] = [
    "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#EC4899", "#84CC16",
];

/// One named bucket of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// Category or income source name.
    pub name: String,
    /// Sum of the bucket's movement amounts.
    pub total_amount: Decimal,
    /// Number of movements in the bucket.
    pub movement_count: usize,
    /// Index into [`CHART_PALETTE`], by first appearance, wrapping.
    pub color_index: usize,
    /// Share of the month's total for the movement type, in percent
    /// (two decimals). Zero when that total is zero.
    pub percent: Decimal,
}

impl RankingEntry {
    /// Hex colour of this entry.
    #[inline]
    #[must_use]
    pub fn color(&self) -> &'static str {
        CHART_PALETTE
            .get(self.color_index % CHART_PALETTE.len())
            .copied()
            .unwrap_or_default()
    }
}

/// Both rankings for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    /// Expenses grouped by category, largest first.
    pub expenses_by_category: Vec<RankingEntry>,
    /// Incomes grouped by source, largest first.
    pub income_by_source: Vec<RankingEntry>,
}

/// Ranks the month's expenses by category.
///
/// Uncategorized expenses are left out of the buckets but still count in
/// the total each percentage is taken against.
#[must_use]
pub fn expense_ranking(movements: &[Movement], month: YearMonth) -> Vec<RankingEntry> {
    rank(movements, month, MovementType::Expense, Movement::category_name)
}

/// Ranks the month's incomes by source.
#[must_use]
pub fn income_ranking(movements: &[Movement], month: YearMonth) -> Vec<RankingEntry> {
    rank(
        movements,
        month,
        MovementType::Income,
        Movement::income_source_name,
    )
}

/// Computes both rankings for `month`.
#[inline]
#[must_use]
pub fn rankings(movements: &[Movement], month: YearMonth) -> Rankings {
    Rankings {
        expenses_by_category: expense_ranking(movements, month),
        income_by_source: income_ranking(movements, month),
    }
}

/// Groups movements of one type by label, then sorts by total, largest
/// first. The sort is stable so ties keep first-seen order.
fn rank(
    movements: &[Movement],
    month: YearMonth,
    movement_type: MovementType,
    label: fn(&Movement) -> Option<&str>,
) -> Vec<RankingEntry> {
    let mut period_total = Decimal::ZERO;
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<RankingEntry> = Vec::new();

    let in_period = movements.iter().filter(|movement| {
        movement.movement_type() == movement_type
            && movement.local_date().is_some_and(|date| month.contains(date))
    });
    for movement in in_period {
        period_total += movement.amount;
        let Some(name) = label(movement) else {
            continue;
        };
        if let Some(entry) = positions
            .get(name)
            .and_then(|&index| entries.get_mut(index))
        {
            entry.total_amount += movement.amount;
            entry.movement_count += 1;
            continue;
        }
        let index = entries.len();
        _ = positions.insert(name, index);
        entries.push(RankingEntry {
            name: name.to_owned(),
            total_amount: movement.amount,
            movement_count: 1,
            color_index: index % CHART_PALETTE.len(),
            percent: Decimal::ZERO,
        });
    }

    for entry in &mut entries {
        entry.percent = percent_of(entry.total_amount, period_total);
    }
    entries.sort_by(|left, right| right.total_amount.cmp(&left.total_amount));
    entries
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{MovementId, MovementKind};

    fn mv(kind: MovementKind, amount: Decimal, occurred_at: &str) -> Movement {
        Movement {
            id: MovementId::new(1),
            kind,
            amount,
            description: String::new(),
            occurred_at: occurred_at.to_owned(),
            is_recurrent: false,
        }
    }

    fn expense(amount: Decimal, date: &str, category: Option<&str>) -> Movement {
        mv(
            MovementKind::Expense {
                category: category.map(str::to_owned),
            },
            amount,
            date,
        )
    }

    fn income(amount: Decimal, date: &str, source: Option<&str>) -> Movement {
        mv(
            MovementKind::Income {
                source: source.map(str::to_owned),
            },
            amount,
            date,
        )
    }

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn march_scenario_food_only() {
        let movements = vec![
            income(dec!(1000000), "2024-03-05", None),
            expense(dec!(300000), "2024-03-10", Some("Food")),
            expense(dec!(200000), "2024-02-20", Some("Food")),
        ];
        let ranking = expense_ranking(&movements, march());
        assert_eq!(ranking.len(), 1);
        let food = ranking.first().unwrap();
        assert_eq!(food.name, "Food");
        assert_eq!(food.total_amount, dec!(300000));
        assert_eq!(food.movement_count, 1);
        assert_eq!(food.color_index, 0);
        assert_eq!(food.percent, dec!(100));
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let movements = vec![
            expense(dec!(100), "2024-03-01", Some("Transport")),
            expense(dec!(500), "2024-03-02", Some("Rent")),
            expense(dec!(100), "2024-03-03", Some("Fun")),
            expense(dec!(50), "2024-03-04", Some("Transport")),
        ];
        let ranking = expense_ranking(&movements, march());
        let names: Vec<&str> = ranking.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Transport", "Fun"]);

        let movements = vec![
            expense(dec!(100), "2024-03-01", Some("B")),
            expense(dec!(100), "2024-03-02", Some("A")),
        ];
        let ranking = expense_ranking(&movements, march());
        let names: Vec<&str> = ranking.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn color_index_follows_first_seen_order() {
        let movements = vec![
            expense(dec!(1), "2024-03-01", Some("Small")),
            expense(dec!(9), "2024-03-02", Some("Big")),
        ];
        let ranking = expense_ranking(&movements, march());
        let big = ranking.first().unwrap();
        assert_eq!(big.name, "Big");
        assert_eq!(big.color_index, 1);
        assert_eq!(big.color(), "#10B981");
    }

    #[test]
    fn color_index_wraps_around_palette() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];
        let movements: Vec<Movement> = names
            .into_iter()
            .map(|name| expense(dec!(10), "2024-03-01", Some(name)))
            .collect();
        let ranking = expense_ranking(&movements, march());
        let ninth = ranking.iter().find(|entry| entry.name == "i").unwrap();
        assert_eq!(ninth.color_index, 0);
    }

    #[test]
    fn uncategorized_expenses_count_in_percent_base_only() {
        let movements = vec![
            expense(dec!(300), "2024-03-01", Some("Food")),
            expense(dec!(100), "2024-03-02", None),
        ];
        let ranking = expense_ranking(&movements, march());
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.first().unwrap().percent, dec!(75));
    }

    #[test]
    fn ranked_total_matches_categorized_period_expense() {
        let movements = vec![
            expense(dec!(300), "2024-03-01", Some("Food")),
            expense(dec!(120), "2024-03-09", Some("Transport")),
            expense(dec!(80), "2024-03-10", Some("Food")),
            expense(dec!(45), "2024-03-11", None),
            expense(dec!(999), "2024-04-01", Some("Food")),
        ];
        let ranked: Decimal = expense_ranking(&movements, march())
            .iter()
            .map(|entry| entry.total_amount)
            .sum();
        assert_eq!(ranked, dec!(500));
    }

    #[test]
    fn zero_total_period_gives_zero_percent() {
        let movements = vec![expense(dec!(0), "2024-03-01", Some("Free"))];
        let ranking = expense_ranking(&movements, march());
        assert_eq!(ranking.first().unwrap().percent, Decimal::ZERO);
    }

    #[test]
    fn empty_name_is_its_own_bucket() {
        let movements = vec![expense(dec!(10), "2024-03-01", Some(""))];
        let ranking = expense_ranking(&movements, march());
        assert_eq!(ranking.first().unwrap().name, "");
    }

    #[test]
    fn income_by_source_is_symmetric() {
        let movements = vec![
            income(dec!(2000), "2024-03-01", Some("Salary")),
            income(dec!(500), "2024-03-15", Some("Freelance")),
            income(dec!(2000), "2024-03-30", Some("Salary")),
            expense(dec!(10), "2024-03-01", Some("Salary")),
        ];
        let all = rankings(&movements, march());
        assert_eq!(all.income_by_source.len(), 2);
        let salary = all.income_by_source.first().unwrap();
        assert_eq!(salary.name, "Salary");
        assert_eq!(salary.total_amount, dec!(4000));
        assert_eq!(salary.movement_count, 2);
        assert_eq!(salary.percent, dec!(88.89));
        assert_eq!(all.expenses_by_category.len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_rankings() {
        assert_eq!(rankings(&[], march()), Rankings::default());
    }
}
