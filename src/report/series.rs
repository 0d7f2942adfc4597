//! Six-month income/expense series for charting.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Locale, YearMonth};
use crate::models::{Movement, MovementType};

/// Number of months in a chart series.
pub const SERIES_MONTHS: usize = 6;

/// How many months before the anchor each slot sits, oldest first.
const MONTH_OFFSETS: [u32; SERIES_MONTHS] = [5, 4, 3, 2, 1, 0];

/// Income and expense totals for one month of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// The month this point covers.
    pub month: YearMonth,
    /// Short month name for the axis.
    pub month_label: &'static str,
    /// Income received that month.
    pub income: Decimal,
    /// Expenses paid that month.
    pub expense: Decimal,
}

/// Builds the series of the five months before `anchor` plus `anchor`
/// itself, oldest first.
///
/// Months without movements report zero. Savings, loans, transfers and
/// movements outside the window are not plotted.
#[must_use]
pub fn monthly_series(
    movements: &[Movement],
    anchor: YearMonth,
    locale: Locale,
) -> [ChartPoint; SERIES_MONTHS] {
    let mut points = MONTH_OFFSETS.map(|back| {
        let month = anchor.minus_months(back);
        ChartPoint {
            month,
            month_label: month.short_label(locale),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    });

    for movement in movements {
        let Some(date) = movement.local_date() else {
            continue;
        };
        let Some(point) = points.iter_mut().find(|point| point.month.contains(date)) else {
            continue;
        };
        match movement.movement_type() {
            MovementType::Income => point.income += movement.amount,
            MovementType::Expense => point.expense += movement.amount,
            MovementType::Savings | MovementType::Loan | MovementType::Transfer => {}
        }
    }
    points
}

/// [`monthly_series`] anchored at the current month.
#[inline]
#[must_use]
pub fn monthly_series_to_date(movements: &[Movement], locale: Locale) -> [ChartPoint; SERIES_MONTHS] {
    monthly_series(movements, YearMonth::current(), locale)
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

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn empty_input_gives_six_zero_points() {
        let points = monthly_series(&[], ym(2024, 3), Locale::Es);
        assert_eq!(points.len(), SERIES_MONTHS);
        assert!(
            points
                .iter()
                .all(|point| point.income.is_zero() && point.expense.is_zero())
        );
    }

    #[test]
    fn window_crosses_year_boundary_oldest_first() {
        let points = monthly_series(&[], ym(2024, 2), Locale::En);
        let months: Vec<YearMonth> = points.iter().map(|point| point.month).collect();
        assert_eq!(
            months,
            vec![
                ym(2023, 9),
                ym(2023, 10),
                ym(2023, 11),
                ym(2023, 12),
                ym(2024, 1),
                ym(2024, 2),
            ]
        );
        let labels: Vec<&str> = points.iter().map(|point| point.month_label).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
    }

    #[test]
    fn accumulates_income_and_expense_per_month() {
        let movements = vec![
            mv(MovementKind::Income { source: None }, dec!(1000), "2024-03-05"),
            mv(MovementKind::Income { source: None }, dec!(500), "2024-03-20T12:00:00Z"),
            mv(MovementKind::Expense { category: None }, dec!(300), "2024-01-10"),
            mv(MovementKind::Savings { goal: None }, dec!(99), "2024-03-01"),
            mv(MovementKind::Transfer, dec!(77), "2024-03-01"),
        ];
        let points = monthly_series(&movements, ym(2024, 3), Locale::Es);
        let march = points.last().unwrap();
        assert_eq!(march.income, dec!(1500));
        assert_eq!(march.expense, dec!(0));
        let january = points.get(3).unwrap();
        assert_eq!(january.month, ym(2024, 1));
        assert_eq!(january.expense, dec!(300));
    }

    #[test]
    fn movements_outside_window_are_ignored() {
        let movements = vec![
            mv(MovementKind::Income { source: None }, dec!(1), "2023-09-30"),
            mv(MovementKind::Income { source: None }, dec!(1), "2024-04-01"),
            mv(MovementKind::Income { source: None }, dec!(1), "2022-03-15"),
            mv(MovementKind::Income { source: None }, dec!(1), "???"),
        ];
        let points = monthly_series(&movements, ym(2024, 3), Locale::Es);
        assert!(points.iter().all(|point| point.income.is_zero()));
    }

    #[test]
    fn current_anchor_still_six_points() {
        assert_eq!(monthly_series_to_date(&[], Locale::Es).len(), SERIES_MONTHS);
    }

    #[test]
    fn chart_point_serializes_month_label() {
        let points = monthly_series(&[], ym(2024, 3), Locale::Es);
        let value = serde_json::to_value(points.last().unwrap()).unwrap();
        assert_eq!(value["monthLabel"], "mar");
        assert!(value.get("label").is_none());
        assert!(value["income"].is_string());
    }
}
