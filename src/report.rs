//! Report aggregation over a list of movements.
//!
//! Everything here is a pure function of an already-fetched movement list
//! and a few scalar parameters: a monthly summary with an all-time
//! balance, category/source rankings, a six-month chart series and a
//! needs/wants/savings budget split. Each call returns a fresh value;
//! running again on a newer list simply replaces the previous result.
//!
//! # Examples
//!
//! ```
//! use finanzas_rs::models::{Movement, MovementId, MovementKind};
//! use finanzas_rs::report::{Report, ReportParams, YearMonth};
//! use rust_decimal_macros::dec;
//!
//! let movements = vec![Movement {
//!     id: MovementId::new(1),
//!     kind: MovementKind::Income { source: Some("Salario".to_owned()) },
//!     amount: dec!(2000000),
//!     description: "Nómina".to_owned(),
//!     occurred_at: "2024-03-05T00:00:00.000Z".to_owned(),
//!     is_recurrent: true,
//! }];
//! let march = YearMonth::new(2024, 3).unwrap();
//! let report = Report::build(&movements, &ReportParams::new(march).anchor(march));
//! assert_eq!(report.summary.income, dec!(2000000));
//! assert_eq!(report.budget.needs_amount, dec!(1000000));
//! ```

mod budget;
mod period;
mod ranking;
mod series;
mod summary;

use rust_decimal::Decimal;
use serde::Serialize;

pub use budget::{BudgetSplit, DEFAULT_SAVINGS_RATE, budget_split};
pub use period::{Locale, YearMonth};
pub use ranking::{
    CHART_PALETTE, RankingEntry, Rankings, expense_ranking, income_ranking, rankings,
};
pub use series::{ChartPoint, SERIES_MONTHS, monthly_series, monthly_series_to_date};
pub use summary::{MonthlySummary, monthly_summary};

use crate::models::Movement;

/// `part` as a percentage of `whole`, two decimals; zero when `whole` is
/// zero.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Inputs of a full report besides the movement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportParams {
    /// Month the summary, rankings and default budget base refer to.
    pub month: YearMonth,
    /// Last month of the chart series.
    pub anchor: YearMonth,
    /// Language of chart labels.
    pub locale: Locale,
    /// Desired savings rate in percent.
    pub savings_rate: Decimal,
    /// Amount to split; the month's income when `None`.
    pub base_amount: Option<Decimal>,
}

impl ReportParams {
    /// Parameters for `month`, charting up to the current month with the
    /// default savings rate and Spanish labels.
    #[inline]
    #[must_use]
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            anchor: YearMonth::current(),
            locale: Locale::default(),
            savings_rate: DEFAULT_SAVINGS_RATE,
            base_amount: None,
        }
    }

    /// Overrides the last month of the chart series.
    #[inline]
    #[must_use]
    pub const fn anchor(mut self, anchor: YearMonth) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the chart label language.
    #[inline]
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the savings rate used for the budget split.
    #[inline]
    #[must_use]
    pub const fn savings_rate(mut self, rate: Decimal) -> Self {
        self.savings_rate = rate;
        self
    }

    /// Splits this amount instead of the month's income.
    #[inline]
    #[must_use]
    pub const fn base_amount(mut self, amount: Decimal) -> Self {
        self.base_amount = Some(amount);
        self
    }
}

/// Every view derived from one movement snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Month the report covers.
    pub month: YearMonth,
    /// Monthly flows and all-time balance.
    pub summary: MonthlySummary,
    /// Category and source rankings for the month.
    pub rankings: Rankings,
    /// Six-month chart ending at the anchor.
    pub series: [ChartPoint; SERIES_MONTHS],
    /// Base amount the budget split was computed from.
    pub budget_base: Decimal,
    /// Suggested budget split.
    pub budget: BudgetSplit,
}

impl Report {
    /// Aggregates `movements` into a full report.
    #[must_use]
    #[tracing::instrument(skip_all, fields(month = %params.month, movements = movements.len()))]
    pub fn build(movements: &[Movement], params: &ReportParams) -> Self {
        let summary = monthly_summary(movements, params.month);
        let budget_base = params.base_amount.unwrap_or(summary.income);
        tracing::debug!(%budget_base, savings_rate = %params.savings_rate, "building report");
        Self {
            month: params.month,
            summary,
            rankings: rankings(movements, params.month),
            series: monthly_series(movements, params.anchor, params.locale),
            budget_base,
            budget: budget_split(budget_base, params.savings_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{MovementId, MovementKind};

    fn mv(id: i64, kind: MovementKind, amount: Decimal, occurred_at: &str) -> Movement {
        Movement {
            id: MovementId::new(id),
            kind,
            amount,
            description: String::new(),
            occurred_at: occurred_at.to_owned(),
            is_recurrent: false,
        }
    }

    fn sample() -> Vec<Movement> {
        vec![
            mv(
                1,
                MovementKind::Income {
                    source: Some("Salario".to_owned()),
                },
                dec!(1000000),
                "2024-03-05",
            ),
            mv(
                2,
                MovementKind::Expense {
                    category: Some("Food".to_owned()),
                },
                dec!(300000),
                "2024-03-10",
            ),
            mv(
                3,
                MovementKind::Expense {
                    category: Some("Food".to_owned()),
                },
                dec!(200000),
                "2024-02-20",
            ),
        ]
    }

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn percent_of_guards_zero() {
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn report_combines_every_view() {
        let params = ReportParams::new(march()).anchor(march());
        let report = Report::build(&sample(), &params);
        assert_eq!(report.summary.balance, dec!(500000));
        assert_eq!(report.rankings.expenses_by_category.len(), 1);
        assert_eq!(report.series.last().unwrap().expense, dec!(300000));
        assert_eq!(report.series.get(4).unwrap().expense, dec!(200000));
        assert_eq!(report.budget_base, dec!(1000000));
        assert_eq!(report.budget.savings_amount, dec!(200000));
    }

    #[test]
    fn base_override_and_rate() {
        let params = ReportParams::new(march())
            .anchor(march())
            .savings_rate(dec!(20))
            .base_amount(dec!(2000000));
        let report = Report::build(&sample(), &params);
        assert_eq!(report.budget_base, dec!(2000000));
        assert_eq!(report.budget.needs_amount, dec!(1000000));
        assert_eq!(report.budget.wants_amount, dec!(600000));
        assert_eq!(report.budget.savings_amount, dec!(400000));
    }

    #[test]
    fn build_is_idempotent() {
        let movements = sample();
        let params = ReportParams::new(march())
            .anchor(march())
            .locale(Locale::En);
        let first = Report::build(&movements, &params);
        let second = Report::build(&movements, &params);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn report_serializes_camel_case() {
        let params = ReportParams::new(march()).anchor(march());
        let value = serde_json::to_value(Report::build(&sample(), &params)).unwrap();
        assert!(value["summary"]["balance"].is_string());
        assert!(value["rankings"]["expensesByCategory"].is_array());
        assert_eq!(value["series"].as_array().unwrap().len(), SERIES_MONTHS);
        assert!(value.get("budgetBase").is_some());
    }
}
