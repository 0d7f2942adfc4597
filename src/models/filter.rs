//! Query filter for listing movements.

use chrono::NaiveDate;

use super::{Movement, MovementType};

/// Composable filter for `GET /movimientos`.
///
/// The backend may or may not honour every criterion, and report
/// functions do their own month scoping, so the same filter can also be
/// applied locally with [`MovementFilter::matches`].
///
/// # Examples
///
/// ```
/// use finanzas_rs::models::{MovementFilter, MovementType, NaiveDate};
///
/// let filter = MovementFilter::new()
///     .movement_type(MovementType::Expense)
///     .date_range(
///         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     );
/// assert_eq!(filter.query_pairs().len(), 3);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementFilter {
    /// Movement type.
    pub movement_type: Option<MovementType>,
    /// Start date (inclusive).
    pub from: Option<NaiveDate>,
    /// End date (inclusive).
    pub to: Option<NaiveDate>,
}

impl MovementFilter {
    /// Creates an empty filter that matches every movement.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to movements of the given type.
    #[inline]
    #[must_use]
    pub const fn movement_type(mut self, movement_type: MovementType) -> Self {
        self.movement_type = Some(movement_type);
        self
    }

    /// Restricts to movements dated within the range (inclusive).
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Query-string pairs understood by the backend.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(movement_type) = self.movement_type {
            pairs.push(("type", movement_type.as_str().to_owned()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// Returns `true` if the movement satisfies every set criterion.
    ///
    /// Movements whose date cannot be read never match a date bound.
    #[must_use]
    pub fn matches(&self, movement: &Movement) -> bool {
        self.matches_type(movement) && self.matches_date(movement)
    }

    /// Checks the type criterion.
    fn matches_type(&self, movement: &Movement) -> bool {
        self.movement_type
            .is_none_or(|wanted| movement.movement_type() == wanted)
    }

    /// Checks the date range criterion.
    fn matches_date(&self, movement: &Movement) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        movement.local_date().is_some_and(|date| {
            self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
        })
    }
}
