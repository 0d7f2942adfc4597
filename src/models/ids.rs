//! Newtype wrappers for backend record identifiers.
//!
//! Every resource on the backend is keyed by an integer; wrapping each one
//! keeps a goal ID from being passed where a movement ID is expected.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID over the backend's integer keys.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a financial movement.
    MovementId
}

define_id! {
    /// Unique identifier for a savings goal (`meta`).
    GoalId
}

define_id! {
    /// Unique identifier for an expense category.
    CategoryId
}

define_id! {
    /// Unique identifier for an income source.
    IncomeSourceId
}

define_id! {
    /// Unique identifier for a user's financial context.
    FinancialContextId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_transparent_on_the_wire() {
        let id = MovementId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: MovementId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_display_matches_inner() {
        assert_eq!(GoalId::new(7).to_string(), "7");
        assert_eq!(CategoryId::from(3).into_inner(), 3);
    }

    #[test]
    fn string_id_is_rejected() {
        assert!(serde_json::from_str::<IncomeSourceId>(r#""7""#).is_err());
    }
}
