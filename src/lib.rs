//! Personal-finance movement aggregation.
//!
//! This crate turns a flat list of financial movements (incomes, expenses,
//! savings, loans and transfers) into the views a budgeting dashboard
//! needs: a monthly summary with an all-time balance, spending and income
//! rankings, a six-month chart series and a needs/wants/savings split.
//!
//! The [`report`] module is pure and synchronous. The optional [`client`]
//! module fetches movements, goals, categories, income sources and the
//! user's financial context from the REST backend.
//!
//! # Features
//!
//! - `async` (default): [`client::FinanzasClient`] plus the `keep_alive` pinger.
//! - `blocking`: [`client::FinanzasBlockingClient`].
//! - `cli` (default): the `finanzas` binary.

pub mod error;
pub mod models;
pub mod report;

#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
#[cfg(feature = "async")]
pub mod keep_alive;
