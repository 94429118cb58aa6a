//! Fee-burn data model.
//!
//! This crate defines the entities produced by one aggregation pass and
//! consumed read-only by the dashboard: transactions with their fee
//! breakdown, parties, rounds and days. All totals are derived from the
//! underlying transactions at construction time.

pub mod aggregate;
pub mod day;
pub mod error;
pub mod fee;
pub mod party;
pub mod round;
pub mod time;
pub mod transaction;

pub use aggregate::{BurnAggregate, BurnTotals};
pub use day::Day;
pub use error::FeeBurnError;
pub use fee::FeeBreakdown;
pub use party::Party;
pub use round::Round;
pub use time::Timestamp;
pub use transaction::Transaction;
