//! Invariant violations detected on the data model.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FeeBurnError {
    #[error("{scope}: {field} is {actual}, expected {expected}")]
    TotalMismatch {
        scope: String,
        field: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("{scope}: burn event count is {actual}, expected {expected}")]
    EventCountMismatch {
        scope: String,
        expected: u64,
        actual: u64,
    },

    #[error("transaction {0}: fee components do not sum to the burned amount")]
    FeeSplitMismatch(String),
}
