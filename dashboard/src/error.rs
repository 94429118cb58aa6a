use thiserror::Error;

use crate::state::NavEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("{event:?} is not valid in view {view}")]
    InvalidTransition { view: &'static str, event: NavEvent },

    #[error("no {what} at index {index}")]
    OutOfRange { what: &'static str, index: usize },

    #[error("dashboard data is not loaded")]
    NotReady,

    #[error("retry is only possible after a failed load")]
    RetryUnavailable,

    #[error("no load is in flight")]
    NotLoading,
}
