//! Shared utilities for the fee-burn explorer.

pub mod format;
pub mod logging;

pub use format::{format_amount, format_count, format_percent};
pub use logging::{init_logging, LogFormat, LogLevel};
