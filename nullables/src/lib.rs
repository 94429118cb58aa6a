//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the explorer (wall clock, the upstream scan
//! API, the dashboard's round source) sits behind a trait. This crate
//! provides implementations that:
//! - Return canned values
//! - Record the calls made to them
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod scan;
pub mod source;

pub use clock::NullClock;
pub use scan::{round_info_body, update_record, updates_body, NullScan, ScanRequest};
pub use source::NullRoundSource;
