//! Fee-burn aggregator.
//!
//! One pass, strictly sequential:
//! 1. fetch the open mining rounds and read the current round number and
//!    amulet price,
//! 2. fetch the most recent updates,
//! 3. scan every created event whose template entity name contains `Burn`
//!    or `Fee`, attribute it to the update's first root party, and
//! 4. sum the resulting transactions per party and per round.
//!
//! Any failure aborts the pass; there is no retry and no partial result.
//! Burn amounts are a fixed placeholder per event, not read from payloads.

pub mod aggregator;
pub mod client;
pub mod clock;
pub mod error;
pub mod wire;

pub use aggregator::{
    aggregate, is_burn_entity, Aggregator, DEFAULT_UPDATE_COUNT, PLACEHOLDER_BURN_CC, UNKNOWN_PARTY,
};
pub use client::{ScanApi, ScanClient, ScanEndpoints};
pub use clock::{Clock, SystemClock};
pub use error::{ErrorKind, ScanError};
pub use wire::{CreatedEntity, RoundInfo, ScannedUpdate};
