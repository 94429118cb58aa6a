//! HTTP server for the fee-burn explorer.
//!
//! Provides endpoints for:
//! - The current round aggregate as JSON (`/api/round`)
//! - The dashboard page, as HTML (`/`) or as a JSON view-model (`/api/page`)
//! - Dashboard navigation and retry (`/nav/*`, `/retry`)
//! - Liveness (`/health`)

pub mod config;
pub mod error;
pub mod server;
pub mod source;

pub use config::{ServeMode, ServerConfig};
pub use error::RpcError;
pub use server::{router, serve, spawn_load, AppState};
pub use source::{AggregatorSource, ModeSource};
