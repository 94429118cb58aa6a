//! Server configuration with TOML file support.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RpcError;

/// Where the dashboard gets its round from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// Built-in demo dataset.
    Demo,
    /// Run the aggregator in-process against the scan API.
    #[default]
    Live,
    /// Fetch the round from another server's aggregator endpoint.
    Remote,
}

impl ServeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Live => "live",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for ServeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "live" => Ok(Self::Live),
            "remote" => Ok(Self::Remote),
            other => Err(format!(
                "unknown mode `{other}`, expected `demo`, `live` or `remote`"
            )),
        }
    }
}

/// Configuration for the explorer server.
///
/// Can be loaded from a TOML file via [`ServerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Data mode of the dashboard.
    #[serde(default)]
    pub mode: ServeMode,

    /// Base URL of the upstream scan API.
    #[serde(default = "default_scan_url")]
    pub scan_url: String,

    #[serde(default = "default_round_info_path")]
    pub round_info_path: String,

    #[serde(default = "default_updates_path")]
    pub updates_path: String,

    /// Number of recent updates scanned per pass.
    #[serde(default = "default_update_count")]
    pub update_count: u32,

    /// Aggregator endpoint used in `remote` mode.
    #[serde(default = "default_remote_api_url")]
    pub remote_api_url: String,

    /// Timeout applied to every outgoing HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_scan_url() -> String {
    "https://scan.sv-1.global.canton.network.sync.global/api/scan".to_string()
}

fn default_round_info_path() -> String {
    "/v0/open-and-issuing-mining-rounds".to_string()
}

fn default_updates_path() -> String {
    "/v0/updates".to_string()
}

fn default_update_count() -> u32 {
    feeburn_aggregator::DEFAULT_UPDATE_COUNT
}

fn default_remote_api_url() -> String {
    "http://127.0.0.1:3000/api/round".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RpcError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RpcError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RpcError> {
        toml::from_str(s).map_err(|e| RpcError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RpcError> {
        toml::to_string_pretty(self).map_err(|e| RpcError::Config(e.to_string()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            mode: ServeMode::default(),
            scan_url: default_scan_url(),
            round_info_path: default_round_info_path(),
            updates_path: default_updates_path(),
            update_count: default_update_count(),
            remote_api_url: default_remote_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
