//! HTTP client for the upstream scan API.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::ScanError;
use crate::wire::{ROUND_INFO_ENDPOINT, UPDATES_ENDPOINT};

/// Default timeout for upstream requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of raw upstream response bodies.
///
/// Implementations return the decoded JSON body of a successful response,
/// or a [`ScanError`] for transport failures and non-success statuses.
/// Shape validation happens afterwards, in [`crate::wire`].
pub trait ScanApi: Send + Sync {
    /// Open mining rounds, current round first.
    fn fetch_round_info(&self) -> impl Future<Output = Result<Value, ScanError>> + Send;

    /// The `count` most recent update records.
    fn fetch_updates(&self, count: u32) -> impl Future<Output = Result<Value, ScanError>> + Send;
}

impl<T: ScanApi> ScanApi for &T {
    fn fetch_round_info(&self) -> impl Future<Output = Result<Value, ScanError>> + Send {
        (**self).fetch_round_info()
    }

    fn fetch_updates(&self, count: u32) -> impl Future<Output = Result<Value, ScanError>> + Send {
        (**self).fetch_updates(count)
    }
}

/// Where the scan API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanEndpoints {
    pub base_url: String,
    pub round_info_path: String,
    pub updates_path: String,
}

impl ScanEndpoints {
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn round_info_url(&self) -> String {
        self.url(&self.round_info_path)
    }

    pub fn updates_url(&self) -> String {
        self.url(&self.updates_path)
    }
}

/// reqwest-backed [`ScanApi`].
pub struct ScanClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    endpoints: ScanEndpoints,
}

impl ScanClient {
    pub fn new(endpoints: ScanEndpoints) -> Self {
        Self::with_timeout(endpoints, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoints: ScanEndpoints, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &ScanEndpoints {
        &self.endpoints
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ScanError> {
        debug!(endpoint, url, "requesting upstream");
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("request timed out: {e}")
                } else if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    e.to_string()
                };
                ScanError::Transport { endpoint, reason }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::UpstreamFetch {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ScanError::InvalidResponse {
                endpoint,
                reason: format!("body is not JSON: {e}"),
            })
    }
}

impl ScanApi for ScanClient {
    async fn fetch_round_info(&self) -> Result<Value, ScanError> {
        self.get_json(ROUND_INFO_ENDPOINT, &self.endpoints.round_info_url(), &[])
            .await
    }

    async fn fetch_updates(&self, count: u32) -> Result<Value, ScanError> {
        self.get_json(
            UPDATES_ENDPOINT,
            &self.endpoints.updates_url(),
            &[("count", count.to_string())],
        )
        .await
    }
}
