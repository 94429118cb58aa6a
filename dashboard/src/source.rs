//! Where the dashboard's round comes from.

use std::future::Future;
use std::time::{Duration, Instant};

use feeburn_types::{Round, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::demo::demo_round;

/// Message shown when a remote load fails without a usable error body.
pub const REMOTE_FAILURE_MESSAGE: &str = "Failed to fetch round data";

/// Whether the dashboard shows canned or fetched data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    #[default]
    Live,
    Demo,
}

/// Produces the round a dashboard session displays.
///
/// Failures are reported as display-ready messages.
pub trait RoundSource: Send + Sync {
    fn origin(&self) -> DataOrigin;

    fn load(&self) -> impl Future<Output = Result<Round, String>> + Send;
}

/// Run one load through `source`, with a span and timing.
pub async fn load<S: RoundSource>(source: &S) -> Result<Round, String> {
    let span = info_span!("dashboard_load", origin = ?source.origin());
    async {
        let started = Instant::now();
        let result = source.load().await;
        match &result {
            Ok(round) => debug!(
                round = round.round,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "round loaded"
            ),
            Err(message) => warn!(%message, "round load failed"),
        }
        result
    }
    .instrument(span)
    .await
}

/// The built-in demo dataset, dated relative to the time of each load.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoRoundSource;

impl RoundSource for DemoRoundSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Demo
    }

    async fn load(&self) -> Result<Round, String> {
        Ok(demo_round(Timestamp::now()))
    }
}

/// Fetches a round aggregate from another server's `/api/round`.
pub struct RemoteRoundSource {
    http_client: reqwest::Client,
    url: String,
}

impl RemoteRoundSource {
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            url: url.into(),
        }
    }
}

/// Message carried by an `{ "error": ... }` body, if any.
fn error_message(body: &Value) -> Option<String> {
    body.get("error")?.as_str().map(str::to_string)
}

impl RoundSource for RemoteRoundSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Live
    }

    async fn load(&self) -> Result<Round, String> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                debug!(url = %self.url, error = %e, "remote round request failed");
                REMOTE_FAILURE_MESSAGE.to_string()
            })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(error_message(&body).unwrap_or_else(|| REMOTE_FAILURE_MESSAGE.to_string()));
        }
        serde_json::from_value(body).map_err(|e| {
            debug!(url = %self.url, error = %e, "remote round body did not decode");
            REMOTE_FAILURE_MESSAGE.to_string()
        })
    }
}
