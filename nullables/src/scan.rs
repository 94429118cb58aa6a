//! Nullable scan API — canned upstream responses.

use std::sync::Mutex;

use feeburn_aggregator::{ScanApi, ScanError};
use serde_json::{json, Map, Value};

const ROUND_INFO: &str = "round info";
const UPDATES: &str = "updates";

/// A request the aggregator made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanRequest {
    RoundInfo,
    Updates { count: u32 },
}

#[derive(Clone, Debug)]
enum Canned {
    Body(Value),
    Status(u16),
}

impl Canned {
    fn respond(&self, endpoint: &'static str) -> Result<Value, ScanError> {
        match self {
            Self::Body(body) => Ok(body.clone()),
            Self::Status(status) => Err(ScanError::UpstreamFetch {
                endpoint,
                status: *status,
            }),
        }
    }
}

/// A scan API that answers from canned bodies and records every request.
pub struct NullScan {
    round_info: Canned,
    updates: Canned,
    requests: Mutex<Vec<ScanRequest>>,
}

impl NullScan {
    /// Answer both endpoints with the given bodies.
    pub fn new(round_info: Value, updates: Value) -> Self {
        Self {
            round_info: Canned::Body(round_info),
            updates: Canned::Body(updates),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make the round-info endpoint fail with `status`.
    pub fn fail_round_info(mut self, status: u16) -> Self {
        self.round_info = Canned::Status(status);
        self
    }

    /// Make the updates endpoint fail with `status`.
    pub fn fail_updates(mut self, status: u16) -> Self {
        self.updates = Canned::Status(status);
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<ScanRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, request: ScanRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

impl ScanApi for NullScan {
    async fn fetch_round_info(&self) -> Result<Value, ScanError> {
        self.record(ScanRequest::RoundInfo);
        self.round_info.respond(ROUND_INFO)
    }

    async fn fetch_updates(&self, count: u32) -> Result<Value, ScanError> {
        self.record(ScanRequest::Updates { count });
        self.updates.respond(UPDATES)
    }
}

/// A round-info body with one open round.
pub fn round_info_body(number: u64, amulet_price: f64) -> Value {
    json!({
        "open_mining_rounds": [
            { "payload": { "round": { "number": number }, "amulet_price": amulet_price } }
        ]
    })
}

/// One update record rooted at `root`, creating the given
/// `(event id, entity name)` events.
pub fn update_record(root: &str, created: &[(&str, &str)]) -> Value {
    let events: Map<String, Value> = created
        .iter()
        .map(|(id, entity)| {
            (
                id.to_string(),
                json!({ "created": { "template_id": { "entity_name": entity } } }),
            )
        })
        .collect();
    json!({
        "update": { "transaction_tree": { "roots": [root], "events_by_id": events } }
    })
}

/// An updates body wrapping `records`.
pub fn updates_body(records: Vec<Value>) -> Value {
    json!({ "updates": records })
}
