//! Upstream response shapes and the parse step that validates them.
//!
//! Responses are first decoded into permissive wire structs (every field
//! optional), then converted into validated domain values. The conversion
//! reports the first required field that is missing instead of letting a
//! hole travel through the computation.

use feeburn_types::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ScanError;

pub const ROUND_INFO_ENDPOINT: &str = "round info";
pub const UPDATES_ENDPOINT: &str = "updates";

/// Path reported when the current round number cannot be found.
pub const ROUND_NUMBER_FIELD: &str = "open_mining_rounds[0].payload.round.number";

/// Price applied when the round carries no amulet price.
pub const DEFAULT_AMULET_PRICE: f64 = 1.0;

// ── Validated values ─────────────────────────────────────────────────────

/// Current round number and CC → USD multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundInfo {
    pub number: u64,
    pub amulet_price: f64,
}

/// A created event found in an update's transaction tree.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatedEntity {
    pub event_id: String,
    pub entity_name: String,
}

/// One update record reduced to what the scan needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedUpdate {
    pub record_time: Option<Timestamp>,
    /// First root of the transaction tree, if any.
    pub root_party: Option<String>,
    /// Created events in document order.
    pub created: Vec<CreatedEntity>,
}

// ── Wire structs ─────────────────────────────────────────────────────────

/// A number the upstream may encode either as JSON number or as string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as u64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoundInfoResponse {
    #[serde(default)]
    open_mining_rounds: Option<Vec<OpenMiningRound>>,
}

#[derive(Debug, Deserialize)]
struct OpenMiningRound {
    #[serde(default)]
    payload: Option<MiningRoundPayload>,
}

#[derive(Debug, Deserialize)]
struct MiningRoundPayload {
    #[serde(default)]
    round: Option<RoundNumber>,
    #[serde(default)]
    amulet_price: Option<Numeric>,
}

#[derive(Debug, Deserialize)]
struct RoundNumber {
    #[serde(default)]
    number: Option<Numeric>,
}

/// Decode an optional field, treating `null` and wrongly typed values as
/// absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Records are decoded one at a time so a single bad record cannot fail
/// the whole response.
#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    updates: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct UpdateRecord {
    #[serde(default, deserialize_with = "lenient")]
    record_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    update: Option<UpdateBody>,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    #[serde(default, deserialize_with = "lenient")]
    transaction_tree: Option<TransactionTree>,
}

#[derive(Debug, Deserialize)]
struct TransactionTree {
    #[serde(default, deserialize_with = "lenient")]
    roots: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    events_by_id: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct TreeEvent {
    #[serde(default)]
    created: Option<CreatedEvent>,
}

#[derive(Debug, Deserialize)]
struct CreatedEvent {
    #[serde(default)]
    template_id: Option<TemplateId>,
}

/// Either `{ "entity_name": ... }` or a qualified `package:Module:Entity`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TemplateId {
    Structured { entity_name: String },
    Qualified(String),
}

impl TemplateId {
    fn into_entity_name(self) -> String {
        match self {
            Self::Structured { entity_name } => entity_name,
            Self::Qualified(id) => match id.rsplit_once(':') {
                Some((_, entity)) => entity.to_string(),
                None => id,
            },
        }
    }
}

// ── Parse step ───────────────────────────────────────────────────────────

impl RoundInfo {
    /// Validate a round-info response body.
    ///
    /// The round number is required; an empty `open_mining_rounds` list is
    /// reported as a missing round number. The price defaults to
    /// [`DEFAULT_AMULET_PRICE`].
    pub fn parse(body: Value) -> Result<Self, ScanError> {
        let response: RoundInfoResponse = decode(ROUND_INFO_ENDPOINT, body)?;
        let payload = response
            .open_mining_rounds
            .and_then(|rounds| rounds.into_iter().next())
            .and_then(|round| round.payload)
            .ok_or(ScanError::MissingField(ROUND_NUMBER_FIELD))?;

        let raw_number = payload
            .round
            .and_then(|r| r.number)
            .ok_or(ScanError::MissingField(ROUND_NUMBER_FIELD))?;
        let number = raw_number
            .as_u64()
            .ok_or_else(|| ScanError::InvalidResponse {
                endpoint: ROUND_INFO_ENDPOINT,
                reason: format!("round number is not an integer: {raw_number:?}"),
            })?;

        let amulet_price = match payload.amulet_price {
            None => DEFAULT_AMULET_PRICE,
            Some(raw) => raw.as_f64().ok_or_else(|| ScanError::InvalidResponse {
                endpoint: ROUND_INFO_ENDPOINT,
                reason: format!("amulet_price is not numeric: {raw:?}"),
            })?,
        };

        Ok(Self {
            number,
            amulet_price,
        })
    }
}

/// Validate an updates response body.
///
/// `updates` is required. Records without a transaction tree (for example
/// reassignments) are kept with no created events; records that are not
/// objects at all are skipped.
pub fn parse_updates(body: Value) -> Result<Vec<ScannedUpdate>, ScanError> {
    let response: UpdatesResponse = decode(UPDATES_ENDPOINT, body)?;
    let records = response
        .updates
        .ok_or(ScanError::MissingField("updates"))?;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(record) => Some(scan_record(record)),
            Err(e) => {
                debug!(index, "skipping malformed update record: {e}");
                None
            }
        })
        .collect())
}

fn scan_record(record: UpdateRecord) -> ScannedUpdate {
    let record_time = record
        .record_time
        .as_deref()
        .and_then(Timestamp::parse_rfc3339);

    let Some(tree) = record.update.and_then(|u| u.transaction_tree) else {
        return ScannedUpdate {
            record_time,
            root_party: None,
            created: Vec::new(),
        };
    };

    let created = tree
        .events_by_id
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(event_id, event)| {
            let event: TreeEvent = match serde_json::from_value(event) {
                Ok(event) => event,
                Err(e) => {
                    debug!(%event_id, "skipping malformed event: {e}");
                    return None;
                }
            };
            let entity_name = event.created?.template_id?.into_entity_name();
            Some(CreatedEntity {
                event_id,
                entity_name,
            })
        })
        .collect();

    ScannedUpdate {
        record_time,
        root_party: tree
            .roots
            .and_then(|roots| roots.into_iter().next())
            .filter(|root| !root.trim().is_empty()),
        created,
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    endpoint: &'static str,
    body: Value,
) -> Result<T, ScanError> {
    serde_json::from_value(body).map_err(|e| ScanError::InvalidResponse {
        endpoint,
        reason: e.to_string(),
    })
}
