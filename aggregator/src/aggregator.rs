//! The aggregation pass.

use std::collections::HashMap;

use feeburn_types::{Party, Round, Timestamp, Transaction};
use tracing::{debug, info, info_span, Instrument};

use crate::client::ScanApi;
use crate::clock::{Clock, SystemClock};
use crate::error::ScanError;
use crate::wire::{parse_updates, RoundInfo, ScannedUpdate};

/// Burn amount, in CC, recorded for every qualifying event.
///
/// Event payloads are not inspected; this is a stand-in value.
pub const PLACEHOLDER_BURN_CC: f64 = 1.0;

/// Party attributed to updates whose transaction tree has no roots.
pub const UNKNOWN_PARTY: &str = "unknown";

/// Default number of recent updates requested per pass.
pub const DEFAULT_UPDATE_COUNT: u32 = 100;

/// Whether a template entity name marks a fee-burn event.
///
/// Case-sensitive substring match on `Burn` or `Fee`.
pub fn is_burn_entity(entity_name: &str) -> bool {
    entity_name.contains("Burn") || entity_name.contains("Fee")
}

/// Transactions collected for one party during a pass.
struct PartyBucket {
    party_id: String,
    transactions: Vec<Transaction>,
}

impl PartyBucket {
    fn finish(self) -> Party {
        Party::from_transactions(self.party_id, self.transactions)
    }
}

/// Group the burn events of `updates` by party and total them into a round.
///
/// Every burn event in an update is attributed to the update's first root
/// party, whatever its actual stakeholders. Parties appear in the order they
/// are first seen, and their transactions in scan order.
pub fn aggregate(info: &RoundInfo, updates: &[ScannedUpdate], now: Timestamp) -> Round {
    let mut buckets: Vec<PartyBucket> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for update in updates {
        let party_id = update.root_party.as_deref().unwrap_or(UNKNOWN_PARTY);
        let timestamp = update.record_time.unwrap_or(now);

        for entity in update
            .created
            .iter()
            .filter(|e| is_burn_entity(&e.entity_name))
        {
            let slot = *slots.entry(party_id).or_insert_with(|| {
                buckets.push(PartyBucket {
                    party_id: party_id.to_string(),
                    transactions: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].transactions.push(Transaction::new(
                entity.event_id.as_str(),
                entity.entity_name.as_str(),
                PLACEHOLDER_BURN_CC,
                info.amulet_price,
                timestamp,
            ));
        }
    }

    let parties = buckets.into_iter().map(PartyBucket::finish).collect();
    Round::from_parties(info.number, now, parties)
}

/// Produces the current round aggregate from a scan API.
pub struct Aggregator<S, C = SystemClock> {
    scan: S,
    clock: C,
    update_count: u32,
}

impl<S: ScanApi> Aggregator<S, SystemClock> {
    pub fn new(scan: S) -> Self {
        Self::with_clock(scan, SystemClock)
    }
}

impl<S: ScanApi, C: Clock> Aggregator<S, C> {
    pub fn with_clock(scan: S, clock: C) -> Self {
        Self {
            scan,
            clock,
            update_count: DEFAULT_UPDATE_COUNT,
        }
    }

    /// Override how many recent updates are requested.
    pub fn update_count(mut self, count: u32) -> Self {
        self.update_count = count;
        self
    }

    /// Run one aggregation pass.
    ///
    /// The round-info fetch, the updates fetch and the scan run one after
    /// the other; the first failure is returned and nothing partial is kept.
    pub async fn current_round(&self) -> Result<Round, ScanError> {
        let span = info_span!("aggregate", update_count = self.update_count);
        self.run_pass().instrument(span).await
    }

    async fn run_pass(&self) -> Result<Round, ScanError> {
        let info = RoundInfo::parse(self.scan.fetch_round_info().await?)?;
        debug!(
            round = info.number,
            amulet_price = info.amulet_price,
            "fetched round info"
        );

        let updates = parse_updates(self.scan.fetch_updates(self.update_count).await?)?;
        debug!(records = updates.len(), "fetched updates");

        let round = aggregate(&info, &updates, self.clock.now());
        info!(
            round = round.round,
            parties = round.parties.len(),
            burn_events = round.burn_events,
            "aggregated fee burns"
        );
        Ok(round)
    }
}
