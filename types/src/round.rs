//! Round aggregate.

use serde::{Deserialize, Serialize};

use crate::aggregate::BurnTotals;
use crate::{BurnAggregate, Party, Timestamp};

/// Burn activity for one network round.
///
/// `parties` keeps first-sighting order from the aggregation scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub round: u64,
    pub timestamp: Timestamp,
    #[serde(rename = "totalBurnCC")]
    pub total_burn_cc: f64,
    #[serde(rename = "totalBurnUSD")]
    pub total_burn_usd: f64,
    pub burn_events: u64,
    pub parties: Vec<Party>,
}

impl Round {
    /// Build a round, computing its totals from `parties`.
    pub fn from_parties(round: u64, timestamp: Timestamp, parties: Vec<Party>) -> Self {
        let totals = BurnTotals::of(&parties);
        Self {
            round,
            timestamp,
            total_burn_cc: totals.burn_cc,
            total_burn_usd: totals.burn_usd,
            burn_events: totals.burn_events,
            parties,
        }
    }
}

impl BurnAggregate for Round {
    fn label(&self) -> String {
        format!("Round {}", self.round)
    }

    fn total_burn_cc(&self) -> f64 {
        self.total_burn_cc
    }

    fn total_burn_usd(&self) -> f64 {
        self.total_burn_usd
    }

    fn burn_events(&self) -> u64 {
        self.burn_events
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }
}
