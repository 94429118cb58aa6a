//! Day aggregate.
//!
//! Structurally identical to [`Round`](crate::Round) but keyed by calendar
//! date. The aggregation pass produces rounds only; days come from callers
//! that load a full dashboard data set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::BurnTotals;
use crate::{BurnAggregate, Party};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    #[serde(rename = "totalBurnCC")]
    pub total_burn_cc: f64,
    #[serde(rename = "totalBurnUSD")]
    pub total_burn_usd: f64,
    pub burn_events: u64,
    pub parties: Vec<Party>,
}

impl Day {
    pub fn from_parties(date: NaiveDate, parties: Vec<Party>) -> Self {
        let totals = BurnTotals::of(&parties);
        Self {
            date,
            total_burn_cc: totals.burn_cc,
            total_burn_usd: totals.burn_usd,
            burn_events: totals.burn_events,
            parties,
        }
    }
}

impl BurnAggregate for Day {
    fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
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
