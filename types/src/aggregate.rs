//! Behaviour shared by rounds and days: both are a labelled collection of
//! parties with totals summed over them.

use crate::{FeeBurnError, Party};

/// Totals summed over a sequence of parties.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BurnTotals {
    pub burn_cc: f64,
    pub burn_usd: f64,
    pub burn_events: u64,
}

impl BurnTotals {
    pub fn of(parties: &[Party]) -> Self {
        parties.iter().fold(Self::default(), |acc, p| Self {
            burn_cc: acc.burn_cc + p.total_burn_cc,
            burn_usd: acc.burn_usd + p.total_burn_usd,
            burn_events: acc.burn_events + p.burn_events,
        })
    }
}

/// A period of activity (round or day) aggregated per party.
pub trait BurnAggregate {
    /// Display label, e.g. `Round 1847392` or `2024-05-01`.
    fn label(&self) -> String;
    fn total_burn_cc(&self) -> f64;
    fn total_burn_usd(&self) -> f64;
    fn burn_events(&self) -> u64;
    fn parties(&self) -> &[Party];

    /// Percentage of this aggregate's USD total burned by `party`.
    /// Zero when nothing was burned.
    fn usd_share_percent(&self, party: &Party) -> f64 {
        let total = self.total_burn_usd();
        if total == 0.0 {
            0.0
        } else {
            party.total_burn_usd / total * 100.0
        }
    }

    /// Verify the aggregate totals against its parties, then each party.
    fn check_invariants(&self) -> Result<(), FeeBurnError> {
        let totals = BurnTotals::of(self.parties());
        let scope = self.label();
        if totals.burn_cc != self.total_burn_cc() {
            return Err(FeeBurnError::TotalMismatch {
                scope,
                field: "totalBurnCC",
                expected: totals.burn_cc,
                actual: self.total_burn_cc(),
            });
        }
        if totals.burn_usd != self.total_burn_usd() {
            return Err(FeeBurnError::TotalMismatch {
                scope,
                field: "totalBurnUSD",
                expected: totals.burn_usd,
                actual: self.total_burn_usd(),
            });
        }
        if totals.burn_events != self.burn_events() {
            return Err(FeeBurnError::EventCountMismatch {
                scope,
                expected: totals.burn_events,
                actual: self.burn_events(),
            });
        }
        self.parties().iter().try_for_each(Party::check_invariants)
    }
}
