//! Per-party burn totals.

use serde::{Deserialize, Serialize};

use crate::{FeeBurnError, Transaction};

/// Burn activity of one ledger party.
///
/// Totals are derived from `transactions`, which keep the order in which
/// they were discovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id: String,
    #[serde(rename = "totalBurnCC")]
    pub total_burn_cc: f64,
    #[serde(rename = "totalBurnUSD")]
    pub total_burn_usd: f64,
    pub burn_events: u64,
    pub transactions: Vec<Transaction>,
}

impl Party {
    /// Build a party, computing its totals from `transactions`.
    pub fn from_transactions(party_id: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        let total_burn_cc = transactions.iter().fold(0.0, |acc, t| acc + t.burn_cc);
        let total_burn_usd = transactions.iter().fold(0.0, |acc, t| acc + t.burn_usd);
        Self {
            party_id: party_id.into(),
            total_burn_cc,
            total_burn_usd,
            burn_events: transactions.len() as u64,
            transactions,
        }
    }

    /// The party id up to the `::` namespace separator.
    pub fn short_id(&self) -> &str {
        self.party_id
            .split_once("::")
            .map_or(self.party_id.as_str(), |(name, _)| name)
    }

    /// Verify the totals against the transactions, and each transaction's
    /// fee split.
    pub fn check_invariants(&self) -> Result<(), FeeBurnError> {
        let scope = || format!("party {}", self.party_id);
        let cc = self.transactions.iter().fold(0.0, |acc, t| acc + t.burn_cc);
        if cc != self.total_burn_cc {
            return Err(FeeBurnError::TotalMismatch {
                scope: scope(),
                field: "totalBurnCC",
                expected: cc,
                actual: self.total_burn_cc,
            });
        }
        let usd = self.transactions.iter().fold(0.0, |acc, t| acc + t.burn_usd);
        if usd != self.total_burn_usd {
            return Err(FeeBurnError::TotalMismatch {
                scope: scope(),
                field: "totalBurnUSD",
                expected: usd,
                actual: self.total_burn_usd,
            });
        }
        let count = self.transactions.len() as u64;
        if count != self.burn_events {
            return Err(FeeBurnError::EventCountMismatch {
                scope: scope(),
                expected: count,
                actual: self.burn_events,
            });
        }
        self.transactions
            .iter()
            .try_for_each(Transaction::check_invariants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    fn tx(id: &str, cc: f64) -> Transaction {
        Transaction::new(id, "HoldingFee", cc, 2.0, Timestamp::from_unix_secs(0))
    }

    #[test]
    fn totals_are_derived() {
        let party = Party::from_transactions("P1::abc", vec![tx("a", 1.0), tx("b", 3.0)]);
        assert_eq!(party.total_burn_cc, 4.0);
        assert_eq!(party.total_burn_usd, 8.0);
        assert_eq!(party.burn_events, 2);
        assert!(party.check_invariants().is_ok());
    }

    #[test]
    fn short_id_strips_namespace() {
        let party = Party::from_transactions("Openvector-V1::1220abcd", vec![]);
        assert_eq!(party.short_id(), "Openvector-V1");
        let bare = Party::from_transactions("unknown", vec![]);
        assert_eq!(bare.short_id(), "unknown");
    }

    #[test]
    fn inflated_event_count_is_detected() {
        let mut party = Party::from_transactions("P1", vec![tx("a", 1.0)]);
        party.burn_events = 48;
        assert!(matches!(
            party.check_invariants(),
            Err(FeeBurnError::EventCountMismatch { expected: 1, actual: 48, .. })
        ));
    }

    #[test]
    fn json_uses_camel_case() {
        let party = Party::from_transactions("P1", vec![tx("a", 1.0)]);
        let json = serde_json::to_value(&party).unwrap();
        assert_eq!(json["partyId"], "P1");
        assert_eq!(json["totalBurnCC"], 1.0);
        assert_eq!(json["totalBurnUSD"], 2.0);
        assert_eq!(json["burnEvents"], 1);
    }
}
