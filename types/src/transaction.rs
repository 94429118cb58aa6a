//! A single fee-burn transaction.

use serde::{Deserialize, Serialize};

use crate::{FeeBreakdown, FeeBurnError, Timestamp};

/// One burn event attributed to a party.
///
/// `burn_usd` is always `burn_cc * price` and the fee breakdown is an even
/// split of `burn_cc`. Values are fixed at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "burnCC")]
    pub burn_cc: f64,
    #[serde(rename = "burnUSD")]
    pub burn_usd: f64,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub fees: FeeBreakdown,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        burn_cc: f64,
        price: f64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            burn_cc,
            burn_usd: burn_cc * price,
            timestamp,
            fees: FeeBreakdown::even_split(burn_cc),
        }
    }

    pub fn check_invariants(&self) -> Result<(), FeeBurnError> {
        if self.fees.total() != self.burn_cc {
            return Err(FeeBurnError::FeeSplitMismatch(self.id.clone()));
        }
        Ok(())
    }
}
