//! Per-transaction fee breakdown.

use serde::{Deserialize, Serialize};

/// Share of the burned amount assigned to each fee component.
pub const FEE_COMPONENT_SHARE: f64 = 0.25;

/// The four fee components of a burn, in CC.
///
/// Each component is exactly one quarter of the burned amount. They are not
/// measured independently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    #[serde(rename = "holdingFeeCC")]
    pub holding: f64,
    #[serde(rename = "trafficFeeCC")]
    pub traffic: f64,
    #[serde(rename = "transferFeeCC")]
    pub transfer: f64,
    #[serde(rename = "outputFeeCC")]
    pub output: f64,
}

impl FeeBreakdown {
    /// Split `burn_cc` evenly across the four components.
    pub fn even_split(burn_cc: f64) -> Self {
        let share = burn_cc * FEE_COMPONENT_SHARE;
        Self {
            holding: share,
            traffic: share,
            transfer: share,
            output: share,
        }
    }

    /// Sum of all components.
    ///
    /// Summed pairwise: for an even split this doubles exactly twice, so the
    /// result equals the original burn amount bit for bit.
    pub fn total(&self) -> f64 {
        (self.holding + self.traffic) + (self.transfer + self.output)
    }

    /// Components as labelled values, in display order.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("Holding", self.holding),
            ("Traffic", self.traffic),
            ("Transfer", self.transfer),
            ("Output", self.output),
        ]
    }
}
