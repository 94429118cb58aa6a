//! Built-in demo dataset.

use feeburn_types::{Party, Round, Timestamp, Transaction};

pub const DEMO_ROUND: u64 = 1847392;

/// USD per CC used for every demo transaction.
pub const DEMO_AMULET_PRICE: f64 = 0.1647;

/// (party, [(transaction id, type, burn CC, seconds before now)])
type DemoParty = (&'static str, &'static [(&'static str, &'static str, f64, i64)]);

const DEMO_PARTIES: &[DemoParty] = &[
    (
        "Openvector-V1::122033c0ef8b9d4a7c6f5e2d",
        &[
            ("tx_openvector_001", "TrafficPurchase", 45234.12, 120),
            ("tx_openvector_002", "HoldingFee", 32145.67, 240),
            ("tx_openvector_003", "TransferFee", 28934.55, 360),
        ],
    ),
    (
        "JPM-Native-Deposit::a7b8c9d0e1f2a3b4c5d6",
        &[
            ("tx_jpm_001", "OutputFee", 38234.89, 180),
            ("tx_jpm_002", "CNSEntryFee", 31245.12, 300),
            ("tx_jpm_003", "TrafficPurchase", 27893.44, 420),
        ],
    ),
    (
        "Goldman-DAX-Settlement::d1e2f3a4b5c6d7e8",
        &[
            ("tx_gs_001", "TransferFee", 27567.82, 480),
            ("tx_gs_002", "HoldingFee", 24123.45, 540),
        ],
    ),
    (
        "Broadridge-Repoway::e2f3a4b5c6d7e8f9",
        &[
            ("tx_broadridge_001", "OutputFee", 23456.78, 600),
            ("tx_broadridge_002", "TrafficPurchase", 21234.56, 660),
        ],
    ),
    (
        "DTCC-Settlement::f3a4b5c6d7e8f9a0",
        &[("tx_dtcc_001", "HoldingFee", 20345.89, 720)],
    ),
    (
        "BNP-Paribas-Tokenization::a4b5c6d7e8f9a0b1",
        &[("tx_bnp_001", "TransferFee", 18234.12, 780)],
    ),
];

/// The demo round, with transaction times relative to `now`.
pub fn demo_round(now: Timestamp) -> Round {
    let parties = DEMO_PARTIES
        .iter()
        .map(|(party_id, txs)| {
            let transactions = txs
                .iter()
                .map(|&(id, kind, burn_cc, ago)| {
                    Transaction::new(id, kind, burn_cc, DEMO_AMULET_PRICE, now.minus_secs(ago))
                })
                .collect();
            Party::from_transactions(*party_id, transactions)
        })
        .collect();
    Round::from_parties(DEMO_ROUND, now, parties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeburn_types::BurnAggregate;

    #[test]
    fn demo_round_is_consistent() {
        let now = Timestamp::from_unix_secs(1_760_000_000);
        let round = demo_round(now);
        assert_eq!(round.round, DEMO_ROUND);
        assert_eq!(round.parties.len(), 6);
        assert_eq!(round.burn_events, 12);
        round.check_invariants().unwrap();
        for party in &round.parties {
            party.check_invariants().unwrap();
        }
    }

    #[test]
    fn transactions_are_dated_before_now() {
        let now = Timestamp::from_unix_secs(1_760_000_000);
        let round = demo_round(now);
        let first = &round.parties[0].transactions[0];
        assert_eq!(first.timestamp, now.minus_secs(120));
        assert_eq!(first.fees.holding, first.burn_cc / 4.0);
    }
}
