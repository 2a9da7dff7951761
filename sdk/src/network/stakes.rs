//! Stake aggregation over a wallet's transaction history.
//!
//! Delegations and withdrawals are ordinary remittance messages. Summing
//! them per receiver gives the current stake; delegations older than the
//! withdraw delay also count towards what can be withdrawn.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{MessageType, TransactionInfo, TransactionType};
use crate::config::STAKE_WITHDRAW_DELAY_MS;

/// Stake held by one delegate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub stake: i64,
    pub withdrawable: i64,
}

/// Aggregates stakes per receiver (base58) as of `now_ms`.
///
/// Every receiver that appears in a remittance message gets an entry, even
/// if none of its messages touch stake. Withdrawals are subtracted from both
/// totals, so they can go negative on inconsistent history. Totals saturate
/// at the `i64` bounds.
pub fn compute_stakes(transactions: &[TransactionInfo], now_ms: u64) -> BTreeMap<String, Stake> {
    let mut stakes: BTreeMap<String, Stake> = BTreeMap::new();

    let remittances = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionType::Remittance);

    for tx in remittances {
        for msg in tx.msgs.iter().flatten() {
            let entry = stakes.entry(msg.receiver.clone()).or_default();
            let sum = msg.sum.trim().parse::<i64>().unwrap_or(0);
            let matured = msg
                .time
                .trim()
                .parse::<u64>()
                .map(|time| now_ms.saturating_sub(time) > STAKE_WITHDRAW_DELAY_MS)
                .unwrap_or(false);

            match msg.kind {
                MessageType::StakeDelegate => {
                    entry.stake = entry.stake.saturating_add(sum);
                    if matured {
                        entry.withdrawable = entry.withdrawable.saturating_add(sum);
                    }
                }
                MessageType::StakeWithdraw => {
                    entry.stake = entry.stake.saturating_sub(sum);
                    entry.withdrawable = entry.withdrawable.saturating_sub(sum);
                }
                MessageType::Emission => {}
            }
        }
    }

    stakes
}
