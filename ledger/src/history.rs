//! In-memory checkpointed balance and supply histories.
//!
//! Each account carries an append-only list of (checkpoint, value) entries;
//! a historical query answers with the last entry at or before the queried
//! checkpoint. Histories are stored per key once — a query is O(log k) where
//! k is the number of recorded changes for that key, independent of how many
//! accounts the ledger tracks.

use crate::error::LedgerError;
use crate::power::VotingPowerLedger;
use agora_types::{AccountAddress, Checkpoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded value change.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The checkpoint at which the value became effective.
    pub checkpoint: Checkpoint,
    /// The value from this checkpoint onward (until superseded).
    pub value: u128,
}

/// Append-only history of a single value over checkpoints.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointHistory {
    entries: Vec<HistoryEntry>,
}

impl CheckpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as effective from `checkpoint` onward.
    ///
    /// Checkpoints must arrive in non-decreasing order; a write at the same
    /// checkpoint as the latest entry overwrites it in place.
    pub fn record(&mut self, checkpoint: Checkpoint, value: u128) -> Result<(), LedgerError> {
        if let Some(last) = self.entries.last_mut() {
            if checkpoint < last.checkpoint {
                return Err(LedgerError::CheckpointRegression {
                    attempted: checkpoint,
                    latest: last.checkpoint,
                });
            }
            if checkpoint == last.checkpoint {
                last.value = value;
                return Ok(());
            }
        }
        self.entries.push(HistoryEntry { checkpoint, value });
        Ok(())
    }

    /// The value as it stood at `checkpoint` — the last entry at or before
    /// it, or 0 if nothing was recorded that early.
    pub fn value_at(&self, checkpoint: Checkpoint) -> u128 {
        let idx = self
            .entries
            .partition_point(|e| e.checkpoint <= checkpoint);
        if idx == 0 {
            0
        } else {
            self.entries[idx - 1].value
        }
    }

    /// The latest recorded value, or 0 if the history is empty.
    pub fn latest(&self) -> u128 {
        self.entries.last().map(|e| e.value).unwrap_or(0)
    }

    /// Number of recorded changes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An in-memory `VotingPowerLedger` backed by checkpoint histories.
///
/// Suitable as the hosting environment's ledger adapter and as the seeded
/// test ledger for engine tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointLedger {
    balances: HashMap<AccountAddress, CheckpointHistory>,
    total_supply: CheckpointHistory,
}

impl CheckpointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an account's voting power as of `checkpoint`.
    pub fn record_balance(
        &mut self,
        account: &AccountAddress,
        checkpoint: Checkpoint,
        power: u128,
    ) -> Result<(), LedgerError> {
        self.balances
            .entry(account.clone())
            .or_default()
            .record(checkpoint, power)
    }

    /// Record the total circulating supply as of `checkpoint`.
    pub fn record_total_supply(
        &mut self,
        checkpoint: Checkpoint,
        supply: u128,
    ) -> Result<(), LedgerError> {
        self.total_supply.record(checkpoint, supply)
    }

    /// Number of accounts with at least one recorded balance.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// Serialize the ledger to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Deserialize a ledger from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

impl VotingPowerLedger for CheckpointLedger {
    fn current_voting_power(&self, account: &AccountAddress) -> u128 {
        self.balances.get(account).map(|h| h.latest()).unwrap_or(0)
    }

    fn historical_voting_power(&self, account: &AccountAddress, checkpoint: Checkpoint) -> u128 {
        self.balances
            .get(account)
            .map(|h| h.value_at(checkpoint))
            .unwrap_or(0)
    }

    fn historical_total_supply(&self, checkpoint: Checkpoint) -> u128 {
        self.total_supply.value_at(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> AccountAddress {
        AccountAddress::new(format!("agr_{:0>60}", n))
    }

    #[test]
    fn test_empty_history_answers_zero() {
        let history = CheckpointHistory::new();
        assert_eq!(history.value_at(Checkpoint::new(0)), 0);
        assert_eq!(history.value_at(Checkpoint::new(1000)), 0);
        assert_eq!(history.latest(), 0);
    }

    #[test]
    fn test_lookup_picks_last_entry_at_or_before() {
        let mut history = CheckpointHistory::new();
        history.record(Checkpoint::new(10), 100).unwrap();
        history.record(Checkpoint::new(20), 250).unwrap();
        history.record(Checkpoint::new(30), 50).unwrap();

        assert_eq!(history.value_at(Checkpoint::new(9)), 0);
        assert_eq!(history.value_at(Checkpoint::new(10)), 100);
        assert_eq!(history.value_at(Checkpoint::new(19)), 100);
        assert_eq!(history.value_at(Checkpoint::new(20)), 250);
        assert_eq!(history.value_at(Checkpoint::new(29)), 250);
        assert_eq!(history.value_at(Checkpoint::new(30)), 50);
        assert_eq!(history.value_at(Checkpoint::new(u64::MAX)), 50);
    }

    #[test]
    fn test_same_checkpoint_overwrites() {
        let mut history = CheckpointHistory::new();
        history.record(Checkpoint::new(10), 100).unwrap();
        history.record(Checkpoint::new(10), 175).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.value_at(Checkpoint::new(10)), 175);
    }

    #[test]
    fn test_checkpoint_regression_rejected() {
        let mut history = CheckpointHistory::new();
        history.record(Checkpoint::new(20), 100).unwrap();

        let result = history.record(Checkpoint::new(10), 50);
        match result.unwrap_err() {
            LedgerError::CheckpointRegression { attempted, latest } => {
                assert_eq!(attempted, Checkpoint::new(10));
                assert_eq!(latest, Checkpoint::new(20));
            }
            other => panic!("expected CheckpointRegression, got {other:?}"),
        }
        // Failed write leaves the history untouched
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), 100);
    }

    #[test]
    fn test_historical_power_ignores_later_changes() {
        let mut ledger = CheckpointLedger::new();
        let alice = account(1);
        ledger.record_balance(&alice, Checkpoint::new(5), 40).unwrap();
        ledger.record_balance(&alice, Checkpoint::new(15), 900).unwrap();

        // Power at checkpoint 10 stays 40 no matter what came later
        assert_eq!(ledger.historical_voting_power(&alice, Checkpoint::new(10)), 40);
        assert_eq!(ledger.current_voting_power(&alice), 900);
    }

    #[test]
    fn test_unknown_account_has_no_power() {
        let ledger = CheckpointLedger::new();
        let nobody = account(9);
        assert_eq!(ledger.current_voting_power(&nobody), 0);
        assert_eq!(ledger.historical_voting_power(&nobody, Checkpoint::new(100)), 0);
    }

    #[test]
    fn test_supply_history() {
        let mut ledger = CheckpointLedger::new();
        ledger.record_total_supply(Checkpoint::new(0), 100).unwrap();
        ledger.record_total_supply(Checkpoint::new(50), 120).unwrap();

        assert_eq!(ledger.historical_total_supply(Checkpoint::new(0)), 100);
        assert_eq!(ledger.historical_total_supply(Checkpoint::new(49)), 100);
        assert_eq!(ledger.historical_total_supply(Checkpoint::new(50)), 120);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut ledger = CheckpointLedger::new();
        let alice = account(1);
        ledger.record_balance(&alice, Checkpoint::new(5), 40).unwrap();
        ledger.record_total_supply(Checkpoint::new(5), 100).unwrap();

        let bytes = ledger.to_bytes().unwrap();
        let restored = CheckpointLedger::from_bytes(&bytes).unwrap();

        assert_eq!(restored.account_count(), 1);
        assert_eq!(restored.historical_voting_power(&alice, Checkpoint::new(5)), 40);
        assert_eq!(restored.historical_total_supply(Checkpoint::new(5)), 100);
    }
}
