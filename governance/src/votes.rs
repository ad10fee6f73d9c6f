//! Durable per-(account, proposal) vote records.
//!
//! Records are independent of slot lifecycle: a vote stays queryable after
//! its proposal expired, was finalized, and its slot was reused by an
//! unrelated identifier. Records are created on first vote, overwritten on
//! revote, and never deleted.

use agora_types::{AccountAddress, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One account's current vote on one proposal.
///
/// The zero value (`agreed: false, weight: 0`) doubles as the "never voted"
/// record; subtracting it from a tally is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Which side the weight currently counts toward.
    pub agreed: bool,
    /// The voter's power at the proposal's creation checkpoint, fixed at the
    /// moment of voting.
    pub weight: u128,
}

impl VoteRecord {
    pub fn new(agreed: bool, weight: u128) -> Self {
        Self { agreed, weight }
    }

    pub fn is_zero(&self) -> bool {
        self.weight == 0 && !self.agreed
    }
}

/// Nested account → proposal-id → record store. Point lookups only.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteRecordStore {
    records: HashMap<AccountAddress, HashMap<ProposalId, VoteRecord>>,
}

impl VoteRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The account's record for `id`, zero value if absent.
    pub fn get(&self, account: &AccountAddress, id: &ProposalId) -> VoteRecord {
        self.records
            .get(account)
            .and_then(|by_id| by_id.get(id))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the account's record for `id`.
    pub fn put(&mut self, account: &AccountAddress, id: ProposalId, record: VoteRecord) {
        self.records
            .entry(account.clone())
            .or_default()
            .insert(id, record);
    }

    /// Total number of stored records, across all accounts.
    pub fn record_count(&self) -> usize {
        self.records.values().map(|by_id| by_id.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> AccountAddress {
        AccountAddress::new(format!("agr_{:0>60}", n))
    }

    fn pid(seed: u8) -> ProposalId {
        ProposalId::new([seed; 32])
    }

    #[test]
    fn test_absent_record_is_zero_value() {
        let store = VoteRecordStore::new();
        let record = store.get(&account(1), &pid(1));
        assert!(record.is_zero());
        assert!(!record.agreed);
        assert_eq!(record.weight, 0);
    }

    #[test]
    fn test_put_then_get() {
        let mut store = VoteRecordStore::new();
        store.put(&account(1), pid(1), VoteRecord::new(true, 25));

        assert_eq!(store.get(&account(1), &pid(1)), VoteRecord::new(true, 25));
        // Other accounts and proposals unaffected
        assert!(store.get(&account(2), &pid(1)).is_zero());
        assert!(store.get(&account(1), &pid(2)).is_zero());
    }

    #[test]
    fn test_revote_overwrites_in_place() {
        let mut store = VoteRecordStore::new();
        store.put(&account(1), pid(1), VoteRecord::new(true, 25));
        store.put(&account(1), pid(1), VoteRecord::new(false, 25));

        assert_eq!(store.get(&account(1), &pid(1)), VoteRecord::new(false, 25));
        assert_eq!(store.record_count(), 1);
    }
}
