//! The injectable voting-power query interface.

use agora_types::{AccountAddress, Checkpoint};

/// Point-in-time voting-power queries consumed by the governance engine.
///
/// All three queries are pure reads. Delegation and balance transfer are
/// entirely the implementor's responsibility and never visible to the engine.
pub trait VotingPowerLedger {
    /// The account's voting power right now (latest checkpoint).
    ///
    /// Used only as a cheap spam gate at proposal creation; votes are always
    /// weighed historically.
    fn current_voting_power(&self, account: &AccountAddress) -> u128;

    /// The account's voting power as it stood at `checkpoint`.
    fn historical_voting_power(&self, account: &AccountAddress, checkpoint: Checkpoint) -> u128;

    /// Total circulating supply as it stood at `checkpoint`.
    fn historical_total_supply(&self, checkpoint: Checkpoint) -> u128;
}
