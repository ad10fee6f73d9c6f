//! Voting-power ledger capability.
//!
//! The governance engine never computes balances or delegation itself — it
//! asks a `VotingPowerLedger` for point-in-time answers: an account's power
//! at a historical checkpoint, and the total circulating supply at that same
//! checkpoint. The trait keeps the core testable against a ledger seeded
//! with arbitrary checkpoint data.

pub mod error;
pub mod history;
pub mod power;

pub use error::LedgerError;
pub use history::{CheckpointHistory, CheckpointLedger};
pub use power::VotingPowerLedger;
