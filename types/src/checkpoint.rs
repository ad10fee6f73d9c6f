//! Ledger checkpoints — the points in history voting power can be queried at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonically increasing point in the voting-power ledger's history
/// (e.g. a block height).
///
/// Proposals pin the checkpoint current at their creation; every vote on a
/// proposal is weighed at that same checkpoint, so later balance changes
/// never shift an already-open tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Checkpoint(u64);

impl Checkpoint {
    /// The genesis checkpoint.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn height(&self) -> u64 {
        self.0
    }

    /// The next checkpoint in sequence.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
