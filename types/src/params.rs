//! Governance engine parameters.

use serde::{Deserialize, Serialize};

/// Number of proposal slots the engine tracks concurrently.
pub const DEFAULT_SLOT_CAPACITY: usize = 3;

/// How long a proposal accepts votes, in seconds. Default: 7 days.
pub const DEFAULT_VOTING_DURATION_SECS: u64 = 604_800;

/// Tunable parameters for the governance engine.
///
/// Fixed for the lifetime of an engine instance; changing capacity of a
/// running engine would invalidate slot indices held in the identifier map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Maximum number of concurrently tracked proposals.
    pub slot_capacity: usize,

    /// Voting window length in seconds, measured from proposal creation.
    pub voting_duration_secs: u64,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            slot_capacity: DEFAULT_SLOT_CAPACITY,
            voting_duration_secs: DEFAULT_VOTING_DURATION_SECS,
        }
    }
}
