//! Append-only event log.
//!
//! Every successful state-mutating operation appends tagged records here;
//! failed operations append nothing. The log is the canonical way to recover
//! history for proposals whose slots have since been reused.

use agora_types::{AccountAddress, Checkpoint, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// Notifications produced by the governance engine for external observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    /// A proposal was bound to a slot.
    ProposalCreated {
        id: ProposalId,
        expires_at: Timestamp,
        creation_checkpoint: Checkpoint,
        requester: AccountAddress,
    },
    /// A vote was weighed and applied to the tallies.
    VoteCounted {
        id: ProposalId,
        account: AccountAddress,
        weight: u128,
        agree: bool,
    },
    /// A side reached a strict majority of historical supply.
    ProposalVotingFinished {
        id: ProposalId,
        accepted: bool,
        agreements: u128,
        disagreements: u128,
    },
}

/// The append-only log itself. No removal, no reordering.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GovernanceEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, event: GovernanceEvent) {
        self.events.push(event);
    }

    /// All events in emission order.
    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }
}
