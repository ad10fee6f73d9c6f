//! Core governance engine — slot allocation, weighted tallying, finalization.

use crate::error::GovernanceError;
use crate::events::{EventLog, GovernanceEvent};
use crate::proposal::{Proposal, ProposalOutcome};
use crate::slots::SlotAllocator;
use crate::votes::{VoteRecord, VoteRecordStore};
use agora_ledger::VotingPowerLedger;
use agora_types::{AccountAddress, Checkpoint, GovernanceParams, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// The governance engine — owns the slot pool, vote records, and event log.
///
/// The voting-power ledger is injected per operation, and so are the trusted
/// clock (`now`) and the current ledger checkpoint: each operation is a pure
/// function of state and explicit inputs, so replaying the same operation
/// sequence always converges to the same state.
///
/// Execution is strictly serialized by the hosting environment. Every
/// operation validates fully before its first mutation — a failure leaves
/// the slots, records, and event log exactly as they were.
pub struct GovernanceEngine {
    slots: SlotAllocator,
    votes: VoteRecordStore,
    events: EventLog,
    params: GovernanceParams,
}

impl GovernanceEngine {
    pub fn new(params: GovernanceParams) -> Self {
        Self {
            slots: SlotAllocator::new(params.slot_capacity),
            votes: VoteRecordStore::new(),
            events: EventLog::new(),
            params,
        }
    }

    /// Bind a new proposal to the first reusable slot.
    ///
    /// The requester only needs nonzero *current* power — a cheap spam gate,
    /// distinct from the historical-weight check used when voting.
    pub fn create_proposal(
        &mut self,
        id: ProposalId,
        requester: &AccountAddress,
        ledger: &dyn VotingPowerLedger,
        now: Timestamp,
        checkpoint: Checkpoint,
    ) -> Result<(), GovernanceError> {
        if ledger.current_voting_power(requester) == 0 {
            return Err(GovernanceError::NoVotingPower(requester.clone()));
        }
        if self.slots.is_active(&id, now) {
            return Err(GovernanceError::DuplicateActiveProposal(id));
        }
        let idx = self
            .slots
            .find_reusable(now)
            .ok_or(GovernanceError::NoFreeSlot {
                capacity: self.slots.capacity(),
            })?;

        let expires_at = now.plus_secs(self.params.voting_duration_secs);
        self.slots.bind(idx, Proposal::new(id, expires_at, checkpoint));
        tracing::debug!(
            id = %id,
            slot = idx,
            expires_at = %expires_at,
            checkpoint = %checkpoint,
            requester = %requester,
            "proposal created"
        );
        self.events.append(GovernanceEvent::ProposalCreated {
            id,
            expires_at,
            creation_checkpoint: checkpoint,
            requester: requester.clone(),
        });
        Ok(())
    }

    /// Cast or change a vote on an active proposal.
    ///
    /// The vote is weighed at the proposal's creation checkpoint. Revoting
    /// applies a delta: the prior contribution is removed from its side and
    /// the fresh weight added to the chosen side, so repeating the same vote
    /// nets to no tally change.
    pub fn vote(
        &mut self,
        id: ProposalId,
        voter: &AccountAddress,
        agree: bool,
        ledger: &dyn VotingPowerLedger,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let idx = self.slots.resolve_active(&id, now)?;
        let proposal = self.slots.get(idx).ok_or(GovernanceError::ProposalNotFound(id))?;
        let checkpoint = proposal.creation_checkpoint;

        let weight = ledger.historical_voting_power(voter, checkpoint);
        if weight == 0 {
            return Err(GovernanceError::InsufficientWeight {
                account: voter.clone(),
                checkpoint,
            });
        }

        // Stage the delta-updated tallies; nothing is written until both
        // sides are known to fit.
        let prior = self.votes.get(voter, &id);
        let mut agreements = proposal.agreements;
        let mut disagreements = proposal.disagreements;
        if prior.agreed {
            agreements = agreements.saturating_sub(prior.weight);
        } else {
            disagreements = disagreements.saturating_sub(prior.weight);
        }
        if agree {
            agreements = agreements
                .checked_add(weight)
                .ok_or(GovernanceError::Overflow)?;
        } else {
            disagreements = disagreements
                .checked_add(weight)
                .ok_or(GovernanceError::Overflow)?;
        }

        let proposal = self
            .slots
            .get_mut(idx)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        proposal.agreements = agreements;
        proposal.disagreements = disagreements;
        self.votes.put(voter, id, VoteRecord::new(agree, weight));
        tracing::debug!(
            id = %id,
            account = %voter,
            weight,
            agree,
            agreements,
            disagreements,
            "vote counted"
        );
        self.events.append(GovernanceEvent::VoteCounted {
            id,
            account: voter.clone(),
            weight,
            agree,
        });

        self.evaluate_finalization(idx, ledger);
        Ok(())
    }

    /// Check the majority threshold after an accepted vote and finalize if a
    /// side strictly exceeds half of the historical supply.
    ///
    /// Finalizing forces `expires_at` to `Timestamp::EPOCH` — the slot reads
    /// as expired from then on and becomes eligible for reuse.
    fn evaluate_finalization(&mut self, idx: usize, ledger: &dyn VotingPowerLedger) {
        let Some(proposal) = self.slots.get(idx) else {
            return;
        };
        let supply = ledger.historical_total_supply(proposal.creation_checkpoint);
        let Some(outcome) = proposal.majority_outcome(supply) else {
            return;
        };

        let (id, agreements, disagreements) =
            (proposal.id, proposal.agreements, proposal.disagreements);
        if let Some(proposal) = self.slots.get_mut(idx) {
            proposal.expires_at = Timestamp::EPOCH;
        }
        tracing::info!(
            id = %id,
            accepted = outcome.is_accepted(),
            agreements,
            disagreements,
            supply,
            "proposal voting finished"
        );
        self.events.append(GovernanceEvent::ProposalVotingFinished {
            id,
            accepted: outcome.is_accepted(),
            agreements,
            disagreements,
        });
    }

    /// The account's own vote record for `id`; zero value if it never voted.
    pub fn get_vote(&self, account: &AccountAddress, id: &ProposalId) -> VoteRecord {
        self.votes.get(account, id)
    }

    /// The active proposal bound to `id`.
    pub fn get_proposal(
        &self,
        id: &ProposalId,
        now: Timestamp,
    ) -> Result<&Proposal, GovernanceError> {
        let idx = self.slots.resolve_active(id, now)?;
        self.slots
            .get(idx)
            .ok_or(GovernanceError::ProposalNotFound(*id))
    }

    /// Raw snapshot of every slot in index order, stale occupants included.
    pub fn get_proposals(&self) -> &[Option<Proposal>] {
        self.slots.slots()
    }

    /// All events emitted so far, in emission order.
    pub fn events(&self) -> &[GovernanceEvent] {
        self.events.events()
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Outcome of the last finalization recorded for `id`, if any.
    ///
    /// Finalization is only observable through the event log once the slot
    /// has been reused, so this scans the log back to front.
    pub fn finalized_outcome(&self, id: &ProposalId) -> Option<ProposalOutcome> {
        self.events.events().iter().rev().find_map(|e| match e {
            GovernanceEvent::ProposalVotingFinished {
                id: event_id,
                accepted,
                ..
            } if event_id == id => Some(if *accepted {
                ProposalOutcome::Accepted
            } else {
                ProposalOutcome::Rejected
            }),
            _ => None,
        })
    }
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self::new(GovernanceParams::default())
    }
}

/// Meta-store key used for persisting the engine state.
const GOVERNANCE_ENGINE_META_KEY: &str = "governance_engine_state";

/// Serializable snapshot of the engine's in-memory state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub slots: SlotAllocator,
    pub votes: VoteRecordStore,
    pub events: EventLog,
    pub params: GovernanceParams,
}

impl GovernanceEngine {
    /// Serialize the engine state to bytes for meta-store persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = EngineSnapshot {
            slots: self.slots.clone(),
            votes: self.votes.clone(),
            events: self.events.clone(),
            params: self.params.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore the engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Self {
        match bincode::deserialize::<EngineSnapshot>(data) {
            Ok(snapshot) => Self {
                slots: snapshot.slots,
                votes: snapshot.votes,
                events: snapshot.events,
                params: snapshot.params,
            },
            Err(_) => Self::default(),
        }
    }

    /// The meta-store key used for engine persistence.
    pub fn meta_key() -> &'static str {
        GOVERNANCE_ENGINE_META_KEY
    }
}
