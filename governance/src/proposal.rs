//! Proposals and their lifecycle.

use agora_types::{Checkpoint, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// A tracked proposal occupying one slot.
///
/// Never deleted — superseded in place when its slot is reused. Natural
/// expiry is implicit (a query-time comparison against `expires_at`, no
/// stored flag); finalization is explicit and forces `expires_at` to
/// `Timestamp::EPOCH` so the slot reads as expired immediately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// The opaque identifier votes are tallied against.
    pub id: ProposalId,
    /// Running sum of agreeing vote weights.
    pub agreements: u128,
    /// Running sum of disagreeing vote weights.
    pub disagreements: u128,
    /// End of the voting window. `Timestamp::EPOCH` once finalized.
    pub expires_at: Timestamp,
    /// Ledger checkpoint every vote on this proposal is weighed at.
    pub creation_checkpoint: Checkpoint,
}

impl Proposal {
    /// A freshly created proposal with zeroed tallies.
    pub fn new(id: ProposalId, expires_at: Timestamp, creation_checkpoint: Checkpoint) -> Self {
        Self {
            id,
            agreements: 0,
            disagreements: 0,
            expires_at,
            creation_checkpoint,
        }
    }

    /// Whether this proposal still accepts votes at `now`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.expires_at.is_future(now)
    }

    /// The side a strict majority of `supply` has been reached on, if any.
    ///
    /// Strict `>`: a side holding exactly half of the historical supply does
    /// not finalize — the proposal runs to natural expiry instead.
    pub fn majority_outcome(&self, supply: u128) -> Option<ProposalOutcome> {
        let threshold = supply / 2;
        if self.agreements > threshold {
            Some(ProposalOutcome::Accepted)
        } else if self.disagreements > threshold {
            Some(ProposalOutcome::Rejected)
        } else {
            None
        }
    }
}

/// Terminal outcome of a finalized proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalOutcome {
    Accepted,
    Rejected,
}

impl ProposalOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(agreements: u128, disagreements: u128) -> Proposal {
        let mut p = Proposal::new(
            ProposalId::new([1; 32]),
            Timestamp::new(1000),
            Checkpoint::GENESIS,
        );
        p.agreements = agreements;
        p.disagreements = disagreements;
        p
    }

    #[test]
    fn test_active_until_expiry() {
        let p = proposal(0, 0);
        assert!(p.is_active(Timestamp::new(999)));
        assert!(!p.is_active(Timestamp::new(1000)));
        assert!(!p.is_active(Timestamp::new(1001)));
    }

    #[test]
    fn test_strict_majority_required() {
        // Supply 100 → threshold 50; exactly 50 never finalizes
        assert_eq!(proposal(50, 0).majority_outcome(100), None);
        assert_eq!(
            proposal(51, 0).majority_outcome(100),
            Some(ProposalOutcome::Accepted)
        );
        assert_eq!(proposal(0, 50).majority_outcome(100), None);
        assert_eq!(
            proposal(0, 51).majority_outcome(100),
            Some(ProposalOutcome::Rejected)
        );
    }

    #[test]
    fn test_odd_supply_integer_division() {
        // Supply 101 → threshold 50; 51 is a strict majority
        assert_eq!(
            proposal(51, 0).majority_outcome(101),
            Some(ProposalOutcome::Accepted)
        );
        assert_eq!(proposal(50, 0).majority_outcome(101), None);
    }

    #[test]
    fn test_agreement_side_checked_first() {
        // Both sides over threshold cannot happen with a consistent ledger,
        // but the tie-break is deterministic regardless.
        assert_eq!(
            proposal(60, 60).majority_outcome(100),
            Some(ProposalOutcome::Accepted)
        );
    }
}
