//! Fixed-capacity proposal slot pool.
//!
//! The engine tracks at most N proposals at a time. Slots are explicit
//! `Option<Proposal>` positions plus a separate identifier → index map — no
//! magic-zero sentinel slot. A slot is reusable once its occupant's voting
//! window is over; allocation scans in index order and takes the first
//! reusable slot (a deterministic tie-break, not a correctness requirement).

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use agora_types::{ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The slot pool and identifier index.
///
/// Invariant: every index entry points at a slot whose occupant carries the
/// same identifier. Stale occupants (expired, awaiting reuse) may lose their
/// index entry; they remain visible in the raw slot snapshot until reused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotAllocator {
    slots: Vec<Option<Proposal>>,
    index: HashMap<ProposalId, usize>,
}

impl SlotAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            index: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raw snapshot of all slots in index order, stale occupants included.
    /// Callers filter by `expires_at` themselves — the pool never purges.
    pub fn slots(&self) -> &[Option<Proposal>] {
        &self.slots
    }

    /// Whether `id` currently occupies a slot that still accepts votes.
    pub fn is_active(&self, id: &ProposalId, now: Timestamp) -> bool {
        self.index
            .get(id)
            .and_then(|&idx| self.slots[idx].as_ref())
            .is_some_and(|p| p.is_active(now))
    }

    /// Resolve `id` to the index of its active slot.
    pub fn resolve_active(
        &self,
        id: &ProposalId,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        let idx = *self
            .index
            .get(id)
            .ok_or(GovernanceError::ProposalNotFound(*id))?;
        let proposal = self.slots[idx]
            .as_ref()
            .ok_or(GovernanceError::ProposalNotFound(*id))?;
        if !proposal.is_active(now) {
            return Err(GovernanceError::ExpiredOrFinalized(*id));
        }
        Ok(idx)
    }

    /// First slot eligible for (re)use at `now`: empty, or occupied by a
    /// proposal whose voting window is over.
    pub fn find_reusable(&self, now: Timestamp) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_none_or(|p| !p.is_active(now)))
    }

    /// Bind `proposal` to slot `idx`, evicting the stale occupant's index
    /// entry so at most one identifier ever maps to a given slot.
    pub fn bind(&mut self, idx: usize, proposal: Proposal) {
        if let Some(old) = &self.slots[idx] {
            // Only evict if the mapping still points here; the old id may
            // have been re-created into a different slot already.
            if self.index.get(&old.id) == Some(&idx) {
                self.index.remove(&old.id);
            }
        }
        self.index.insert(proposal.id, idx);
        self.slots[idx] = Some(proposal);
    }

    pub fn get(&self, idx: usize) -> Option<&Proposal> {
        self.slots[idx].as_ref()
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Proposal> {
        self.slots[idx].as_mut()
    }
}
