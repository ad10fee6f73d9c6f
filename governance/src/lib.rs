//! Bounded-capacity, token-weighted governance engine.
//!
//! Account holders with voting power open proposals (opaque identifiers) and
//! cast weighted votes until one side holds a strict majority of the token
//! supply — measured at the checkpoint the proposal was created at, so later
//! transfers never shift an open tally.
//!
//! The engine tracks a fixed number of proposal slots. A slot is reclaimed
//! the moment its occupant's voting window has elapsed or a majority has
//! finalized it; vote records outlive both.
//!
//! Key principle: votes are weighed by historical balance, not headcount,
//! and every operation is a pure function of (state, inputs, trusted clock)
//! so independent replays converge.

pub mod engine;
pub mod error;
pub mod events;
pub mod proposal;
pub mod slots;
pub mod votes;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use events::{EventLog, GovernanceEvent};
pub use proposal::{Proposal, ProposalOutcome};
pub use slots::SlotAllocator;
pub use votes::{VoteRecord, VoteRecordStore};
