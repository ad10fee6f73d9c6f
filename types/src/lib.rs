//! Fundamental types for the agora governance engine.
//!
//! This crate defines the core types shared by every other crate in the
//! workspace: account addresses, proposal identifiers, timestamps, ledger
//! checkpoints, and governance parameters.

pub mod address;
pub mod checkpoint;
pub mod id;
pub mod params;
pub mod time;

pub use address::AccountAddress;
pub use checkpoint::Checkpoint;
pub use id::ProposalId;
pub use params::GovernanceParams;
pub use time::Timestamp;
