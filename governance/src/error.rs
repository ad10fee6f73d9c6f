use agora_types::{AccountAddress, Checkpoint, ProposalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("account {0} has no voting power")]
    NoVotingPower(AccountAddress),

    #[error("proposal {0} is already active")]
    DuplicateActiveProposal(ProposalId),

    #[error("all {capacity} proposal slots hold unexpired proposals")]
    NoFreeSlot { capacity: usize },

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal {0} has expired or been finalized")]
    ExpiredOrFinalized(ProposalId),

    #[error("account {account} had no voting power at checkpoint {checkpoint}")]
    InsufficientWeight {
        account: AccountAddress,
        checkpoint: Checkpoint,
    },

    #[error("tally arithmetic overflow")]
    Overflow,
}
