use agora_types::Checkpoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("checkpoint {attempted} precedes the latest recorded checkpoint {latest}")]
    CheckpointRegression {
        attempted: Checkpoint,
        latest: Checkpoint,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}
