use crate::chain::{ChainClient, ChainError, ContractCall};
use crate::resolver::ContractHandle;
use fuel_tx::Bytes32;
use fuels::types::Bits256;
use std::fmt;

pub const LATEST_CHECKPOINT: &str = "latest_checkpoint";

/// Merkle root over every dispatched message, and the index of the newest one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub root: Bytes32,
    pub index: u32,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root 0x{} at index {}", self.root, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointRead {
    Available(Checkpoint),
    /// The mailbox reverted the read, which it does until the first message is dispatched
    Empty { reason: String },
}

/// Reads the mailbox's latest checkpoint with a read-only dry run.
///
/// A revert is reported as [`CheckpointRead::Empty`]; only transport and SDK failures are
/// errors.
pub async fn latest_checkpoint<C: ChainClient>(
    client: &C,
    mailbox: &ContractHandle,
) -> Result<CheckpointRead, ChainError> {
    let call = ContractCall::new(mailbox.id, LATEST_CHECKPOINT);

    match client.simulate::<(Bits256, u32)>(&call).await {
        Ok((root, index)) => Ok(CheckpointRead::Available(Checkpoint {
            root: Bytes32::new(root.0),
            index,
        })),
        Err(ChainError::Reverted { reason }) => Ok(CheckpointRead::Empty { reason }),
        Err(e) => Err(e),
    }
}
