use crate::chain::{ChainClient, ChainError};
use crate::target::{ContractAbi, DeploymentTarget};
use fuel_tx::{Address, ContractId};
use std::fmt;

/// How a [`ContractHandle`] was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStatus {
    /// A contract was already live at the expected ID; nothing was submitted
    Existing,
    /// This run submitted the deployment
    Deployed,
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStatus::Existing => f.write_str("existing"),
            DeployStatus::Deployed => f.write_str("deployed"),
        }
    }
}

/// A live contract that calls can be made against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    pub id: ContractId,
    pub abi: ContractAbi,
    /// Account calls through this handle are signed by
    pub account: Address,
    pub status: DeployStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("{abi} was deployed at 0x{actual}, but its bytecode, salt and storage give 0x{expected}")]
    ContractIdMismatch {
        abi: ContractAbi,
        expected: ContractId,
        actual: ContractId,
    },
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Returns a handle to `target`, deploying it only if nothing is live at its ID yet.
///
/// Running this any number of times against the same chain submits at most one deployment
/// per (bytecode, salt, storage) triple. Two concurrent runs can both observe the contract
/// as missing and both submit; the second deployment is then rejected by the node.
#[tracing::instrument(skip_all, fields(contract = %target.abi))]
pub async fn deploy_or_get<C: ChainClient>(
    client: &C,
    target: &DeploymentTarget,
) -> Result<ContractHandle, DeployError> {
    let expected = client.contract_id(target);

    let status = if client.contract_exists(&expected).await? {
        tracing::info!("Contract already deployed at 0x{expected}");
        DeployStatus::Existing
    } else {
        tracing::info!("Deploying contract...");
        let actual = client.deploy(target).await?;
        if actual != expected {
            return Err(DeployError::ContractIdMismatch {
                abi: target.abi,
                expected,
                actual,
            });
        }

        tracing::info!("Deployed contract at 0x{actual}");
        DeployStatus::Deployed
    };

    Ok(ContractHandle {
        id: expected,
        abi: target.abi,
        account: client.account(),
        status,
    })
}
