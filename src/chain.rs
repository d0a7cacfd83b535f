//! The seam between the deploy flow and a Fuel node.
//!
//! Everything hard (transaction building, signing, ABI encoding, consensus) happens behind
//! [`ChainClient`]. The deploy flow only needs to know whether a contract exists, how to
//! deploy one, and how to submit or simulate a call.

use crate::target::DeploymentTarget;
use async_trait::async_trait;
use fuel_tx::{Address, ContractId, TxId};
use fuels::core::traits::{Parameterize, Tokenizable};
use fuels::types::Token;
use std::fmt::Debug;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The VM executed the call and it reverted
    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    /// Anything else the node or SDK reported (connectivity, validation, decoding)
    #[error("{0}")]
    Sdk(String),
}

impl ChainError {
    pub fn is_revert(&self) -> bool {
        matches!(self, ChainError::Reverted { .. })
    }
}

/// A contract method invocation, independent of how it is executed
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub contract_id: ContractId,
    pub method: &'static str,
    pub args: Vec<Token>,
    /// Other contracts this call reaches. The VM rejects inter-contract calls to anything
    /// not listed as an input.
    pub external_contracts: Vec<ContractId>,
}

impl ContractCall {
    pub fn new(contract_id: ContractId, method: &'static str) -> Self {
        Self {
            contract_id,
            method,
            args: Vec::new(),
            external_contracts: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Tokenizable) -> Self {
        self.args.push(arg.into_token());
        self
    }

    #[must_use]
    pub fn with_external_contract(mut self, contract_id: ContractId) -> Self {
        if !self.external_contracts.contains(&contract_id) {
            self.external_contracts.push(contract_id);
        }
        self
    }
}

/// Outcome of a committed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt {
    pub tx_id: TxId,
    pub gas_used: u64,
    pub logs: usize,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the account that signs and pays for transactions
    fn account(&self) -> Address;

    /// The ID `target` is (or would be) deployed at
    fn contract_id(&self, target: &DeploymentTarget) -> ContractId {
        target.expected_id()
    }

    async fn contract_exists(&self, id: &ContractId) -> Result<bool, ChainError>;

    /// Submits a create transaction for `target` and waits for it to be committed.
    async fn deploy(&self, target: &DeploymentTarget) -> Result<ContractId, ChainError>;

    /// Submits `call` as a script transaction and waits for it to be committed.
    async fn submit(&self, call: &ContractCall) -> Result<CallReceipt, ChainError>;

    /// Dry-runs `call` against current state without committing anything.
    async fn simulate<T>(&self, call: &ContractCall) -> Result<T, ChainError>
    where
        T: Tokenizable + Parameterize + Debug + Send + Sync + 'static;
}
