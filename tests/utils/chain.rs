use async_trait::async_trait;
use fuel_tx::{Address, Bytes32, ContractId, TxId};
use fuels::core::traits::{Parameterize, Tokenizable};
use fuels::types::Token;
use hyperlane_fuel_deploy_lib::message::{HyperlaneMessage, MESSAGE_VERSION};
use hyperlane_fuel_deploy_lib::{
    CallReceipt, ChainClient, ChainError, ContractAbi, ContractCall, DeploymentTarget,
};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::fmt::Debug;
use tokio::sync::Mutex;

use super::LOCAL_DOMAIN;

/// Address of the account every [`MemoryChain`] signs with
pub const ACCOUNT: Address = Address::new([0x6b; 32]);

#[derive(Debug, Default)]
struct Mailbox {
    count: u32,
    root: [u8; 32],
    dispatched: Vec<Bytes32>,
}

impl Mailbox {
    fn insert(&mut self, message: &HyperlaneMessage) {
        let id = message.id();
        let mut hasher = Keccak256::new();
        hasher.update(self.root);
        hasher.update(*id);
        self.root = hasher.finalize().into();
        self.count += 1;
        self.dispatched.push(id);
    }
}

#[derive(Debug)]
struct Deployed {
    abi: ContractAbi,
    mailbox: Mailbox,
}

#[derive(Debug, Default)]
struct State {
    contracts: HashMap<ContractId, Deployed>,
    deploy_txs: usize,
    script_txs: u64,
}

/// In-memory stand-in for a Fuel node running the mailbox and test recipient contracts.
///
/// It assigns IDs the way the node does, rejects duplicate deployments, and models the
/// mailbox's message count and checkpoint, including the revert on an empty mailbox.
#[derive(Debug, Default)]
pub struct MemoryChain {
    state: Mutex<State>,
    assigned_id: Option<ContractId>,
    unreachable: bool,
    revert_dispatch: bool,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain that reports every deployment at `id` instead of the computed one
    pub fn assigning(id: ContractId) -> Self {
        Self {
            assigned_id: Some(id),
            ..Self::default()
        }
    }

    /// A chain that fails every existence query as if the node were down
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// A chain whose contracts revert every `dispatch`
    pub fn reverting_dispatch() -> Self {
        Self {
            revert_dispatch: true,
            ..Self::default()
        }
    }

    /// Number of create transactions the chain has accepted
    pub async fn deploy_txs(&self) -> usize {
        self.state.lock().await.deploy_txs
    }

    /// IDs of every message the mailbox at `mailbox` has recorded, oldest first
    pub async fn dispatched(&self, mailbox: ContractId) -> Vec<Bytes32> {
        self.state
            .lock()
            .await
            .contracts
            .get(&mailbox)
            .map(|c| c.mailbox.dispatched.clone())
            .unwrap_or_default()
    }
}

fn revert(reason: &str) -> ChainError {
    ChainError::Reverted {
        reason: reason.to_string(),
    }
}

fn b256(token: Option<&Token>) -> Result<[u8; 32], ChainError> {
    match token {
        Some(Token::B256(bytes)) => Ok(*bytes),
        other => Err(ChainError::Sdk(format!("expected b256, got {other:?}"))),
    }
}

fn u32_arg(token: Option<&Token>) -> Result<u32, ChainError> {
    match token {
        Some(Token::U32(value)) => Ok(*value),
        other => Err(ChainError::Sdk(format!("expected u32, got {other:?}"))),
    }
}

fn byte_vec(token: Option<&Token>) -> Result<Vec<u8>, ChainError> {
    match token {
        Some(Token::Bytes(bytes)) => Ok(bytes.clone()),
        Some(Token::Vector(tokens)) => tokens
            .iter()
            .map(|t| match t {
                Token::U8(b) => Ok(*b),
                other => Err(ChainError::Sdk(format!("expected u8, got {other:?}"))),
            })
            .collect(),
        other => Err(ChainError::Sdk(format!("expected bytes, got {other:?}"))),
    }
}

#[async_trait]
impl ChainClient for MemoryChain {
    fn account(&self) -> Address {
        ACCOUNT
    }

    async fn contract_exists(&self, id: &ContractId) -> Result<bool, ChainError> {
        if self.unreachable {
            return Err(ChainError::Sdk("connection refused".to_string()));
        }
        Ok(self.state.lock().await.contracts.contains_key(id))
    }

    async fn deploy(&self, target: &DeploymentTarget) -> Result<ContractId, ChainError> {
        let id = self.assigned_id.unwrap_or_else(|| target.expected_id());

        let mut state = self.state.lock().await;
        if state.contracts.contains_key(&id) {
            return Err(ChainError::Sdk(format!("contract 0x{id} already exists")));
        }

        state.contracts.insert(
            id,
            Deployed {
                abi: target.abi,
                mailbox: Mailbox::default(),
            },
        );
        state.deploy_txs += 1;
        Ok(id)
    }

    async fn submit(&self, call: &ContractCall) -> Result<CallReceipt, ChainError> {
        let mut state = self.state.lock().await;
        let abi = state
            .contracts
            .get(&call.contract_id)
            .map(|c| c.abi)
            .ok_or_else(|| revert("contract not found"))?;

        if call.method != "dispatch" {
            return Err(revert(&format!("unknown method `{}`", call.method)));
        }
        if self.revert_dispatch {
            return Err(revert("contract is paused"));
        }

        let (mailbox_id, destination, recipient, body, sender) = match abi {
            ContractAbi::TestRecipient => {
                let mailbox_id = ContractId::new(b256(call.args.get(1))?);
                if !call.external_contracts.contains(&mailbox_id) {
                    return Err(revert("ContractNotInInputs"));
                }
                (
                    mailbox_id,
                    u32_arg(call.args.get(2))?,
                    b256(call.args.get(3))?,
                    byte_vec(call.args.first())?,
                    *call.contract_id,
                )
            }
            ContractAbi::Mailbox => (
                call.contract_id,
                u32_arg(call.args.first())?,
                b256(call.args.get(1))?,
                byte_vec(call.args.get(2))?,
                *ACCOUNT,
            ),
        };

        let mailbox = match state.contracts.get_mut(&mailbox_id) {
            Some(Deployed {
                abi: ContractAbi::Mailbox,
                mailbox,
            }) => mailbox,
            _ => return Err(revert("mailbox not found")),
        };

        let message = HyperlaneMessage {
            version: MESSAGE_VERSION,
            nonce: mailbox.count,
            origin: LOCAL_DOMAIN,
            sender: Bytes32::new(sender),
            destination,
            recipient: Bytes32::new(recipient),
            body,
        };
        mailbox.insert(&message);

        state.script_txs += 1;
        let mut tx_id = [0u8; 32];
        tx_id[24..].copy_from_slice(&state.script_txs.to_be_bytes());

        Ok(CallReceipt {
            tx_id: TxId::new(tx_id),
            gas_used: 21_000,
            logs: 2,
        })
    }

    async fn simulate<T>(&self, call: &ContractCall) -> Result<T, ChainError>
    where
        T: Tokenizable + Parameterize + Debug + Send + Sync + 'static,
    {
        let state = self.state.lock().await;
        let mailbox = match state.contracts.get(&call.contract_id) {
            Some(Deployed {
                abi: ContractAbi::Mailbox,
                mailbox,
            }) => mailbox,
            _ => return Err(revert("mailbox not found")),
        };

        let token = match call.method {
            "count" => Token::U32(mailbox.count),
            "latest_checkpoint" => {
                if mailbox.count == 0 {
                    return Err(revert("no messages dispatched"));
                }
                Token::Tuple(vec![Token::B256(mailbox.root), Token::U32(mailbox.count - 1)])
            }
            other => return Err(revert(&format!("unknown method `{other}`"))),
        };

        T::from_token(token).map_err(|e| ChainError::Sdk(e.to_string()))
    }
}
