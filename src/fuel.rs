//! [`ChainClient`] backed by the Fuel Rust SDK.

use crate::chain::{CallReceipt, ChainClient, ChainError, ContractCall};
use crate::target::DeploymentTarget;
use async_trait::async_trait;
use fuel_tx::{Address, ContractId, TxId};
use fuels::accounts::provider::Provider;
use fuels::accounts::wallet::WalletUnlocked;
use fuels::core::codec::{EncoderConfig, LogDecoder, encode_fn_selector};
use fuels::core::traits::{Parameterize, Tokenizable};
use fuels::crypto::SecretKey;
use fuels::programs::calls::{CallHandler, ContractCall as SdkContractCall, Execution};
use fuels::programs::contract::Contract;
use fuels::tx::Receipt;
use fuels::types::bech32::Bech32ContractId;
use fuels::types::errors::Error as SdkError;
use fuels::types::errors::transaction::Reason;
use fuels::types::transaction::{Transaction as _, TxPolicies};
use std::fmt::Debug;
use std::str::FromStr;

impl From<SdkError> for ChainError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Transaction(Reason::Reverted { reason, .. }) => ChainError::Reverted { reason },
            other => ChainError::Sdk(other.to_string()),
        }
    }
}

/// A connection to a Fuel node with an unlocked signing wallet
#[derive(Debug, Clone)]
pub struct FuelChain {
    provider: Provider,
    wallet: WalletUnlocked,
}

impl FuelChain {
    /// Connects to the node at `node_url` and unlocks `private_key` against it.
    pub async fn connect(node_url: &str, private_key: &str) -> Result<Self, ChainError> {
        let secret =
            SecretKey::from_str(private_key).map_err(|e| ChainError::InvalidKey(e.to_string()))?;

        let provider = Provider::connect(node_url).await?;
        let wallet = WalletUnlocked::new_from_private_key(secret, Some(provider.clone()));

        tracing::debug!(
            "Connected to `{node_url}` (chain id {})",
            provider.chain_id()
        );

        Ok(Self { provider, wallet })
    }

    fn call_handler<T>(&self, call: &ContractCall) -> CallHandler<WalletUnlocked, SdkContractCall, T>
    where
        T: Tokenizable + Parameterize + Debug + Send + Sync,
    {
        let external_contracts = call
            .external_contracts
            .iter()
            .map(sdk_contract_id)
            .collect::<Vec<_>>();

        CallHandler::new_contract_call(
            sdk_contract_id(&call.contract_id),
            self.wallet.clone(),
            encode_fn_selector(call.method),
            &call.args,
            LogDecoder::default(),
            false,
            EncoderConfig::default(),
        )
        .with_contract_ids(&external_contracts)
    }
}

fn sdk_contract_id(id: &ContractId) -> Bech32ContractId {
    Bech32ContractId::from(*id)
}

#[async_trait]
impl ChainClient for FuelChain {
    fn account(&self) -> Address {
        Address::from(self.wallet.address())
    }

    async fn contract_exists(&self, id: &ContractId) -> Result<bool, ChainError> {
        Ok(self.provider.contract_exists(&sdk_contract_id(id)).await?)
    }

    async fn deploy(&self, target: &DeploymentTarget) -> Result<ContractId, ChainError> {
        let contract = Contract::regular(
            target.bytecode.clone(),
            target.salt,
            target.storage_slots.clone(),
        );

        let deployed = contract.deploy(&self.wallet, TxPolicies::default()).await?;
        Ok(ContractId::from(&deployed))
    }

    async fn submit(&self, call: &ContractCall) -> Result<CallReceipt, ChainError> {
        // `build_tx` funds and signs. Sending the transaction ourselves skips decoding the
        // return value and logs, which we have no ABI for.
        let tx = self.call_handler::<()>(call).build_tx().await?;
        let tx_id: TxId = tx.id(self.provider.chain_id());

        let receipts = self
            .provider
            .send_transaction_and_await_commit(tx)
            .await?
            .take_receipts_checked(None)?;

        let gas_used = receipts
            .iter()
            .filter_map(|receipt| match receipt {
                Receipt::ScriptResult { gas_used, .. } => Some(*gas_used),
                _ => None,
            })
            .sum();
        let logs = receipts
            .iter()
            .filter(|receipt| matches!(receipt, Receipt::Log { .. } | Receipt::LogData { .. }))
            .count();

        Ok(CallReceipt {
            tx_id,
            gas_used,
            logs,
        })
    }

    async fn simulate<T>(&self, call: &ContractCall) -> Result<T, ChainError>
    where
        T: Tokenizable + Parameterize + Debug + Send + Sync + 'static,
    {
        let mut handler = self.call_handler::<T>(call);
        let response = handler.simulate(Execution::StateReadOnly).await?;
        Ok(response.value)
    }
}
