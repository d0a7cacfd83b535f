pub mod chain;
pub mod checkpoint;
pub mod config;
pub mod contract_id;
pub mod deployment;
pub mod dispatch;
pub mod fuel;
pub mod message;
pub mod resolver;
pub mod target;

pub use chain::{CallReceipt, ChainClient, ChainError, ContractCall};
pub use checkpoint::{Checkpoint, CheckpointRead};
pub use config::{DeployConfig, DispatchParams, DispatchRoute, RunMode};
pub use fuel::FuelChain;
pub use resolver::{ContractHandle, DeployError, DeployStatus, deploy_or_get};
pub use target::{ArtifactSource, ContractAbi, DeploymentTarget};

use color_eyre::Result;
use deployment::DeploymentRecord;
use fuel_tx::Bytes32;

/// What happened to the test message in `send-message` mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Committed {
        receipt: CallReceipt,
        /// ID of the message the mailbox was expected to emit
        message_id: Bytes32,
        count: u32,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mailbox: ContractHandle,
    pub recipient: Option<ContractHandle>,
    pub dispatch: Option<DispatchOutcome>,
    pub checkpoint: CheckpointRead,
}

/// Deploy targets resolved from [`DeployConfig`]
#[derive(Debug, Clone)]
pub struct Targets {
    pub mailbox: DeploymentTarget,
    pub recipient: Option<DeploymentTarget>,
}

pub struct DeployContext<C> {
    pub config: DeployConfig,
    client: C,
}

impl DeployContext<FuelChain> {
    /// Connects to `config.node_url`, signing with `config.private_key`.
    pub async fn connect(config: DeployConfig) -> Result<Self> {
        tracing::info!("Connecting to Fuel node at `{}`", config.node_url);
        let client = FuelChain::connect(&config.node_url, &config.private_key).await?;
        Ok(Self::new(config, client))
    }
}

impl<C: ChainClient> DeployContext<C> {
    pub fn new(config: DeployConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Reads the configured artifacts. The recipient is skipped when dispatching directly.
    pub async fn load_targets(&self) -> Result<Targets> {
        let mailbox =
            DeploymentTarget::load(ContractAbi::Mailbox, &self.config.mailbox, self.config.salt)
                .await?;

        let recipient = match self.config.route {
            DispatchRoute::ViaRecipient => Some(
                DeploymentTarget::load(
                    ContractAbi::TestRecipient,
                    &self.config.recipient,
                    self.config.salt,
                )
                .await?,
            ),
            DispatchRoute::Direct => None,
        };

        Ok(Targets { mailbox, recipient })
    }

    /// Loads the artifacts and runs the whole flow.
    pub async fn run(&self, mode: RunMode) -> Result<RunSummary> {
        let targets = self.load_targets().await?;
        self.run_with_targets(&targets, mode).await
    }

    /// Resolves both contracts, optionally dispatches the test message, then reads the
    /// mailbox's latest checkpoint.
    pub async fn run_with_targets(&self, targets: &Targets, mode: RunMode) -> Result<RunSummary> {
        let mailbox = deploy_or_get(&self.client, &targets.mailbox).await?;
        let recipient = match &targets.recipient {
            Some(target) => Some(deploy_or_get(&self.client, target).await?),
            None => None,
        };

        tracing::info!(
            mailbox = %format!("0x{}", mailbox.id),
            test_recipient = %recipient
                .as_ref()
                .map_or_else(|| String::from("-"), |r| format!("0x{}", r.id)),
            "Contract IDs"
        );

        if let Some(path) = &self.config.deployments_out {
            DeploymentRecord::new(
                &self.config.node_url,
                &self.config.salt,
                std::iter::once(&mailbox).chain(recipient.as_ref()),
            )
            .to_file(path)?;
        }

        let dispatch = match mode {
            RunMode::SendMessage => {
                Some(self.send_test_message(&mailbox, recipient.as_ref()).await?)
            }
            RunMode::DeployOnly => None,
        };

        let checkpoint = checkpoint::latest_checkpoint(&self.client, &mailbox).await?;
        match &checkpoint {
            CheckpointRead::Available(checkpoint) => {
                tracing::info!("Current latest checkpoint: {checkpoint}");
            }
            CheckpointRead::Empty { reason } => {
                tracing::info!(
                    "No checkpoint yet ({reason}), this is expected if no messages have been sent"
                );
            }
        }

        Ok(RunSummary {
            mailbox,
            recipient,
            dispatch,
            checkpoint,
        })
    }

    /// Dispatches the configured test message. A failed dispatch transaction is logged and
    /// reported in the outcome rather than aborting the run.
    async fn send_test_message(
        &self,
        mailbox: &ContractHandle,
        recipient: Option<&ContractHandle>,
    ) -> Result<DispatchOutcome> {
        let params = &self.config.dispatch;

        let nonce = dispatch::message_count(&self.client, mailbox).await?;
        let message_id = dispatch::expected_message(
            mailbox,
            recipient,
            params,
            self.config.local_domain,
            nonce,
        )
        .id();
        tracing::info!(
            nonce,
            destination = params.destination_domain,
            "Dispatching message 0x{message_id}"
        );

        match dispatch::dispatch_message(&self.client, mailbox, recipient, params).await {
            Ok(receipt) => {
                let count = dispatch::message_count(&self.client, mailbox).await?;
                tracing::info!(
                    tx_id = %format!("0x{}", receipt.tx_id),
                    gas_used = receipt.gas_used,
                    logs = receipt.logs,
                    count,
                    "Dispatched message"
                );

                Ok(DispatchOutcome::Committed {
                    receipt,
                    message_id,
                    count,
                })
            }
            Err(e) => {
                tracing::error!("Dispatch failed: {e}");
                Ok(DispatchOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
