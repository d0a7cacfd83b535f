use clap::Parser;
use hyperlane_fuel_deploy_lib as deploy;
use deploy::config::{self, DeployConfig, DispatchParams, DispatchRoute, RunMode};
use deploy::{ArtifactSource, DispatchOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Deploys the Hyperlane mailbox and test recipient to a Fuel node if they aren't live yet,
/// optionally dispatching a test message between them.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Pass `send-message` to dispatch a test message after deploying
    mode: Option<String>,

    /// GraphQL endpoint of the Fuel node
    #[arg(long, env = "FUEL_NODE_URL", default_value = config::DEFAULT_NODE_URL)]
    node_url: String,

    /// Hex private key of the deploying account
    #[arg(
        long,
        env = "FUEL_PRIVATE_KEY",
        default_value = config::DEFAULT_PRIVATE_KEY,
        hide_default_value = true,
        hide_env_values = true
    )]
    private_key: String,

    /// Salt mixed into every contract ID
    #[arg(long, env = "CONTRACT_SALT", default_value = config::DEFAULT_SALT)]
    salt: String,

    /// Mailbox bytecode, as a path or URL
    #[arg(long, env = "MAILBOX_BIN", default_value = config::DEFAULT_MAILBOX_BIN)]
    mailbox_bin: String,

    /// Mailbox `*-storage_slots.json`, as a path or URL
    #[arg(long, env = "MAILBOX_STORAGE_SLOTS")]
    mailbox_storage_slots: Option<String>,

    /// Test recipient bytecode, as a path or URL
    #[arg(long, env = "RECIPIENT_BIN", default_value = config::DEFAULT_RECIPIENT_BIN)]
    recipient_bin: String,

    /// Test recipient `*-storage_slots.json`, as a path or URL
    #[arg(long, env = "RECIPIENT_STORAGE_SLOTS")]
    recipient_storage_slots: Option<String>,

    /// Skip the test recipient and dispatch on the mailbox directly
    #[arg(long)]
    direct: bool,

    #[arg(long, default_value_t = config::DEFAULT_DESTINATION_DOMAIN)]
    destination_domain: u32,

    /// 32 byte address the test message is sent to
    #[arg(long, default_value = config::DEFAULT_MESSAGE_RECIPIENT)]
    message_recipient: String,

    /// Comma separated message body bytes
    #[arg(long, value_delimiter = ',', default_value = "1,2,3,5,6")]
    body: Vec<u8>,

    /// Domain the mailbox was compiled with, used to predict the message ID
    #[arg(long, default_value_t = config::DEFAULT_LOCAL_DOMAIN)]
    local_domain: u32,

    /// Write a JSON summary of the resolved contracts here
    #[arg(long)]
    deployments_out: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> color_eyre::Result<DeployConfig> {
        let mut mailbox = ArtifactSource::new(self.mailbox_bin);
        mailbox.storage_slots = self.mailbox_storage_slots;
        let mut recipient = ArtifactSource::new(self.recipient_bin);
        recipient.storage_slots = self.recipient_storage_slots;

        Ok(DeployConfig {
            node_url: self.node_url,
            private_key: self.private_key,
            salt: config::parse_salt(&self.salt)?,
            mailbox,
            recipient,
            route: if self.direct {
                DispatchRoute::Direct
            } else {
                DispatchRoute::ViaRecipient
            },
            dispatch: DispatchParams {
                destination_domain: self.destination_domain,
                recipient: config::parse_bytes32(&self.message_recipient)?,
                body: self.body,
            },
            local_domain: self.local_domain,
            deployments_out: self.deployments_out,
        })
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    setup_log(LevelFilter::INFO);

    let cli = Cli::parse();
    let mode = RunMode::from_arg(cli.mode.as_deref());
    let config = cli.into_config()?;

    let result = async {
        let ctx = deploy::DeployContext::connect(config).await?;
        ctx.run(mode).await
    }
    .await;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Deployment failed! {e}");
            return Err(e);
        }
    };

    if let Some(DispatchOutcome::Failed { reason }) = &summary.dispatch {
        tracing::warn!("Finished, but the test message was not dispatched: {reason}");
    } else {
        tracing::info!("Done");
    }

    Ok(())
}

/// Logs to stderr at `default` unless `RUST_LOG` says otherwise
fn setup_log(default: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
