use crate::target::ArtifactSource;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use fuel_tx::{Bytes32, Salt};
use std::path::PathBuf;

/// GraphQL endpoint of a locally running `fuel-core`
pub const DEFAULT_NODE_URL: &str = "127.0.0.1:4000";

/// First default account funded by a local `fuel-core` chain config.
///
/// Address: `0x6b63804cfbf9856e68e5b6e7aef238dc8311ec55bec04df774003a2c96e0418e`
pub const DEFAULT_PRIVATE_KEY: &str =
    "0xde97d8624a438121b86a1956544bd72ed68cd69f2c99555b08b1e8c51ffd511c";

/// Salt used for every deployment unless overridden, so IDs only move when bytecode does
pub const DEFAULT_SALT: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

pub const DEFAULT_MAILBOX_BIN: &str = "contracts/hyperlane-mailbox/out/debug/hyperlane-mailbox.bin";
pub const DEFAULT_RECIPIENT_BIN: &str =
    "contracts/hyperlane-msg-recipient-test/out/debug/hyperlane-msg-recipient-test.bin";

pub const DEFAULT_DESTINATION_DOMAIN: u32 = 420;
pub const DEFAULT_MESSAGE_RECIPIENT: &str =
    "0x6900000000000000000000000000000000000000000000000000000000000069";
pub const DEFAULT_MESSAGE_BODY: [u8; 5] = [1, 2, 3, 5, 6];

/// Origin domain the mailbox is compiled with (`"fuel"` as big-endian ASCII)
pub const DEFAULT_LOCAL_DOMAIN: u32 = 0x6675_656c;

/// Whether the run stops after deploying or also sends a test message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DeployOnly,
    SendMessage,
}

impl RunMode {
    /// `send-message` enables dispatch; anything else, including no argument, skips it.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("send-message") => RunMode::SendMessage,
            _ => RunMode::DeployOnly,
        }
    }
}

/// Which contract the test message is dispatched through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchRoute {
    /// Deploy the test recipient and dispatch through it, declaring the mailbox as a callee
    #[default]
    ViaRecipient,
    /// Only deploy the mailbox and call its `dispatch` directly
    Direct,
}

/// Arguments of the test `dispatch` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchParams {
    pub destination_domain: u32,
    pub recipient: Bytes32,
    pub body: Vec<u8>,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            destination_domain: DEFAULT_DESTINATION_DOMAIN,
            recipient: Bytes32::new([
                0x69, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                0, 0, 0, 0, 0x69,
            ]),
            body: DEFAULT_MESSAGE_BODY.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub node_url: String,
    pub private_key: String,
    pub salt: Salt,
    pub mailbox: ArtifactSource,
    pub recipient: ArtifactSource,
    pub route: DispatchRoute,
    pub dispatch: DispatchParams,
    pub local_domain: u32,
    /// Where to write a JSON summary of the resolved contracts, if anywhere
    pub deployments_out: Option<PathBuf>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            private_key: DEFAULT_PRIVATE_KEY.to_string(),
            salt: Salt::zeroed(),
            mailbox: ArtifactSource::new(DEFAULT_MAILBOX_BIN),
            recipient: ArtifactSource::new(DEFAULT_RECIPIENT_BIN),
            route: DispatchRoute::default(),
            dispatch: DispatchParams::default(),
            local_domain: DEFAULT_LOCAL_DOMAIN,
            deployments_out: None,
        }
    }
}

/// Parses a 32 byte hex string, with or without a `0x` prefix.
pub fn parse_bytes32(value: &str) -> Result<Bytes32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| eyre!("`{value}` is not valid hex: {e}"))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| eyre!("expected 32 bytes, `{value}` has {}", b.len()))?;
    Ok(Bytes32::new(bytes))
}

pub fn parse_salt(value: &str) -> Result<Salt> {
    Ok(Salt::new(*parse_bytes32(value)?))
}
