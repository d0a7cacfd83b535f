//! Utility modules for testing
#![allow(dead_code)]

use fuel_tx::Salt;
use hyperlane_fuel_deploy_lib::config::{DEFAULT_LOCAL_DOMAIN, DeployConfig};
use hyperlane_fuel_deploy_lib::{ArtifactSource, ContractAbi, DeploymentTarget};
use std::fs;
use tempfile::TempDir;

pub mod chain;

pub const LOCAL_DOMAIN: u32 = DEFAULT_LOCAL_DOMAIN;

/// Stand-in bytecode. Only its bytes matter, since they determine the contract ID.
pub const MAILBOX_BYTECODE: &[u8] = &[
    0x1a, 0x40, 0x50, 0x00, 0x91, 0x00, 0x00, 0x08, 0x5d, 0x40, 0x60, 0x49, 0x24, 0x04, 0x00, 0x00,
];
pub const RECIPIENT_BYTECODE: &[u8] = &[
    0x1a, 0x40, 0x50, 0x00, 0x91, 0x00, 0x00, 0x10, 0x5d, 0x40, 0x60, 0x49, 0x24, 0x04, 0x00, 0x00,
];

pub const MAILBOX_STORAGE_SLOTS: &str = r#"[
    {"key": "02dac99c283f16bc91b74f6942db7f012699a2ad51272b15207b9cc14a70dbae", "value": "0000000000000000000000000000000000000000000000000000000000000000"}
]"#;

pub fn setup_testing_log() {
    use tracing_subscriber::util::SubscriberInitExt;
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let _ = tracing_subscriber::fmt::SubscriberBuilder::default()
        .without_time()
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NONE)
        .with_env_filter(env_filter)
        .with_test_writer()
        .finish()
        .try_init();
}

pub fn mailbox_target() -> DeploymentTarget {
    DeploymentTarget::new(ContractAbi::Mailbox, MAILBOX_BYTECODE.to_vec(), Salt::zeroed())
}

pub fn recipient_target() -> DeploymentTarget {
    DeploymentTarget::new(
        ContractAbi::TestRecipient,
        RECIPIENT_BYTECODE.to_vec(),
        Salt::zeroed(),
    )
}

/// Writes both contracts' artifacts into a temporary directory and returns a config
/// pointing at them
pub fn setup_artifacts() -> color_eyre::Result<(TempDir, DeployConfig)> {
    let tempdir = tempfile::tempdir()?;

    let mailbox_dir = tempdir.path().join("hyperlane-mailbox").join("out").join("debug");
    fs::create_dir_all(&mailbox_dir)?;
    let mailbox_bin = mailbox_dir.join("hyperlane-mailbox.bin");
    fs::write(&mailbox_bin, MAILBOX_BYTECODE)?;
    let mailbox_slots = mailbox_dir.join("hyperlane-mailbox-storage_slots.json");
    fs::write(&mailbox_slots, MAILBOX_STORAGE_SLOTS)?;

    let recipient_dir = tempdir
        .path()
        .join("hyperlane-msg-recipient-test")
        .join("out")
        .join("debug");
    fs::create_dir_all(&recipient_dir)?;
    let recipient_bin = recipient_dir.join("hyperlane-msg-recipient-test.bin");
    fs::write(&recipient_bin, RECIPIENT_BYTECODE)?;

    let config = DeployConfig {
        mailbox: ArtifactSource::new(mailbox_bin.to_string_lossy())
            .with_storage_slots(mailbox_slots.to_string_lossy()),
        recipient: ArtifactSource::new(recipient_bin.to_string_lossy()),
        ..Default::default()
    };

    Ok((tempdir, config))
}
