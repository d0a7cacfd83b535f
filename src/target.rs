use crate::config::parse_bytes32;
use crate::contract_id::{compute_contract_id, storage_root};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use fuel_tx::{Bytes32, ContractId, Salt, StorageSlot};
use serde::Deserialize;
use std::fmt;

/// Interface of a contract this tool knows how to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractAbi {
    Mailbox,
    TestRecipient,
}

impl ContractAbi {
    pub fn name(self) -> &'static str {
        match self {
            ContractAbi::Mailbox => "mailbox",
            ContractAbi::TestRecipient => "test_recipient",
        }
    }
}

impl fmt::Display for ContractAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a contract's compiled artifacts live.
///
/// Each location is either a filesystem path or a `file://`, `http://` or `https://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    pub bytecode: String,
    pub storage_slots: Option<String>,
}

impl ArtifactSource {
    pub fn new(bytecode: impl Into<String>) -> Self {
        Self {
            bytecode: bytecode.into(),
            storage_slots: None,
        }
    }

    #[must_use]
    pub fn with_storage_slots(mut self, storage_slots: impl Into<String>) -> Self {
        self.storage_slots = Some(storage_slots.into());
        self
    }
}

/// Everything that determines where a contract lands on chain
#[derive(Debug, Clone)]
pub struct DeploymentTarget {
    pub abi: ContractAbi,
    pub bytecode: Vec<u8>,
    pub salt: Salt,
    pub storage_slots: Vec<StorageSlot>,
}

impl DeploymentTarget {
    pub fn new(abi: ContractAbi, bytecode: Vec<u8>, salt: Salt) -> Self {
        Self {
            abi,
            bytecode,
            salt,
            storage_slots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_storage_slots(mut self, mut storage_slots: Vec<StorageSlot>) -> Self {
        storage_slots.sort();
        self.storage_slots = storage_slots;
        self
    }

    pub fn name(&self) -> &'static str {
        self.abi.name()
    }

    pub fn storage_root(&self) -> Bytes32 {
        storage_root(&self.storage_slots)
    }

    /// The ID this target is assigned once deployed
    pub fn expected_id(&self) -> ContractId {
        compute_contract_id(&self.bytecode, &self.salt, &self.storage_root())
    }

    /// Reads the bytecode (and storage slots, if configured) for `abi` from `source`.
    #[tracing::instrument(skip_all, fields(contract = %abi))]
    pub async fn load(abi: ContractAbi, source: &ArtifactSource, salt: Salt) -> Result<Self> {
        let bytecode = read_artifact(&source.bytecode)
            .await
            .wrap_err_with(|| format!("failed to read {abi} bytecode"))?;
        if bytecode.is_empty() {
            return Err(eyre!("{abi} bytecode at `{}` is empty", source.bytecode));
        }

        let storage_slots = match &source.storage_slots {
            Some(location) => {
                let raw = read_artifact(location)
                    .await
                    .wrap_err_with(|| format!("failed to read {abi} storage slots"))?;
                parse_storage_slots(&raw)?
            }
            None => Vec::new(),
        };

        tracing::debug!(
            "Loaded {} bytes of bytecode and {} storage slots",
            bytecode.len(),
            storage_slots.len()
        );

        Ok(Self::new(abi, bytecode, salt).with_storage_slots(storage_slots))
    }
}

async fn read_artifact(location: &str) -> Result<Vec<u8>> {
    // Plain paths fail to parse as URLs, which is how they're told apart
    let Ok(url) = reqwest::Url::parse(location) else {
        return Ok(tokio::fs::read(location)
            .await
            .wrap_err_with(|| format!("cannot read `{location}`"))?);
    };

    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| eyre!("`{location}` is not a valid file URL"))?;
            Ok(tokio::fs::read(&path)
                .await
                .wrap_err_with(|| format!("cannot read `{}`", path.display()))?)
        }
        "http" | "https" => {
            let response = reqwest::get(url).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
        scheme => Err(eyre!("unsupported artifact scheme `{scheme}` in `{location}`")),
    }
}

#[derive(Deserialize)]
struct RawStorageSlot {
    key: String,
    value: String,
}

/// Parses the `*-storage_slots.json` file emitted by `forc build`.
pub fn parse_storage_slots(raw: &[u8]) -> Result<Vec<StorageSlot>> {
    let slots: Vec<RawStorageSlot> =
        serde_json::from_slice(raw).wrap_err("malformed storage slots file")?;

    slots
        .into_iter()
        .map(|slot| {
            Ok(StorageSlot::new(
                parse_bytes32(&slot.key)?,
                parse_bytes32(&slot.value)?,
            ))
        })
        .collect()
}
