use crate::resolver::ContractHandle;
use color_eyre::Result;
use fuel_tx::Salt;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One resolved contract in a [`DeploymentRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub name: String,
    pub contract_id: String,
    pub status: String,
}

impl From<&ContractHandle> for DeployedContract {
    fn from(handle: &ContractHandle) -> Self {
        Self {
            name: handle.abi.name().to_string(),
            contract_id: format!("0x{}", handle.id),
            status: handle.status.to_string(),
        }
    }
}

/// Summary of a run, so other tooling can pick up the contract IDs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub node_url: String,
    pub salt: String,
    pub contracts: Vec<DeployedContract>,
}

impl DeploymentRecord {
    pub fn new<'a>(
        node_url: &str,
        salt: &Salt,
        handles: impl IntoIterator<Item = &'a ContractHandle>,
    ) -> Self {
        Self {
            node_url: node_url.to_string(),
            salt: format!("0x{salt}"),
            contracts: handles.into_iter().map(DeployedContract::from).collect(),
        }
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&file, self)?;
        tracing::info!("Deployment record written to: {}", path.display());
        Ok(())
    }
}
