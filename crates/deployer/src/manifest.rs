/// JSON record of a completed deployment

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use staking_types::{DeployResult, DeployedContracts, EpochSchedule, StakeDeployError};

use crate::pipeline::RunReport;
use crate::schedule::AppliedRange;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentManifest {
    pub network: String,
    pub chain_id: u64,
    pub generated_at: String,
    pub contracts: DeployedContracts,
    pub epoch: EpochSchedule,
    pub time_ranges: Vec<AppliedRange>,
}

impl DeploymentManifest {
    pub fn from_report(network: &str, chain_id: u64, report: &RunReport) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            contracts: report.contracts.clone(),
            epoch: report.epoch,
            time_ranges: report.applied.clone(),
        }
    }

    /// Write as pretty JSON, creating parent directories
    pub fn write(&self, path: &Path) -> DeployResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StakeDeployError::io(&parent.display().to_string(), &e))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| StakeDeployError::io(&path.display().to_string(), &e))?;

        log::info!("Deployment manifest written to {}", path.display());
        Ok(())
    }
}
