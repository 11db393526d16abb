pub mod artifacts;
pub mod chain;
pub mod config;
pub mod evm;
pub mod manifest;
pub mod pipeline;
pub mod provisioning;
pub mod rewards;
pub mod schedule;

pub use chain::{ChainClient, ContractCreation, DeployRequest, TxConfirmation};
pub use config::{ContractsConfig, DeployConfig, NetworkProfile, ResolvedNetwork};
pub use evm::{ClientSettings, EvmChainClient};
pub use manifest::DeploymentManifest;
pub use pipeline::{exit_code, run_deployment, verify_chain_id, RunReport};
pub use provisioning::ProvisioningSequencer;
pub use rewards::{RewardSchedule, REWARD_TABLE};
pub use schedule::{AppliedRange, ScheduleApplier};

/// Render a unix timestamp as RFC 3339 for log lines
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
