//! Chain client port used by the provisioning and schedule steps

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use staking_types::{ConstructorArgs, DeployResult, StakeDeployError, TimeRange};

/// A contract creation to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Name used in logs and the deployment record
    pub logical_name: String,

    /// Compiled artifact providing the creation code
    pub artifact: String,

    pub args: ConstructorArgs,
}

/// Proof that a transaction was included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfirmation {
    pub tx_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// A confirmed contract creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreation {
    pub address: Address,
    pub confirmation: TxConfirmation,
}

/// Every chain interaction the driver needs. Each sending method submits a
/// transaction and only returns once it is confirmed or has failed.
///
/// Transaction-level failures are reported as
/// [`StakeDeployError::TransactionFailed`] or
/// [`StakeDeployError::ConfirmationTimeout`]; callers attach step context.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id reported by the node
    async fn chain_id(&self) -> DeployResult<u64>;

    /// Timestamp of the latest block
    async fn latest_block_timestamp(&self) -> DeployResult<u64>;

    /// Deploy a contract and wait for its address
    async fn deploy_contract(&self, request: &DeployRequest) -> DeployResult<ContractCreation>;

    /// Call `addTimeRange` on the staking contract and wait for inclusion
    async fn add_time_range(&self, staking: Address, range: &TimeRange) -> DeployResult<TxConfirmation>;
}

/// Attach step context to a transaction-level failure. Errors that are not
/// about a transaction (bad artifact, bad config) pass through unchanged.
pub fn into_step_failure<F>(err: StakeDeployError, wrap: F) -> StakeDeployError
where
    F: FnOnce(&str, Option<String>) -> StakeDeployError,
{
    match err {
        StakeDeployError::TransactionFailed { reason, tx_hash } => wrap(&reason, tx_hash),
        err @ (StakeDeployError::ConfirmationTimeout { .. } | StakeDeployError::RpcError { .. }) => {
            wrap(&err.to_string(), None)
        }
        other => other,
    }
}
