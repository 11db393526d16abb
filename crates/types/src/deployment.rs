/// Deployment records for the provisioned contracts

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Constructor parameters of each contract in the topology. Upstream
/// contracts are referenced by their confirmed address only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstructorArgs {
    /// Fungible reward token
    RewardToken { name: String, symbol: String },

    /// Non-fungible collateral collection
    Collateral {
        name: String,
        symbol: String,
        base_uri: String,
        max_supply: U256,
    },

    /// Staking contract over the reward token and three collections
    Staking {
        reward_token: Address,
        collateral_a: Address,
        collateral_b: Address,
        collateral_pair: Address,
    },

    /// Governance voting contract reading staked balances
    Voting { staking: Address },
}

/// A confirmed contract deployment. Never mutated after its address is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub logical_name: String,
    pub constructor_args: ConstructorArgs,
    pub address: Address,

    /// Hash of the creation transaction, when the client reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Every record produced by one provisioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContracts {
    pub reward_token: DeploymentRecord,
    pub collaterals: [DeploymentRecord; 3],
    pub staking: DeploymentRecord,
    pub voting: DeploymentRecord,
}

impl DeployedContracts {
    /// Records in the order they were deployed
    pub fn records(&self) -> Vec<&DeploymentRecord> {
        let mut records = vec![&self.reward_token];
        records.extend(self.collaterals.iter());
        records.push(&self.staking);
        records.push(&self.voting);
        records
    }
}
