/// Contract provisioning in dependency order
///
/// Token, then the three collateral collections, then staking (which takes
/// all four addresses), then voting (which takes the staking address).
/// Each step waits for its creation to confirm before the next starts.

use alloy::primitives::U256;
use staking_types::{ConstructorArgs, DeployResult, DeployedContracts, DeploymentRecord, StakeDeployError};

use crate::chain::{into_step_failure, ChainClient, DeployRequest};
use crate::config::{CollateralConfig, ContractsConfig};

pub const REWARD_TOKEN_NAME: &str = "Reward Token";
pub const STAKING_NAME: &str = "Staking";
pub const VOTING_NAME: &str = "Staked Voting";

pub struct ProvisioningSequencer<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    contracts: &'a ContractsConfig,
}

impl<'a, C: ChainClient + ?Sized> ProvisioningSequencer<'a, C> {
    pub fn new(client: &'a C, contracts: &'a ContractsConfig) -> Self {
        Self { client, contracts }
    }

    /// Deploy the whole topology. Stops at the first failure; contracts
    /// already created stay on chain.
    pub async fn provision(&self) -> DeployResult<DeployedContracts> {
        let [alpha, beta, gamma] = collateral_triplet(&self.contracts.collaterals)?;

        let token = &self.contracts.reward_token;
        let reward_token = self
            .deploy_step(DeployRequest {
                logical_name: REWARD_TOKEN_NAME.to_string(),
                artifact: token.artifact.clone(),
                args: ConstructorArgs::RewardToken {
                    name: token.name.clone(),
                    symbol: token.symbol.clone(),
                },
            })
            .await?;

        let collateral_a = self.deploy_step(collateral_request(alpha)).await?;
        let collateral_b = self.deploy_step(collateral_request(beta)).await?;
        let collateral_pair = self.deploy_step(collateral_request(gamma)).await?;

        let staking = self
            .deploy_step(DeployRequest {
                logical_name: STAKING_NAME.to_string(),
                artifact: self.contracts.staking_artifact.clone(),
                args: ConstructorArgs::Staking {
                    reward_token: reward_token.address,
                    collateral_a: collateral_a.address,
                    collateral_b: collateral_b.address,
                    collateral_pair: collateral_pair.address,
                },
            })
            .await?;

        let voting = self
            .deploy_step(DeployRequest {
                logical_name: VOTING_NAME.to_string(),
                artifact: self.contracts.voting_artifact.clone(),
                args: ConstructorArgs::Voting {
                    staking: staking.address,
                },
            })
            .await?;

        Ok(DeployedContracts {
            reward_token,
            collaterals: [collateral_a, collateral_b, collateral_pair],
            staking,
            voting,
        })
    }

    /// Submit one creation, wait for it, and record the address
    async fn deploy_step(&self, request: DeployRequest) -> DeployResult<DeploymentRecord> {
        log::debug!("Deploying {} from artifact {}", request.logical_name, request.artifact);

        let creation = self.client.deploy_contract(&request).await.map_err(|e| {
            into_step_failure(e, |reason, tx_hash| {
                StakeDeployError::deployment_failure(&request.logical_name, reason, tx_hash)
            })
        })?;

        log::info!("{} deployed at {}", request.logical_name, creation.address);

        Ok(DeploymentRecord {
            logical_name: request.logical_name,
            constructor_args: request.args,
            address: creation.address,
            tx_hash: Some(creation.confirmation.tx_hash),
        })
    }
}

fn collateral_request(collateral: &CollateralConfig) -> DeployRequest {
    DeployRequest {
        logical_name: collateral.key.clone(),
        artifact: collateral.artifact.clone(),
        args: ConstructorArgs::Collateral {
            name: collateral.name.clone(),
            symbol: collateral.symbol.clone(),
            base_uri: collateral.base_uri.clone(),
            max_supply: U256::from(collateral.max_supply),
        },
    }
}

fn collateral_triplet(collaterals: &[CollateralConfig]) -> DeployResult<[&CollateralConfig; 3]> {
    match collaterals {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(StakeDeployError::invalid_config(
            "contracts.collaterals",
            &format!("exactly 3 collateral tokens are required, got {}", collaterals.len()),
        )),
    }
}
