/// Reward pool identifiers as registered on the staking contract

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DeployResult, StakeDeployError};

/// Reward pool identifier. The ordinal is the pool id passed on chain and
/// follows the order the collateral contracts are deployed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoolId {
    /// Single-sided staking of the reward token itself
    RewardToken = 0,
    /// First collateral collection
    CollateralA = 1,
    /// Second collateral collection
    CollateralB = 2,
    /// Paired collateral (third collection matched with A or B)
    CollateralPair = 3,
}

impl PoolId {
    /// All pools in submission order
    pub const ALL: [PoolId; 4] = [
        PoolId::RewardToken,
        PoolId::CollateralA,
        PoolId::CollateralB,
        PoolId::CollateralPair,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pool id as the uint256 the staking contract expects
    pub fn as_u256(self) -> U256 {
        U256::from(self.index())
    }

    pub fn label(self) -> &'static str {
        match self {
            PoolId::RewardToken => "Reward Token Pool",
            PoolId::CollateralA => "Collateral A Pool",
            PoolId::CollateralB => "Collateral B Pool",
            PoolId::CollateralPair => "Collateral Pair Pool",
        }
    }

    /// Whether deposits into this pool are capped per position
    pub fn is_capped(self) -> bool {
        !matches!(self, PoolId::RewardToken)
    }
}

impl TryFrom<u8> for PoolId {
    type Error = StakeDeployError;

    fn try_from(value: u8) -> DeployResult<Self> {
        PoolId::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| StakeDeployError::invalid_config("pool_id", &format!("unknown pool {}", value)))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_ordinals_match_deployment_order() {
        let ordinals: Vec<u8> = PoolId::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);

        for pool in PoolId::ALL {
            assert_eq!(PoolId::try_from(pool.index()).unwrap(), pool);
        }
        assert!(PoolId::try_from(4).is_err());
    }

    #[test]
    fn test_only_reward_token_pool_is_uncapped() {
        assert!(!PoolId::RewardToken.is_capped());
        assert!(PoolId::CollateralA.is_capped());
        assert!(PoolId::CollateralB.is_capped());
        assert!(PoolId::CollateralPair.is_capped());
    }
}
