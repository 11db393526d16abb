/// First-year reward table and its expansion into time ranges
///
/// Budgets are whole reward tokens per quarter; caps are the maximum
/// stake per deposit. Both are converted to base units once, before the
/// deployer touches the chain, and never change afterwards.

use alloy::primitives::U256;
use staking_math::to_base_units;
use staking_types::{
    DeployResult, EpochSchedule, PoolId, Quarter, StakeDeployError, TimeRange, POOL_COUNT, QUARTER_COUNT,
    REWARD_TOKEN_DECIMALS,
};

// ============================================================================
// Static Table
// ============================================================================

/// Emission curve of one pool, in whole tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolRewardDefinition {
    pub pool: PoolId,
    pub quarterly_budgets: [f64; QUARTER_COUNT],
    pub per_deposit_cap: f64,
}

/// Emissions for the first staking year, one row per pool
pub const REWARD_TABLE: [PoolRewardDefinition; POOL_COUNT] = [
    PoolRewardDefinition {
        pool: PoolId::RewardToken,
        quarterly_budgets: [10_500_000.0, 9_000_000.0, 6_000_000.0, 4_500_000.0],
        per_deposit_cap: 0.0,
    },
    PoolRewardDefinition {
        pool: PoolId::CollateralA,
        quarterly_budgets: [16_486_750.0, 14_131_500.0, 9_421_000.0, 7_065_750.0],
        per_deposit_cap: 10_094.0,
    },
    PoolRewardDefinition {
        pool: PoolId::CollateralB,
        quarterly_budgets: [6_671_000.0, 5_718_000.0, 3_812_000.0, 2_859_000.0],
        per_deposit_cap: 2_042.0,
    },
    PoolRewardDefinition {
        pool: PoolId::CollateralPair,
        quarterly_budgets: [1_342_250.0, 1_150_500.0, 767_000.0, 575_250.0],
        per_deposit_cap: 856.0,
    },
];

// ============================================================================
// Converted Schedule
// ============================================================================

/// Budget and cap of one (pool, quarter) cell, in base units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardEntry {
    pub reward_budget: U256,
    pub per_deposit_cap: U256,
}

/// Reward table converted to base units, keyed by (pool, quarter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSchedule {
    entries: [[RewardEntry; QUARTER_COUNT]; POOL_COUNT],
}

impl RewardSchedule {
    /// The first-year table with 18-decimal scaling
    pub fn standard() -> DeployResult<Self> {
        Self::from_definitions(&REWARD_TABLE, REWARD_TOKEN_DECIMALS)
    }

    /// Convert and validate a table. Rows must list every pool in id order,
    /// budgets must strictly decrease, and only collateral pools are capped.
    pub fn from_definitions(definitions: &[PoolRewardDefinition], decimals: u8) -> DeployResult<Self> {
        if definitions.len() != POOL_COUNT {
            return Err(StakeDeployError::invalid_config(
                "reward_table",
                &format!("expected {} pools, got {}", POOL_COUNT, definitions.len()),
            ));
        }

        let mut entries = [[RewardEntry::default(); QUARTER_COUNT]; POOL_COUNT];

        for (expected, definition) in PoolId::ALL.iter().zip(definitions) {
            if definition.pool != *expected {
                return Err(StakeDeployError::invalid_config(
                    "reward_table",
                    &format!("row for {} found where {} was expected", definition.pool, expected),
                ));
            }

            let cap = to_base_units(definition.per_deposit_cap, decimals)?;
            if definition.pool.is_capped() == cap.is_zero() {
                return Err(StakeDeployError::invalid_config(
                    "reward_table",
                    &format!("{} has an invalid per-deposit cap {}", definition.pool, definition.per_deposit_cap),
                ));
            }

            let row = &mut entries[definition.pool.index() as usize];
            for quarter in Quarter::ALL {
                let budget = to_base_units(definition.quarterly_budgets[quarter.position()], decimals)?;
                if budget.is_zero() {
                    return Err(StakeDeployError::invalid_config(
                        "reward_table",
                        &format!("{} {} has no budget", definition.pool, quarter),
                    ));
                }
                if let Some(previous) = quarter.position().checked_sub(1).map(|p| row[p].reward_budget) {
                    if budget >= previous {
                        return Err(StakeDeployError::invalid_config(
                            "reward_table",
                            &format!("{} {} budget does not decrease from the previous quarter", definition.pool, quarter),
                        ));
                    }
                }
                row[quarter.position()] = RewardEntry {
                    reward_budget: budget,
                    per_deposit_cap: cap,
                };
            }
        }

        Ok(Self { entries })
    }

    pub fn entry(&self, pool: PoolId, quarter: Quarter) -> RewardEntry {
        self.entries[pool.index() as usize][quarter.position()]
    }

    /// Sum of a pool's four quarterly budgets
    pub fn pool_total(&self, pool: PoolId) -> U256 {
        Quarter::ALL
            .iter()
            .fold(U256::ZERO, |total, q| total + self.entry(pool, *q).reward_budget)
    }

    /// The sixteen registrations, pool-major then quarter-minor
    pub fn time_ranges(&self, epoch: &EpochSchedule) -> Vec<TimeRange> {
        let mut ranges = Vec::with_capacity(POOL_COUNT * QUARTER_COUNT);
        for pool in PoolId::ALL {
            for quarter in Quarter::ALL {
                let (start_time, end_time) = epoch.window(quarter);
                let entry = self.entry(pool, quarter);
                ranges.push(TimeRange {
                    pool,
                    quarter,
                    start_time,
                    end_time,
                    reward_budget: entry.reward_budget,
                    per_deposit_cap: entry.per_deposit_cap,
                });
            }
        }
        ranges
    }
}
