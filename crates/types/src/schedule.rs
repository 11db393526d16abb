/// Fiscal quarters, epoch schedule and reward time ranges

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::*;
use crate::errors::{DeployResult, StakeDeployError};
use crate::pool::PoolId;

// ============================================================================
// Quarter
// ============================================================================

/// Fiscal quarter of the first staking year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Zero-based position of the quarter
    pub fn position(self) -> usize {
        match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 1,
            Quarter::Q3 => 2,
            Quarter::Q4 => 3,
        }
    }

    /// One-based quarter number
    pub fn number(self) -> u8 {
        self.position() as u8 + 1
    }

    pub fn length_days(self) -> u64 {
        QUARTER_LENGTH_DAYS[self.position()]
    }

    pub fn length_secs(self) -> u64 {
        self.length_days() * SECONDS_PER_DAY
    }

    pub fn name(self) -> &'static str {
        match self {
            Quarter::Q1 => "First Quarter",
            Quarter::Q2 => "Second Quarter",
            Quarter::Q3 => "Third Quarter",
            Quarter::Q4 => "Fourth Quarter",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

// ============================================================================
// Epoch Schedule
// ============================================================================

/// Quarter boundaries of the first fiscal year, derived once from chain time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSchedule {
    /// First second of Q1, aligned to an hour boundary
    pub start_time: u64,

    /// End of Q1..Q4; each end is the start of the following quarter
    pub quarter_ends: [u64; 4],
}

impl EpochSchedule {
    pub fn end_of(&self, quarter: Quarter) -> u64 {
        self.quarter_ends[quarter.position()]
    }

    pub fn start_of(&self, quarter: Quarter) -> u64 {
        match quarter.position() {
            0 => self.start_time,
            n => self.quarter_ends[n - 1],
        }
    }

    /// (start, end) of a quarter in unix seconds
    pub fn window(&self, quarter: Quarter) -> (u64, u64) {
        (self.start_of(quarter), self.end_of(quarter))
    }

    /// Final second covered by the schedule
    pub fn end_time(&self) -> u64 {
        self.quarter_ends[QUARTER_COUNT - 1]
    }
}

// ============================================================================
// Time Range
// ============================================================================

/// One addTimeRange registration on the staking contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub pool: PoolId,
    pub quarter: Quarter,

    /// Unix seconds, inclusive
    pub start_time: u64,

    /// Unix seconds; equals the next quarter's start_time
    pub end_time: u64,

    /// Rewards emitted across the range, in base units
    pub reward_budget: U256,

    /// Maximum stake per deposit in base units; zero means uncapped
    pub per_deposit_cap: U256,
}

impl TimeRange {
    pub fn duration_secs(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    pub fn validate(&self) -> DeployResult<()> {
        if self.start_time >= self.end_time {
            return Err(StakeDeployError::invalid_config(
                "time_range",
                &format!(
                    "{} {} starts at {} which is not before its end {}",
                    self.pool, self.quarter, self.start_time, self.end_time
                ),
            ));
        }
        if !self.pool.is_capped() && !self.per_deposit_cap.is_zero() {
            return Err(StakeDeployError::invalid_config(
                "time_range",
                &format!("{} must be uncapped", self.pool),
            ));
        }
        Ok(())
    }
}
