/// Constants shared by the schedule math and the deployer

// ============================================================================
// Time Constants
// ============================================================================

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: u64 = 3_600;

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Day count of each fiscal quarter, Q1 through Q4
pub const QUARTER_LENGTH_DAYS: [u64; 4] = [91, 92, 91, 91];

/// Day count of the first fiscal year (sum of the quarter lengths)
pub const FISCAL_YEAR_DAYS: u64 = 365;

// ============================================================================
// Token Constants
// ============================================================================

/// Decimal exponent of the reward token
pub const REWARD_TOKEN_DECIMALS: u8 = 18;

/// Number of reward pools registered on the staking contract
pub const POOL_COUNT: usize = 4;

/// Number of quarters programmed per pool
pub const QUARTER_COUNT: usize = 4;

/// Number of collateral token contracts
pub const COLLATERAL_COUNT: usize = 3;
