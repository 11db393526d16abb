/// Mathematical utilities for the staking deployment driver
///
/// Exact fixed-point conversion between human token amounts and on-chain
/// base units, and derivation of the hour-aligned quarterly epoch schedule.

pub mod epoch;
pub mod units;

// Re-export commonly used functions
pub use epoch::*;
pub use units::*;
