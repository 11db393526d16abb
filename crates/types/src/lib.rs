/// Shared types for the staking deployment driver
///
/// This crate provides the pool and quarter identifiers, reward time ranges,
/// epoch schedule, deployment records and the error type that are used by
/// the math helpers and the deployer.

pub mod constants;
pub mod deployment;
pub mod errors;
pub mod pool;
pub mod schedule;

// Re-export all public types
pub use constants::*;
pub use deployment::*;
pub use errors::*;
pub use pool::*;
pub use schedule::*;
