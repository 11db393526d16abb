/// Sequential registration of reward time ranges on the staking contract
///
/// The staking contract rejects a range whose start precedes the pool's
/// last registered range, so ranges go out one at a time in pool-major,
/// quarter-minor order and each is confirmed before the next is sent.

use std::collections::HashMap;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use staking_types::{DeployResult, PoolId, StakeDeployError, TimeRange};

use crate::chain::{into_step_failure, ChainClient, TxConfirmation};
use crate::format_timestamp;

/// A time range together with the transaction that registered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRange {
    #[serde(flatten)]
    pub range: TimeRange,
    pub confirmation: TxConfirmation,
}

pub struct ScheduleApplier<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    staking: Address,
}

impl<'a, C: ChainClient + ?Sized> ScheduleApplier<'a, C> {
    pub fn new(client: &'a C, staking: Address) -> Self {
        Self { client, staking }
    }

    /// Register every range in order. The first failure aborts the rest;
    /// ranges already registered stay on chain.
    pub async fn apply(&self, ranges: &[TimeRange]) -> DeployResult<Vec<AppliedRange>> {
        check_submission_order(ranges)?;

        let mut applied = Vec::with_capacity(ranges.len());
        for range in ranges {
            let confirmation = self.client.add_time_range(self.staking, range).await.map_err(|e| {
                into_step_failure(e, |reason, tx_hash| {
                    StakeDeployError::schedule_failure(range.pool.index(), range.quarter.number(), reason, tx_hash)
                })
            })?;

            log::info!(
                "{} from {} to {} for {} added",
                range.quarter.name(),
                format_timestamp(range.start_time),
                format_timestamp(range.end_time),
                range.pool.label()
            );

            applied.push(AppliedRange {
                range: range.clone(),
                confirmation,
            });
        }

        Ok(applied)
    }
}

/// Reject locally what the contract would reject on chain: a range that
/// is empty or starts before the previous range of the same pool ends.
/// Nothing is sent when this fails; the error names the offending range.
pub fn check_submission_order(ranges: &[TimeRange]) -> DeployResult<()> {
    let mut last_end: HashMap<PoolId, u64> = HashMap::new();

    for range in ranges {
        let rejected = |reason: &str| {
            StakeDeployError::schedule_failure(range.pool.index(), range.quarter.number(), reason, None)
        };

        range.validate().map_err(|e| rejected(&e.to_string()))?;

        if let Some(&previous_end) = last_end.get(&range.pool) {
            if range.start_time < previous_end {
                return Err(rejected(&format!(
                    "starts at {} before the previous range of {} ends at {}",
                    range.start_time, range.pool, previous_end
                )));
            }
        }
        last_end.insert(range.pool, range.end_time);
    }

    Ok(())
}
