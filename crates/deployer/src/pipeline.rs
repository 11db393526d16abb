use staking_math::compute_epoch_schedule;
use staking_types::{DeployResult, DeployedContracts, EpochSchedule, StakeDeployError, TimeRange};

use crate::chain::ChainClient;
use crate::config::ContractsConfig;
use crate::format_timestamp;
use crate::provisioning::ProvisioningSequencer;
use crate::rewards::RewardSchedule;
use crate::schedule::{AppliedRange, ScheduleApplier};

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub contracts: DeployedContracts,
    pub epoch: EpochSchedule,
    pub applied: Vec<AppliedRange>,
}

/// Fail unless the node reports the chain id the profile expects
pub async fn verify_chain_id<C: ChainClient + ?Sized>(client: &C, expected: Option<u64>) -> DeployResult<u64> {
    let actual = client.chain_id().await?;
    match expected {
        Some(expected) if expected != actual => Err(StakeDeployError::invalid_config(
            "chain_id",
            &format!("network profile expects chain {} but the node reports {}", expected, actual),
        )),
        _ => Ok(actual),
    }
}

/// Provision every contract, derive the epoch from chain time, then
/// register all sixteen reward ranges. Each step needs the previous one
/// to have confirmed.
pub async fn run_deployment<C: ChainClient + ?Sized>(
    client: &C,
    contracts: &ContractsConfig,
    rewards: &RewardSchedule,
) -> DeployResult<RunReport> {
    let deployed = ProvisioningSequencer::new(client, contracts).provision().await?;

    let epoch = plan_epoch(client).await?;
    let ranges = rewards.time_ranges(&epoch);

    log::info!("Setting up time ranges...");
    let applied = ScheduleApplier::new(client, deployed.staking.address)
        .apply(&ranges)
        .await?;

    Ok(RunReport {
        contracts: deployed,
        epoch,
        applied,
    })
}

/// Epoch schedule anchored at the latest block
pub async fn plan_epoch<C: ChainClient + ?Sized>(client: &C) -> DeployResult<EpochSchedule> {
    let reference = client.latest_block_timestamp().await?;
    let epoch = compute_epoch_schedule(reference)?;
    log::debug!(
        "Latest block at {} ({}), schedule starts {}",
        reference,
        format_timestamp(reference),
        format_timestamp(epoch.start_time)
    );
    Ok(epoch)
}

/// Print the planned registrations without sending anything
pub fn log_plan(ranges: &[TimeRange]) {
    for range in ranges {
        log::info!(
            "DRY RUN: addTimeRange({}, {}, {}, {}, {}) - {} {} from {} to {}",
            range.pool.index(),
            range.reward_budget,
            range.start_time,
            range.end_time,
            range.per_deposit_cap,
            range.pool.label(),
            range.quarter,
            format_timestamp(range.start_time),
            format_timestamp(range.end_time)
        );
    }
}

pub fn log_summary(report: &RunReport) {
    log::info!("=== Deployment Summary ===");
    for record in report.contracts.records() {
        log::info!("{}: {}", record.logical_name, record.address);
    }
    log::info!(
        "Reward schedule: {} ranges from {} to {}",
        report.applied.len(),
        format_timestamp(report.epoch.start_time),
        format_timestamp(report.epoch.end_time())
    );
}

/// Process exit status for a run result
pub fn exit_code<T>(result: &DeployResult<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
