//! End-to-end runs of the deployment pipeline against the in-memory chain

mod common;

use alloy::primitives::{Address, U256};
use common::MockChain;
use staking_deployer::provisioning::{REWARD_TOKEN_NAME, STAKING_NAME, VOTING_NAME};
use staking_deployer::{
    exit_code, run_deployment, verify_chain_id, ContractsConfig, DeploymentManifest, RewardSchedule, ScheduleApplier,
};
use staking_math::compute_epoch_schedule;
use staking_types::{ConstructorArgs, PoolId, Quarter, StakeDeployError};
use tempfile::TempDir;

const BLOCK_TIME: u64 = 1_700_000_000;

fn tokens(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}

#[tokio::test]
async fn test_full_deployment_registers_sixteen_ranges() {
    let chain = MockChain::new(BLOCK_TIME);
    let contracts = ContractsConfig::default();
    let rewards = RewardSchedule::standard().unwrap();

    let result = run_deployment(&chain, &contracts, &rewards).await;
    assert_eq!(exit_code(&result), 0);
    let report = result.unwrap();

    let deployments = chain.deployments();
    let names: Vec<&str> = deployments.iter().map(|d| d.logical_name.as_str()).collect();
    let keys: Vec<&str> = contracts.collaterals.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(names, [REWARD_TOKEN_NAME, keys[0], keys[1], keys[2], STAKING_NAME, VOTING_NAME]);

    let addresses = chain.addresses();
    assert_eq!(
        deployments[4].args,
        ConstructorArgs::Staking {
            reward_token: addresses[0],
            collateral_a: addresses[1],
            collateral_b: addresses[2],
            collateral_pair: addresses[3],
        }
    );
    assert_eq!(deployments[5].args, ConstructorArgs::Voting { staking: addresses[4] });
    assert_eq!(report.contracts.staking.address, addresses[4]);

    assert_eq!(report.epoch.start_time, 1_700_002_800);
    assert_eq!(report.epoch.end_of(Quarter::Q1), 1_707_865_200);

    let submissions = chain.submissions();
    assert_eq!(submissions.len(), 16);
    assert!(submissions.iter().all(|s| s.accepted && s.staking == addresses[4]));

    let order: Vec<(u8, u8)> = submissions
        .iter()
        .map(|s| (s.range.pool.index(), s.range.quarter.number()))
        .collect();
    let expected: Vec<(u8, u8)> = (0..4u8).flat_map(|p| (1..=4u8).map(move |q| (p, q))).collect();
    assert_eq!(order, expected);

    let first = &submissions[0].range;
    assert_eq!(first.pool, PoolId::RewardToken);
    assert_eq!(first.start_time, 1_700_002_800);
    assert_eq!(first.reward_budget, tokens(10_500_000));
    assert!(first.per_deposit_cap.is_zero());

    assert_eq!(report.applied.len(), 16);
    assert_eq!(report.applied[15].range.per_deposit_cap, tokens(856));
}

#[tokio::test]
async fn test_rejected_range_stops_the_schedule() {
    let chain = MockChain::new(BLOCK_TIME).reject_submission(1, 2);
    let rewards = RewardSchedule::standard().unwrap();

    let result = run_deployment(&chain, &ContractsConfig::default(), &rewards).await;
    assert_eq!(exit_code(&result), 1);

    match result {
        Err(StakeDeployError::ScheduleSubmissionFailure { pool, quarter, tx_hash, .. }) => {
            assert_eq!((pool, quarter), (1, 2));
            assert!(tx_hash.is_some());
        }
        other => panic!("expected a schedule submission failure, got {:?}", other),
    }

    // Four ranges for pool 0, Q1 of pool 1, then the rejected Q2
    let submissions = chain.submissions();
    assert_eq!(submissions.len(), 6);
    assert_eq!(submissions.iter().filter(|s| s.accepted).count(), 5);
    assert_eq!(chain.deployments().len(), 6);
}

#[tokio::test]
async fn test_failed_staking_deployment_stops_before_voting() {
    let chain = MockChain::new(BLOCK_TIME).fail_deployment(STAKING_NAME);
    let rewards = RewardSchedule::standard().unwrap();

    let result = run_deployment(&chain, &ContractsConfig::default(), &rewards).await;
    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result,
        Err(StakeDeployError::DeploymentFailure { ref contract, .. }) if contract == STAKING_NAME
    ));

    let deployments = chain.deployments();
    assert_eq!(deployments.len(), 5);
    assert!(deployments.iter().all(|d| d.logical_name != VOTING_NAME));
    assert!(chain.submissions().is_empty());
}

#[tokio::test]
async fn test_chain_id_mismatch_is_rejected() {
    let chain = MockChain::new(BLOCK_TIME).with_chain_id(5);

    assert_eq!(verify_chain_id(&chain, Some(5)).await.unwrap(), 5);
    assert_eq!(verify_chain_id(&chain, None).await.unwrap(), 5);
    assert!(matches!(
        verify_chain_id(&chain, Some(1661)).await,
        Err(StakeDeployError::InvalidConfiguration { .. })
    ));
}

#[tokio::test]
async fn test_manifest_records_the_run() {
    let chain = MockChain::new(BLOCK_TIME);
    let report = run_deployment(&chain, &ContractsConfig::default(), &RewardSchedule::standard().unwrap())
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployments").join("localhost.json");
    DeploymentManifest::from_report("localhost", 31337, &report).write(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["network"], "localhost");
    assert_eq!(json["chain_id"], 31337);
    assert_eq!(json["epoch"]["start_time"], 1_700_002_800u64);
    assert_eq!(json["time_ranges"].as_array().unwrap().len(), 16);
    assert_eq!(json["contracts"]["voting"]["logical_name"], VOTING_NAME);
}

#[tokio::test]
async fn test_misordered_ranges_never_reach_the_chain() {
    let chain = MockChain::new(BLOCK_TIME);
    let epoch = compute_epoch_schedule(BLOCK_TIME).unwrap();
    let mut ranges = RewardSchedule::standard().unwrap().time_ranges(&epoch);
    ranges.swap(13, 14);

    let result = ScheduleApplier::new(&chain, Address::with_last_byte(5)).apply(&ranges).await;
    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result,
        Err(StakeDeployError::ScheduleSubmissionFailure { pool: 3, quarter: 2, tx_hash: None, .. })
    ));
    assert!(chain.submissions().is_empty());
}

#[tokio::test]
async fn test_block_time_without_room_for_a_year_fails_cleanly() {
    let chain = MockChain::new(u64::MAX - 10);
    let rewards = RewardSchedule::standard().unwrap();

    let result = run_deployment(&chain, &ContractsConfig::default(), &rewards).await;
    assert_eq!(exit_code(&result), 1);
    assert!(matches!(result, Err(StakeDeployError::InvalidConfiguration { .. })));
    assert!(chain.submissions().is_empty());
}
