//! In-memory chain used by the deployer integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use alloy::primitives::Address;
use async_trait::async_trait;
use staking_deployer::{ChainClient, ContractCreation, DeployRequest, TxConfirmation};
use staking_types::{DeployResult, PoolId, StakeDeployError, TimeRange};

/// Every `addTimeRange` call the chain received, accepted or not
#[derive(Debug, Clone)]
pub struct Submission {
    pub staking: Address,
    pub range: TimeRange,
    pub accepted: bool,
}

#[derive(Default)]
struct State {
    next_nonce: u64,
    deployments: Vec<DeployRequest>,
    addresses: Vec<Address>,
    submissions: Vec<Submission>,
    last_end: HashMap<PoolId, u64>,
}

pub struct MockChain {
    chain_id: u64,
    block_timestamp: u64,
    failing_deployments: HashSet<String>,
    rejected_ranges: HashSet<(u8, u8)>,
    state: Mutex<State>,
}

impl MockChain {
    pub fn new(block_timestamp: u64) -> Self {
        Self {
            chain_id: 31337,
            block_timestamp,
            failing_deployments: HashSet::new(),
            rejected_ranges: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Revert the creation of the contract with this logical name
    pub fn fail_deployment(mut self, logical_name: &str) -> Self {
        self.failing_deployments.insert(logical_name.to_string());
        self
    }

    /// Revert the range for this pool and one-based quarter
    pub fn reject_submission(mut self, pool: u8, quarter: u8) -> Self {
        self.rejected_ranges.insert((pool, quarter));
        self
    }

    pub fn deployments(&self) -> Vec<DeployRequest> {
        self.state.lock().unwrap().deployments.clone()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.state.lock().unwrap().addresses.clone()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.state.lock().unwrap().submissions.clone()
    }

    fn next_tx_hash(state: &mut State) -> String {
        state.next_nonce += 1;
        format!("0x{:064x}", state.next_nonce)
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> DeployResult<u64> {
        Ok(self.chain_id)
    }

    async fn latest_block_timestamp(&self) -> DeployResult<u64> {
        Ok(self.block_timestamp)
    }

    async fn deploy_contract(&self, request: &DeployRequest) -> DeployResult<ContractCreation> {
        let mut state = self.state.lock().unwrap();
        state.deployments.push(request.clone());
        let tx_hash = Self::next_tx_hash(&mut state);

        if self.failing_deployments.contains(&request.logical_name) {
            return Err(StakeDeployError::transaction_failed("execution reverted", Some(tx_hash)));
        }

        let address = Address::with_last_byte(state.addresses.len() as u8 + 1);
        state.addresses.push(address);

        Ok(ContractCreation {
            address,
            confirmation: TxConfirmation {
                tx_hash,
                block_number: Some(state.next_nonce),
            },
        })
    }

    async fn add_time_range(&self, staking: Address, range: &TimeRange) -> DeployResult<TxConfirmation> {
        let mut state = self.state.lock().unwrap();
        let tx_hash = Self::next_tx_hash(&mut state);

        let out_of_order = state.last_end.get(&range.pool).is_some_and(|end| range.start_time < *end);
        let rejected = self.rejected_ranges.contains(&(range.pool.index(), range.quarter.number()));
        let accepted = !out_of_order && !rejected && state.addresses.contains(&staking);

        state.submissions.push(Submission {
            staking,
            range: range.clone(),
            accepted,
        });

        if !accepted {
            return Err(StakeDeployError::transaction_failed("execution reverted", Some(tx_hash)));
        }

        state.last_end.insert(range.pool, range.end_time);
        Ok(TxConfirmation {
            tx_hash,
            block_number: Some(state.next_nonce),
        })
    }
}
