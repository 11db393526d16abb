//! JSON-RPC chain client backed by alloy

use std::path::PathBuf;
use std::time::Duration;

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{BlockNumberOrTag, TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    sol,
    sol_types::SolValue,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use staking_types::{ConstructorArgs, DeployResult, StakeDeployError, TimeRange};

use crate::artifacts::ArtifactStore;
use crate::chain::{ChainClient, ContractCreation, DeployRequest, TxConfirmation};
use crate::config::{ResolvedAccounts, ResolvedNetwork};

sol! {
    /// Reward schedule entry point of the staking contract
    interface IRewardStaking {
        function addTimeRange(
            uint256 poolId,
            uint256 amount,
            uint256 startTimestamp,
            uint256 endTimestamp,
            uint256 capPerPosition
        ) external;
    }
}

/// Transaction settings shared by every submission
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub confirmations: u64,
    pub confirmation_timeout: Duration,
    pub artifacts_dir: PathBuf,
}

/// Chain client for EVM JSON-RPC endpoints
pub struct EvmChainClient {
    provider: DynProvider,
    sender: Address,
    gas_price_wei: Option<u128>,
    settings: ClientSettings,
    artifacts: ArtifactStore,
}

impl EvmChainClient {
    /// Connect to the network and pick the deployer account
    pub async fn connect(network: &ResolvedNetwork, settings: ClientSettings) -> DeployResult<Self> {
        let url = parse_url(&network.url)?;

        let (provider, sender) = match &network.accounts {
            ResolvedAccounts::PrivateKey(key) => {
                let signer: PrivateKeySigner = key
                    .parse()
                    .map_err(|e| StakeDeployError::invalid_config("accounts", &format!("invalid private key: {}", e)))?;
                let sender = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                (provider, sender)
            }
            ResolvedAccounts::Remote => {
                let provider = ProviderBuilder::new().connect_http(url).erased();
                let accounts = provider
                    .get_accounts()
                    .await
                    .map_err(|e| StakeDeployError::rpc_error(&format!("eth_accounts failed: {}", e)))?;
                let sender = accounts.first().copied().ok_or_else(|| {
                    StakeDeployError::missing_config("accounts", "node exposes no unlocked accounts")
                })?;
                (provider, sender)
            }
        };

        log::info!("Deployer account: {}", sender);

        Ok(Self {
            provider,
            sender,
            gas_price_wei: network.gas_price_wei,
            artifacts: ArtifactStore::new(settings.artifacts_dir.clone()),
            settings,
        })
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Send a transaction and wait for the configured confirmations
    async fn send_and_confirm(&self, tx: TransactionRequest, what: &str) -> DeployResult<TransactionReceipt> {
        let mut tx = tx.with_from(self.sender);
        if let Some(gas_price) = self.gas_price_wei {
            tx = tx.with_gas_price(gas_price);
        }

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| StakeDeployError::transaction_failed(&e.to_string(), None))?;
        let tx_hash = pending.tx_hash().to_string();
        log::debug!("Submitted {} in {}", what, tx_hash);

        let receipt = tokio::time::timeout(
            self.settings.confirmation_timeout,
            pending.with_required_confirmations(self.settings.confirmations).get_receipt(),
        )
        .await
        .map_err(|_| StakeDeployError::ConfirmationTimeout {
            what: format!("{} ({})", what, tx_hash),
            timeout_secs: self.settings.confirmation_timeout.as_secs(),
        })?
        .map_err(|e| StakeDeployError::transaction_failed(&e.to_string(), Some(tx_hash.clone())))?;

        if !receipt.status() {
            return Err(StakeDeployError::transaction_failed("transaction reverted", Some(tx_hash)));
        }

        Ok(receipt)
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    async fn chain_id(&self) -> DeployResult<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| StakeDeployError::rpc_error(&format!("eth_chainId failed: {}", e)))
    }

    async fn latest_block_timestamp(&self) -> DeployResult<u64> {
        fetch_latest_timestamp(&self.provider).await
    }

    async fn deploy_contract(&self, request: &DeployRequest) -> DeployResult<ContractCreation> {
        let creation_code = self.artifacts.creation_code(&request.artifact)?;
        let mut code = creation_code.to_vec();
        code.extend_from_slice(&encode_constructor_args(&request.args));

        let tx = TransactionRequest::default().with_deploy_code(Bytes::from(code));
        let receipt = self.send_and_confirm(tx, &request.logical_name).await?;

        let tx_hash = receipt.transaction_hash.to_string();
        let address = receipt.contract_address.ok_or_else(|| {
            StakeDeployError::transaction_failed("receipt carries no contract address", Some(tx_hash.clone()))
        })?;

        Ok(ContractCreation {
            address,
            confirmation: TxConfirmation {
                tx_hash,
                block_number: receipt.block_number,
            },
        })
    }

    async fn add_time_range(&self, staking: Address, range: &TimeRange) -> DeployResult<TxConfirmation> {
        let call = add_time_range_call(range);
        let tx = TransactionRequest::default().with_to(staking).with_call(&call);

        let what = format!("addTimeRange pool {} {}", range.pool.index(), range.quarter);
        let receipt = self.send_and_confirm(tx, &what).await?;

        Ok(TxConfirmation {
            tx_hash: receipt.transaction_hash.to_string(),
            block_number: receipt.block_number,
        })
    }
}

/// Read the latest block timestamp without a signer
pub async fn latest_block_timestamp_at(url: &str) -> DeployResult<u64> {
    let provider = ProviderBuilder::new().connect_http(parse_url(url)?).erased();
    fetch_latest_timestamp(&provider).await
}

async fn fetch_latest_timestamp(provider: &DynProvider) -> DeployResult<u64> {
    let block = provider
        .get_block_by_number(BlockNumberOrTag::Latest)
        .await
        .map_err(|e| StakeDeployError::rpc_error(&format!("eth_getBlockByNumber failed: {}", e)))?
        .ok_or_else(|| StakeDeployError::rpc_error("node returned no latest block"))?;

    Ok(block.header.timestamp)
}

fn parse_url(url: &str) -> DeployResult<Url> {
    url.parse()
        .map_err(|e| StakeDeployError::invalid_config("url", &format!("invalid RPC url: {}", e)))
}

/// ABI-encoded constructor parameters, appended to the creation code
pub fn encode_constructor_args(args: &ConstructorArgs) -> Vec<u8> {
    match args {
        ConstructorArgs::RewardToken { name, symbol } => (name.clone(), symbol.clone()).abi_encode_params(),
        ConstructorArgs::Collateral { name, symbol, base_uri, max_supply } => {
            (name.clone(), symbol.clone(), base_uri.clone(), *max_supply).abi_encode_params()
        }
        ConstructorArgs::Staking { reward_token, collateral_a, collateral_b, collateral_pair } => {
            (*reward_token, *collateral_a, *collateral_b, *collateral_pair).abi_encode_params()
        }
        ConstructorArgs::Voting { staking } => (*staking,).abi_encode_params(),
    }
}

pub fn add_time_range_call(range: &TimeRange) -> IRewardStaking::addTimeRangeCall {
    IRewardStaking::addTimeRangeCall {
        poolId: range.pool.as_u256(),
        amount: range.reward_budget,
        startTimestamp: alloy::primitives::U256::from(range.start_time),
        endTimestamp: alloy::primitives::U256::from(range.end_time),
        capPerPosition: range.per_deposit_cap,
    }
}
