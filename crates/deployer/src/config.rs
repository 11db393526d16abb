use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use staking_types::{DeployResult, StakeDeployError, COLLATERAL_COUNT};

/// Deployer configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeployConfig {
    /// Network profile used when none is given on the command line
    pub default_network: String,

    /// Block confirmations to wait for after each transaction
    pub confirmations: u64,

    /// Maximum wait for a single confirmation, in seconds
    pub confirmation_timeout_secs: u64,

    /// Directory holding compiled contract artifacts
    pub artifacts_dir: PathBuf,

    /// Named network profiles
    pub networks: BTreeMap<String, NetworkProfile>,

    /// Constructor parameters of the deployed contracts
    #[serde(default)]
    pub contracts: ContractsConfig,
}

/// Connection settings for one chain
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkProfile {
    /// JSON-RPC endpoint; `${VAR}` placeholders are read from the environment
    pub url: String,

    /// Expected chain id, checked after connecting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Where the deployer account comes from
    #[serde(default)]
    pub accounts: AccountSource,

    /// Fixed gas price in wei; automatic estimation when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_wei: Option<u64>,

    /// Environment variable that overrides `gas_price_wei` ("auto" or wei)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_env: Option<String>,

    /// Node state is discarded when the node stops
    #[serde(default)]
    pub ephemeral: bool,
}

/// Deployer account source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSource {
    /// First unlocked account of the node signs
    #[default]
    Remote,

    /// Hex private key read from the named environment variable
    PrivateKeyEnv(String),
}

/// Constructor parameters of the fixed contract topology
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractsConfig {
    pub reward_token: TokenConfig,
    pub collaterals: Vec<CollateralConfig>,
    pub staking_artifact: String,
    pub voting_artifact: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    pub artifact: String,
    pub name: String,
    pub symbol: String,
}

/// One non-fungible collateral collection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollateralConfig {
    /// Short name used in logs and the manifest
    pub key: String,
    pub artifact: String,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub max_supply: u64,
}

/// A network profile with environment placeholders resolved
#[derive(Clone)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: String,
    pub chain_id: Option<u64>,
    pub accounts: ResolvedAccounts,
    pub gas_price_wei: Option<u128>,
    pub ephemeral: bool,
}

#[derive(Clone)]
pub enum ResolvedAccounts {
    Remote,
    PrivateKey(String),
}

impl fmt::Debug for ResolvedAccounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedAccounts::Remote => write!(f, "Remote"),
            ResolvedAccounts::PrivateKey(_) => write!(f, "PrivateKey(<redacted>)"),
        }
    }
}

impl fmt::Debug for ResolvedNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedNetwork")
            .field("name", &self.name)
            .field("chain_id", &self.chain_id)
            .field("accounts", &self.accounts)
            .field("gas_price_wei", &self.gas_price_wei)
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

impl DeployConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> DeployResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| StakeDeployError::io(path, &e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> DeployResult<Self> {
        let config: DeployConfig = toml::from_str(content)
            .map_err(|e| StakeDeployError::invalid_config("config", &format!("failed to parse: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> DeployResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StakeDeployError::Serialization(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| StakeDeployError::io(path, &e))?;
        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> DeployResult<()> {
        if !self.networks.contains_key(&self.default_network) {
            return Err(StakeDeployError::invalid_config(
                "default_network",
                &format!("'{}' is not a configured network", self.default_network),
            ));
        }

        if self.confirmations == 0 {
            return Err(StakeDeployError::invalid_config("confirmations", "must be at least 1"));
        }

        if self.confirmation_timeout_secs == 0 {
            return Err(StakeDeployError::invalid_config("confirmation_timeout_secs", "must be greater than 0"));
        }

        for (name, profile) in &self.networks {
            profile.validate(name)?;
        }

        self.contracts.validate()
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    /// Select a network profile and resolve its environment references
    pub fn resolve_network<F>(&self, name: &str, env: F) -> DeployResult<ResolvedNetwork>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = self.networks.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            StakeDeployError::invalid_config(
                "network",
                &format!("unknown network '{}' (configured: {})", name, known.join(", ")),
            )
        })?;

        let url = expand_placeholders(&profile.url, &env)?;

        let accounts = match &profile.accounts {
            AccountSource::Remote => ResolvedAccounts::Remote,
            AccountSource::PrivateKeyEnv(var) => match env(var).filter(|k| !k.trim().is_empty()) {
                Some(key) => ResolvedAccounts::PrivateKey(key.trim().to_string()),
                None => {
                    log::warn!("{} is not set, using the node's unlocked accounts on {}", var, name);
                    ResolvedAccounts::Remote
                }
            },
        };

        let env_gas_price = profile.gas_price_env.as_deref().and_then(|var| env(var).map(|v| (var, v)));
        let gas_price_wei = match env_gas_price {
            Some((var, value)) => parse_gas_price(var, &value)?,
            None => profile.gas_price_wei.map(u128::from),
        };

        Ok(ResolvedNetwork {
            name: name.to_string(),
            url,
            chain_id: profile.chain_id,
            accounts,
            gas_price_wei,
            ephemeral: profile.ephemeral,
        })
    }
}

impl NetworkProfile {
    fn validate(&self, name: &str) -> DeployResult<()> {
        if self.url.trim().is_empty() {
            return Err(StakeDeployError::invalid_config(&format!("networks.{}.url", name), "empty"));
        }

        if self.gas_price_wei == Some(0) {
            return Err(StakeDeployError::invalid_config(
                &format!("networks.{}.gas_price_wei", name),
                "must be greater than 0; omit it for automatic estimation",
            ));
        }

        if let AccountSource::PrivateKeyEnv(var) = &self.accounts {
            if var.trim().is_empty() {
                return Err(StakeDeployError::invalid_config(
                    &format!("networks.{}.accounts", name),
                    "private_key_env names no variable",
                ));
            }
        }

        Ok(())
    }
}

impl ContractsConfig {
    fn validate(&self) -> DeployResult<()> {
        if self.collaterals.len() != COLLATERAL_COUNT {
            return Err(StakeDeployError::invalid_config(
                "contracts.collaterals",
                &format!("exactly {} collateral tokens are required, got {}", COLLATERAL_COUNT, self.collaterals.len()),
            ));
        }

        let artifacts = [
            ("contracts.reward_token.artifact", &self.reward_token.artifact),
            ("contracts.staking_artifact", &self.staking_artifact),
            ("contracts.voting_artifact", &self.voting_artifact),
        ];
        for (field, value) in artifacts {
            if value.trim().is_empty() {
                return Err(StakeDeployError::invalid_config(field, "empty"));
            }
        }

        if self.reward_token.name.is_empty() || self.reward_token.symbol.is_empty() {
            return Err(StakeDeployError::invalid_config("contracts.reward_token", "name and symbol are required"));
        }

        for collateral in &self.collaterals {
            collateral.validate()?;
        }

        Ok(())
    }
}

impl CollateralConfig {
    fn validate(&self) -> DeployResult<()> {
        let component = format!("contracts.collaterals.{}", self.key);
        if self.key.is_empty() || self.name.is_empty() || self.symbol.is_empty() || self.artifact.is_empty() {
            return Err(StakeDeployError::invalid_config(&component, "key, artifact, name and symbol are required"));
        }

        if self.max_supply == 0 {
            return Err(StakeDeployError::invalid_config(&component, "max_supply must be greater than 0"));
        }

        Ok(())
    }
}

/// Replace `${VAR}` placeholders using `lookup`
pub fn expand_placeholders<F>(template: &str, lookup: F) -> DeployResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("${") {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = after
            .find('}')
            .ok_or_else(|| StakeDeployError::invalid_config("url", &format!("unterminated placeholder in '{}'", template)))?;

        let var = &after[..close];
        let value = lookup(var)
            .ok_or_else(|| StakeDeployError::missing_config(var, "environment variable is not set"))?;
        expanded.push_str(&value);
        rest = &after[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

fn parse_gas_price(var: &str, value: &str) -> DeployResult<Option<u128>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    match value.parse::<u128>() {
        Ok(0) | Err(_) => Err(StakeDeployError::invalid_config(
            var,
            &format!("'{}' is neither 'auto' nor a positive wei amount", value),
        )),
        Ok(wei) => Ok(Some(wei)),
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();

        networks.insert(
            "localhost".to_string(),
            NetworkProfile {
                url: "http://127.0.0.1:8545".to_string(),
                chain_id: None,
                accounts: AccountSource::Remote,
                gas_price_wei: None,
                gas_price_env: None,
                ephemeral: false,
            },
        );

        networks.insert(
            "goerli".to_string(),
            NetworkProfile {
                url: "https://eth-goerli.alchemyapi.io/v2/${ALCHEMY_KEY}".to_string(),
                chain_id: Some(5),
                accounts: AccountSource::PrivateKeyEnv("PRIVATE_KEY_TESTNET".to_string()),
                gas_price_wei: None,
                gas_price_env: None,
                ephemeral: false,
            },
        );

        networks.insert(
            "zen".to_string(),
            NetworkProfile {
                url: "https://evm-tn-m2.horizenlabs.io/ethv1".to_string(),
                chain_id: Some(1661),
                accounts: AccountSource::PrivateKeyEnv("PRIVATE_KEY_TESTNET".to_string()),
                gas_price_wei: None,
                gas_price_env: Some("GAS_PRICE".to_string()),
                ephemeral: false,
            },
        );

        Self {
            default_network: "localhost".to_string(),
            confirmations: 1,
            confirmation_timeout_secs: 300,
            artifacts_dir: PathBuf::from("artifacts"),
            networks,
            contracts: ContractsConfig::default(),
        }
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            reward_token: TokenConfig {
                artifact: "SimpleERC20".to_string(),
                name: "Mock ERC20".to_string(),
                symbol: "M20".to_string(),
            },
            collaterals: vec![
                CollateralConfig {
                    key: "Alpha".to_string(),
                    artifact: "SimpleERC721".to_string(),
                    name: "Alpha Token".to_string(),
                    symbol: "ATK".to_string(),
                    base_uri: "ipfs://QmeSjSinHpPnmXmspMjwiXyN6zS4E9zccariGR3jxcaWtq/".to_string(),
                    max_supply: 10_000,
                },
                CollateralConfig {
                    key: "Beta".to_string(),
                    artifact: "SimpleERC721".to_string(),
                    name: "Beta Token".to_string(),
                    symbol: "BTK".to_string(),
                    base_uri: "https://boredapeyachtclub.com/api/mutants/".to_string(),
                    max_supply: 19_427,
                },
                CollateralConfig {
                    key: "Gamma".to_string(),
                    artifact: "SimpleERC721".to_string(),
                    name: "Gamma Token".to_string(),
                    symbol: "GTK".to_string(),
                    base_uri: "ipfs://QmTDcCdt3yb6mZitzWBmQr65AW6Wska295Dg9nbEYpSUDR/".to_string(),
                    max_supply: 9_602,
                },
            ],
            staking_artifact: "ApeCoinStaking".to_string(),
            voting_artifact: "ApeCoinStakedVoting".to_string(),
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> DeployResult<()> {
    let mut example_config = DeployConfig::default();

    example_config.networks.insert(
        "hardhat".to_string(),
        NetworkProfile {
            url: "http://127.0.0.1:8545".to_string(),
            chain_id: Some(31337),
            accounts: AccountSource::Remote,
            gas_price_wei: None,
            gas_price_env: Some("GAS_PRICE".to_string()),
            ephemeral: true,
        },
    );

    example_config.save(path)?;
    Ok(())
}
