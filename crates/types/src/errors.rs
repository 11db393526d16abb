use thiserror::Error;

// ============================================================================
// Main Error Enum
// ============================================================================

/// Error enum for the staking deployment driver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StakeDeployError {
    // ========================================================================
    // Core Errors
    // ========================================================================

    /// Numeric input could not be converted to base units
    #[error("Cannot convert '{amount}' to base units: {reason}")]
    Conversion { amount: String, reason: String },

    /// A contract creation transaction reverted or never confirmed
    #[error("Deployment of {contract} failed{}: {reason}", fmt_tx(.tx_hash))]
    DeploymentFailure { contract: String, reason: String, tx_hash: Option<String> },

    /// An addTimeRange transaction reverted or never confirmed
    #[error("Schedule submission for pool {pool} quarter {quarter} failed{}: {reason}", fmt_tx(.tx_hash))]
    ScheduleSubmissionFailure { pool: u8, quarter: u8, reason: String, tx_hash: Option<String> },

    // ========================================================================
    // Network and RPC Errors
    // ========================================================================

    /// RPC communication error
    #[error("RPC error: {message}")]
    RpcError { message: String },

    /// Transaction was rejected or reverted
    #[error("Transaction failed{}: {reason}", fmt_tx(.tx_hash))]
    TransactionFailed { reason: String, tx_hash: Option<String> },

    /// Confirmation did not arrive in time
    #[error("Timed out after {timeout_secs}s waiting for confirmation of {what}")]
    ConfirmationTimeout { what: String, timeout_secs: u64 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    /// Invalid configuration
    #[error("Invalid configuration for '{component}': {reason}")]
    InvalidConfiguration { component: String, reason: String },

    /// Missing configuration
    #[error("Missing configuration for '{component}': {reason}")]
    MissingConfiguration { component: String, reason: String },

    /// Contract artifact could not be loaded
    #[error("Artifact '{name}' unavailable: {reason}")]
    Artifact { name: String, reason: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Filesystem error
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn fmt_tx(tx_hash: &Option<String>) -> String {
    match tx_hash {
        Some(hash) => format!(" (tx {})", hash),
        None => String::new(),
    }
}

impl StakeDeployError {
    /// Create a conversion error
    pub fn conversion(amount: &str, reason: &str) -> Self {
        Self::Conversion {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a deployment failure
    pub fn deployment_failure(contract: &str, reason: &str, tx_hash: Option<String>) -> Self {
        Self::DeploymentFailure {
            contract: contract.to_string(),
            reason: reason.to_string(),
            tx_hash,
        }
    }

    /// Create a schedule submission failure. `quarter` is one-based.
    pub fn schedule_failure(pool: u8, quarter: u8, reason: &str, tx_hash: Option<String>) -> Self {
        Self::ScheduleSubmissionFailure {
            pool,
            quarter,
            reason: reason.to_string(),
            tx_hash,
        }
    }

    /// Create an RPC error
    pub fn rpc_error(message: &str) -> Self {
        Self::RpcError {
            message: message.to_string(),
        }
    }

    /// Create a transaction failure
    pub fn transaction_failed(reason: &str, tx_hash: Option<String>) -> Self {
        Self::TransactionFailed {
            reason: reason.to_string(),
            tx_hash,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(component: &str, reason: &str) -> Self {
        Self::InvalidConfiguration {
            component: component.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing configuration error
    pub fn missing_config(component: &str, reason: &str) -> Self {
        Self::MissingConfiguration {
            component: component.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an artifact error
    pub fn artifact(name: &str, reason: &str) -> Self {
        Self::Artifact {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an I/O error
    pub fn io(path: &str, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StakeDeployError {
    fn from(err: serde_json::Error) -> Self {
        StakeDeployError::Serialization(err.to_string())
    }
}

/// Result type alias using the shared error type
pub type DeployResult<T> = std::result::Result<T, StakeDeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failing_step() {
        let err = StakeDeployError::schedule_failure(2, 3, "execution reverted", Some("0xabc".into()));
        assert_eq!(
            err.to_string(),
            "Schedule submission for pool 2 quarter 3 failed (tx 0xabc): execution reverted"
        );

        let err = StakeDeployError::deployment_failure("Voting", "no contract address", None);
        assert_eq!(err.to_string(), "Deployment of Voting failed: no contract address");
    }
}
