//! Loading creation code from compiled Hardhat artifacts

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;
use staking_types::{DeployResult, StakeDeployError};

#[derive(Debug, Deserialize)]
struct HardhatArtifact {
    #[serde(rename = "contractName", default)]
    contract_name: Option<String>,
    bytecode: Bytes,
}

/// Directory of compiled artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Candidate paths: a flat `<Name>.json`, then the Hardhat layout
    /// `contracts/<Name>.sol/<Name>.json`.
    fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{}.json", name)),
            self.root.join("contracts").join(format!("{}.sol", name)).join(format!("{}.json", name)),
        ]
    }

    /// Creation bytecode of the named contract
    pub fn creation_code(&self, name: &str) -> DeployResult<Bytes> {
        let path = self
            .candidates(name)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| {
                StakeDeployError::artifact(name, &format!("no artifact found under {}", self.root.display()))
            })?;

        Self::read_bytecode(name, &path)
    }

    fn read_bytecode(name: &str, path: &Path) -> DeployResult<Bytes> {
        let content = fs::read_to_string(path).map_err(|e| StakeDeployError::io(&path.display().to_string(), &e))?;
        let artifact: HardhatArtifact = serde_json::from_str(&content)
            .map_err(|e| StakeDeployError::artifact(name, &format!("malformed artifact {}: {}", path.display(), e)))?;

        if let Some(contract_name) = &artifact.contract_name {
            if contract_name != name {
                log::warn!("Artifact {} declares contract {}, expected {}", path.display(), contract_name, name);
            }
        }

        if artifact.bytecode.is_empty() {
            return Err(StakeDeployError::artifact(name, "bytecode is empty (abstract contract or interface?)"));
        }

        Ok(artifact.bytecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_reads_flat_and_hardhat_layouts() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("SimpleERC20.json"), r#"{"contractName":"SimpleERC20","bytecode":"0x6080"}"#);
        write(
            &dir.path().join("contracts/ApeCoinStaking.sol/ApeCoinStaking.json"),
            r#"{"contractName":"ApeCoinStaking","abi":[],"bytecode":"0x60806040"}"#,
        );

        let store = ArtifactStore::new(dir.path());
        assert_eq!(store.creation_code("SimpleERC20").unwrap().to_vec(), vec![0x60, 0x80]);
        assert_eq!(store.creation_code("ApeCoinStaking").unwrap().len(), 4);
    }

    #[test]
    fn test_missing_or_empty_artifacts_fail() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("IStaking.json"), r#"{"bytecode":"0x"}"#);
        write(&dir.path().join("Broken.json"), r#"{"abi":[]}"#);

        let store = ArtifactStore::new(dir.path());
        assert!(matches!(store.creation_code("Nope"), Err(StakeDeployError::Artifact { .. })));
        assert!(matches!(store.creation_code("IStaking"), Err(StakeDeployError::Artifact { .. })));
        assert!(matches!(store.creation_code("Broken"), Err(StakeDeployError::Artifact { .. })));
    }
}
