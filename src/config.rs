//! Configuration management for VaultCoin

use crate::error::ChainError;
use crate::miner::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "vaultcoin.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub mining: MiningConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NetworkConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bootstrap_peers: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bootstrap_peers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MiningConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,
    #[serde(default = "default_reward_receiver")]
    pub reward_receiver: String,
    #[serde(default = "default_reward_amount")]
    pub reward_amount: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            reward_receiver: default_reward_receiver(),
            reward_amount: default_reward_amount(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConsensusConfig {
    #[serde(default = "default_peer_timeout_secs")]
    pub peer_timeout_secs: u64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            peer_timeout_secs: default_peer_timeout_secs(),
        }
    }
}

impl ConsensusConfig {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, ChainError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the node cannot run with.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !(1..=MAX_DIFFICULTY).contains(&self.mining.difficulty) {
            return Err(ChainError::ConfigError(format!(
                "mining.difficulty must be between 1 and {}",
                MAX_DIFFICULTY
            )));
        }
        if self.mining.reward_receiver.trim().is_empty() {
            return Err(ChainError::ConfigError(
                "mining.reward_receiver must not be empty".to_string(),
            ));
        }
        if self.consensus.peer_timeout_secs == 0 {
            return Err(ChainError::ConfigError(
                "consensus.peer_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.network.host.trim().is_empty() {
            return Err(ChainError::ConfigError(
                "network.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    Config::from_toml(&contents)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_difficulty() -> usize {
    DEFAULT_DIFFICULTY
}

fn default_reward_receiver() -> String {
    "Node1".to_string()
}

fn default_reward_amount() -> u64 {
    10
}

fn default_peer_timeout_secs() -> u64 {
    5
}
