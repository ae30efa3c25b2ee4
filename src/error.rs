//! Error types for VaultCoin

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("No nodes supplied")]
    NoNodesSupplied,
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Chain is empty")]
    EmptyChain,
    #[error("Invalid block linkage at index {index}")]
    InvalidBlockLinkage { index: u64 },
    #[error("Invalid proof of work at index {index}")]
    InvalidProofOfWork { index: u64 },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Peer {peer} answered with status {status}")]
    PeerStatus { peer: String, status: u16 },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::NetworkError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ChainError {
    fn from(err: tokio::task::JoinError) -> Self {
        ChainError::TaskFailed(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
