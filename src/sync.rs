//! HTTP chain fetching for consensus
//!
//! Peers expose `GET /get_chain` returning `{"chain": [...], "length": n}`.
//! [`HttpChainSource`] is the [`ChainSource`] used by a running node.

use crate::consensus::{ChainResponse, ChainSource, DEFAULT_PEER_TIMEOUT};
use crate::error::ChainError;
use std::time::Duration;

/// Path every node serves its chain on.
pub const CHAIN_PATH: &str = "/get_chain";

#[derive(Debug, Clone)]
pub struct HttpChainSource {
    client: reqwest::Client,
}

impl HttpChainSource {
    pub fn new() -> Result<Self, ChainError> {
        Self::with_timeout(DEFAULT_PEER_TIMEOUT)
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn chain_url(address: &str) -> String {
        format!("http://{}{}", address, CHAIN_PATH)
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, address: &str) -> Result<ChainResponse, ChainError> {
        let response = self.client.get(Self::chain_url(address)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::PeerStatus {
                peer: address.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<ChainResponse>().await?)
    }
}
