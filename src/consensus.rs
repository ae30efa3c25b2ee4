//! Longest-valid-chain consensus
//!
//! A node adopts a peer's chain only when it is strictly longer than every
//! other candidate seen so far (the local chain included) and validates.
//! Equal length never replaces the local chain.

use crate::blockchain::{validate_chain, Block, Ledger};
use crate::error::ChainError;
use crate::network::NodeRegistry;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default bound on a single peer fetch.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);

/// Inter-node wire contract: a node's whole chain and its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: u64,
}

impl ChainResponse {
    pub fn from_chain(chain: &[Block]) -> Self {
        Self {
            chain: chain.to_vec(),
            length: chain.len() as u64,
        }
    }
}

/// Where peer chains come from. Implemented over HTTP by
/// [`crate::sync::HttpChainSource`]; tests plug in canned responses.
pub trait ChainSource: Send + Sync + 'static {
    fn fetch_chain(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<ChainResponse, ChainError>> + Send;
}

pub struct ConsensusResolver<S> {
    source: Arc<S>,
    peer_timeout: Duration,
}

impl<S: ChainSource> ConsensusResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_timeout(source, DEFAULT_PEER_TIMEOUT)
    }

    pub fn with_timeout(source: S, peer_timeout: Duration) -> Self {
        Self {
            source: Arc::new(source),
            peer_timeout,
        }
    }

    pub fn peer_timeout(&self) -> Duration {
        self.peer_timeout
    }

    /// Replace the ledger's chain with the longest valid peer chain, if one
    /// is strictly longer. Returns whether the chain was replaced.
    ///
    /// Candidates are compared by the length the peer reports; only the
    /// chain itself is validated. Peers that time out or fail are skipped.
    /// No ledger lock is held while peers are contacted.
    pub async fn resolve(&self, ledger: &RwLock<Ledger>, registry: &NodeRegistry) -> bool {
        let (mut max_length, pow) = {
            let ledger = ledger.read().await;
            (ledger.len() as u64, ledger.proof_of_work())
        };

        let mut winner: Option<(u64, Vec<Block>)> = None;
        for (peer, response) in self.fetch_all(registry.list_nodes()).await {
            if response.length <= max_length {
                debug!(peer = %peer, length = response.length, "peer chain is not longer");
                continue;
            }
            if let Err(e) = validate_chain(&response.chain, &pow) {
                warn!(peer = %peer, error = %e, "rejecting invalid peer chain");
                continue;
            }
            max_length = response.length;
            winner = Some((response.length, response.chain));
        }

        let Some((length, chain)) = winner else {
            return false;
        };

        let mut ledger = ledger.write().await;
        // The local chain may have grown while peers were being contacted.
        if length <= ledger.len() as u64 {
            debug!(length, "local chain caught up during resolution");
            return false;
        }
        match ledger.replace_chain(chain) {
            Ok(()) => {
                info!(length, "replaced local chain with longer peer chain");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to replace chain");
                false
            }
        }
    }

    /// Fetch every peer concurrently. Successful responses come back in
    /// the order the peers were given.
    async fn fetch_all(&self, peers: Vec<String>) -> Vec<(String, ChainResponse)> {
        let mut tasks = JoinSet::new();
        for (position, peer) in peers.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let limit = self.peer_timeout;
            tasks.spawn(async move {
                let outcome = match tokio::time::timeout(limit, source.fetch_chain(&peer)).await {
                    Ok(result) => result,
                    Err(_) => Err(ChainError::NetworkError(format!(
                        "timed out after {} ms",
                        limit.as_millis()
                    ))),
                };
                (position, peer, outcome)
            });
        }

        let mut responses = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, peer, Ok(response))) => responses.push((position, peer, response)),
                Ok((_, peer, Err(e))) => warn!(peer = %peer, error = %e, "skipping unreachable peer"),
                Err(e) => warn!(error = %e, "peer fetch task failed"),
            }
        }
        responses.sort_by_key(|(position, _, _)| *position);
        responses
            .into_iter()
            .map(|(_, peer, response)| (peer, response))
            .collect()
    }
}
