//! Node orchestration: owns the shared ledger, peer registry and consensus
//! resolver, and implements the operations the HTTP layer exposes.

use crate::blockchain::{Block, Ledger};
use crate::config::Config;
use crate::consensus::{ChainResponse, ConsensusResolver};
use crate::error::ChainError;
use crate::miner::ProofOfWork;
use crate::network::NodeRegistry;
use crate::sync::HttpChainSource;
use crate::transaction::{Transaction, TransactionRequest};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Random 32-hex-character identity used as the sender of mining rewards.
pub fn generate_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct Node {
    pub node_id: String,
    pub config: Config,
    pub ledger: Arc<RwLock<Ledger>>,
    pub registry: NodeRegistry,
    resolver: ConsensusResolver<HttpChainSource>,
}

impl Node {
    /// Build a node from validated configuration. Bootstrap peers are
    /// registered immediately.
    pub fn new(config: Config) -> Result<Self, ChainError> {
        config.validate()?;

        let ledger = Ledger::with_proof_of_work(ProofOfWork::new(config.mining.difficulty));
        let registry = NodeRegistry::new();
        if !config.network.bootstrap_peers.is_empty() {
            registry.add_nodes(&config.network.bootstrap_peers)?;
        }

        let peer_timeout = config.consensus.peer_timeout();
        let resolver =
            ConsensusResolver::with_timeout(HttpChainSource::with_timeout(peer_timeout)?, peer_timeout);

        let node_id = generate_node_id();
        info!(node_id = %node_id, difficulty = config.mining.difficulty, "node initialised");

        Ok(Self {
            node_id,
            config,
            ledger: Arc::new(RwLock::new(ledger)),
            registry,
            resolver,
        })
    }

    fn reward_transaction(&self) -> Transaction {
        Transaction::new(
            self.node_id.clone(),
            self.config.mining.reward_receiver.clone(),
            self.config.mining.reward_amount,
        )
    }

    /// Seal the mempool into a new block, adding this node's reward.
    ///
    /// The proof is searched on the blocking pool with no lock held. If the
    /// tip moved in the meantime (another block was mined or the chain was
    /// replaced) the search restarts against the new tip.
    pub async fn mine_block(&self) -> Result<Block, ChainError> {
        loop {
            let (pow, previous_proof, previous_hash) = {
                let ledger = self.ledger.read().await;
                let last = ledger.last_block()?;
                (ledger.proof_of_work(), last.proof, last.hash())
            };

            let proof = tokio::task::spawn_blocking(move || pow.seal(previous_proof)).await?;

            let mut ledger = self.ledger.write().await;
            if ledger.last_block()?.hash() != previous_hash {
                debug!("chain tip moved during proof search, retrying");
                continue;
            }
            ledger.stage(self.reward_transaction());
            let block = ledger.seal_block(proof, previous_hash);
            info!(
                index = block.index,
                proof = block.proof,
                transactions = block.transactions.len(),
                "mined block"
            );
            return Ok(block);
        }
    }

    pub async fn chain(&self) -> ChainResponse {
        ChainResponse::from_chain(self.ledger.read().await.chain())
    }

    pub async fn is_chain_valid(&self) -> bool {
        self.ledger.read().await.is_valid()
    }

    /// Validate a submitted transaction and stage it. Returns the index of
    /// the block it will land in.
    pub async fn submit_transaction(&self, request: TransactionRequest) -> Result<u64, ChainError> {
        let tx = request.into_transaction()?;
        let index = self.ledger.write().await.stage(tx);
        debug!(index, "transaction staged");
        Ok(index)
    }

    /// Register peers. `None` or an empty list is rejected, as is any list
    /// containing an unparseable address.
    pub fn connect_nodes(&self, nodes: Option<Vec<String>>) -> Result<Vec<String>, ChainError> {
        match nodes {
            Some(nodes) if !nodes.is_empty() => {
                self.registry.add_nodes(&nodes)?;
                Ok(self.registry.list_nodes())
            }
            _ => Err(ChainError::NoNodesSupplied),
        }
    }

    /// Run consensus against every registered peer and return whether the
    /// chain was replaced together with the resulting chain.
    pub async fn resolve_conflicts(&self) -> (bool, ChainResponse) {
        let replaced = self.resolver.resolve(&self.ledger, &self.registry).await;
        (replaced, self.chain().await)
    }
}
