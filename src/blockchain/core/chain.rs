use crate::crypto::hash_value;
use crate::error::ChainError;
use crate::mempool::Mempool;
use crate::miner::ProofOfWork;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

use super::validation::validate_chain;

pub const GENESIS_PROOF: u64 = 1;
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Local wall-clock rendering used for block timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String,
    pub proof: u64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(index: u64, proof: u64, previous_hash: String, transactions: Vec<Transaction>) -> Self {
        Block {
            index,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            proof,
            previous_hash,
            transactions,
        }
    }

    pub fn genesis() -> Self {
        Block::new(1, GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string(), Vec::new())
    }

    /// JSON value the block digest is computed over.
    pub fn canonical_value(&self) -> Value {
        json!({
            "index": self.index,
            "timestamp": self.timestamp,
            "proof": self.proof,
            "previous_hash": self.previous_hash,
            "transactions": self.transactions,
        })
    }

    pub fn hash(&self) -> String {
        hash_block(self)
    }
}

/// Hex SHA-256 of the block's canonical JSON form.
pub fn hash_block(block: &Block) -> String {
    hash_value(&block.canonical_value())
}

/// Chain and mempool of a single node.
///
/// The chain always starts with the genesis block. Its length only grows
/// through [`Ledger::seal_block`]; consensus may swap the whole chain via
/// [`Ledger::replace_chain`].
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    mempool: Mempool,
    pow: ProofOfWork,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger at the default difficulty, holding only genesis.
    pub fn new() -> Self {
        Self::with_proof_of_work(ProofOfWork::default())
    }

    pub fn with_proof_of_work(pow: ProofOfWork) -> Self {
        Ledger {
            chain: vec![Block::genesis()],
            mempool: Mempool::new(),
            pow,
        }
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        self.pow
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    /// Stage a transfer for the next block and return that block's index.
    pub fn stage_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Number>,
    ) -> u64 {
        self.stage(Transaction::new(sender, receiver, amount))
    }

    pub fn stage(&mut self, tx: Transaction) -> u64 {
        self.mempool.add_transaction(tx);
        self.chain.len() as u64 + 1
    }

    /// Append a block carrying the whole mempool and return a copy of it.
    pub fn seal_block(&mut self, proof: u64, previous_hash: String) -> Block {
        let block = Block::new(
            self.chain.len() as u64 + 1,
            proof,
            previous_hash,
            self.mempool.drain(),
        );
        self.chain.push(block.clone());
        block
    }

    pub fn last_block(&self) -> Result<&Block, ChainError> {
        self.chain.last().ok_or(ChainError::EmptyChain)
    }

    /// Whether `chain` is linked and sealed correctly at this ledger's difficulty.
    pub fn validate(&self, chain: &[Block]) -> bool {
        self.validate_detailed(chain).is_ok()
    }

    /// Like [`Ledger::validate`] but reports the first failing block.
    pub fn validate_detailed(&self, chain: &[Block]) -> Result<(), ChainError> {
        validate_chain(chain, &self.pow)
    }

    pub fn is_valid(&self) -> bool {
        self.validate(&self.chain)
    }

    /// Swap in a whole chain. An empty chain is refused so genesis never
    /// goes missing; any other validation is the caller's job.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> Result<(), ChainError> {
        if chain.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        self.chain = chain;
        Ok(())
    }
}
