/// Transaction types for VaultCoin
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer staged in the mempool and later sealed into a block.
///
/// `amount` keeps the JSON number exactly as it was supplied so a chain
/// received from a peer re-hashes to the digest the peer computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: impl Into<Number>) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount: amount.into(),
        }
    }
}

/// Body of a transaction submission. Every field is optional so that a
/// missing one can be reported by name instead of failing deserialization.
/// An explicit `null` is treated the same as an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<Number>,
}
