//! Staging area for transactions awaiting the next block

use crate::transaction::Transaction;

/// Ordered list of staged transactions. Owned by the ledger; draining it
/// hands every staged transaction over to exactly one block.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Take every staged transaction in staging order, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    pub fn get_all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut pool = Mempool::new();
        pool.add_transaction(Transaction::new("A", "B", 1));
        pool.add_transaction(Transaction::new("C", "D", 2));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get_all_transactions()[1].receiver, "D");

        let drained = pool.drain();
        assert_eq!(drained[0].sender, "A");
        assert_eq!(drained[1].sender, "C");
        assert!(pool.is_empty());
        assert!(pool.drain().is_empty());
    }
}
