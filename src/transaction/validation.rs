/// Required-field validation for submitted transactions
use crate::error::ChainError;
use crate::transaction::types::{Transaction, TransactionRequest};

impl TransactionRequest {
    /// Turn the request into a stageable transaction, failing on the first
    /// absent field in `sender`, `receiver`, `amount` order.
    pub fn into_transaction(self) -> Result<Transaction, ChainError> {
        let sender = self.sender.ok_or(ChainError::MissingField("sender"))?;
        let receiver = self.receiver.ok_or(ChainError::MissingField("receiver"))?;
        let amount = self.amount.ok_or(ChainError::MissingField("amount"))?;

        Ok(Transaction {
            sender,
            receiver,
            amount,
        })
    }
}
