//! Transaction module split into types and validation for better modularity

pub mod types;
pub mod validation;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;
    use serde_json::json;

    #[test]
    fn test_request_with_all_fields_builds_transaction() {
        let request: TransactionRequest =
            serde_json::from_value(json!({"sender": "A", "receiver": "B", "amount": 10})).unwrap();
        let tx = request.into_transaction().unwrap();
        assert_eq!(tx, Transaction::new("A", "B", 10));
    }

    #[test]
    fn test_request_missing_amount_is_rejected() {
        let request: TransactionRequest =
            serde_json::from_value(json!({"sender": "A", "receiver": "B"})).unwrap();
        assert_eq!(
            request.into_transaction(),
            Err(ChainError::MissingField("amount"))
        );
    }

    #[test]
    fn test_request_missing_sender_is_reported_first() {
        let request: TransactionRequest = serde_json::from_value(json!({"amount": 1})).unwrap();
        assert_eq!(
            request.into_transaction(),
            Err(ChainError::MissingField("sender"))
        );
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let request: TransactionRequest =
            serde_json::from_value(json!({"sender": "A", "receiver": "B", "amount": null})).unwrap();
        assert_eq!(
            request.into_transaction(),
            Err(ChainError::MissingField("amount"))
        );
    }

    #[test]
    fn test_float_amount_is_preserved() {
        let tx: Transaction =
            serde_json::from_value(json!({"sender": "A", "receiver": "B", "amount": 2.5})).unwrap();
        assert_eq!(serde_json::to_value(&tx).unwrap()["amount"], json!(2.5));
    }

    #[test]
    fn test_transaction_wire_field_names() {
        let value = serde_json::to_value(Transaction::new("node", "Node1", 10)).unwrap();
        assert_eq!(value, json!({"sender": "node", "receiver": "Node1", "amount": 10}));
    }
}
