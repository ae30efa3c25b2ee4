use crate::error::ChainError;
use crate::miner::ProofOfWork;

use super::chain::{hash_block, Block};

/// Walk every adjacent pair checking hash linkage, then the proof-of-work
/// predicate between the pair's proofs. Genesis itself is not checked, so a
/// single-block chain is valid; an empty one is not.
pub fn validate_chain(chain: &[Block], pow: &ProofOfWork) -> Result<(), ChainError> {
    if chain.is_empty() {
        return Err(ChainError::EmptyChain);
    }

    for pair in chain.windows(2) {
        let (previous, block) = (&pair[0], &pair[1]);
        if block.previous_hash != hash_block(previous) {
            return Err(ChainError::InvalidBlockLinkage { index: block.index });
        }
        if !pow.accepts(previous.proof, block.proof) {
            return Err(ChainError::InvalidProofOfWork { index: block.index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Ledger;

    fn mined_chain(blocks: usize) -> (Ledger, Vec<Block>) {
        let mut ledger = Ledger::with_proof_of_work(ProofOfWork::new(2));
        for i in 0..blocks {
            ledger.stage_transaction("A", "B", i as u64);
            let last = ledger.last_block().unwrap().clone();
            let proof = ledger.proof_of_work().seal(last.proof);
            ledger.seal_block(proof, last.hash());
        }
        let chain = ledger.chain().to_vec();
        (ledger, chain)
    }

    #[test]
    fn test_valid_chain_passes() {
        let (ledger, chain) = mined_chain(3);
        assert!(validate_chain(&chain, &ledger.proof_of_work()).is_ok());
    }

    #[test]
    fn test_empty_chain_is_invalid() {
        assert_eq!(
            validate_chain(&[], &ProofOfWork::default()),
            Err(ChainError::EmptyChain)
        );
    }

    #[test]
    fn test_genesis_only_is_valid() {
        assert!(validate_chain(&[Block::genesis()], &ProofOfWork::default()).is_ok());
    }

    #[test]
    fn test_altered_previous_hash_byte_fails() {
        let (ledger, mut chain) = mined_chain(3);
        let mut bytes = chain[2].previous_hash.clone().into_bytes();
        bytes[0] = if bytes[0] == b'a' { b'b' } else { b'a' };
        chain[2].previous_hash = String::from_utf8(bytes).unwrap();

        assert_eq!(
            validate_chain(&chain, &ledger.proof_of_work()),
            Err(ChainError::InvalidBlockLinkage { index: 3 })
        );
        assert!(!ledger.validate(&chain));
    }

    #[test]
    fn test_tampered_transaction_breaks_successor_link() {
        let (ledger, mut chain) = mined_chain(3);
        chain[1].transactions[0].receiver = "Mallory".to_string();
        assert_eq!(
            validate_chain(&chain, &ledger.proof_of_work()),
            Err(ChainError::InvalidBlockLinkage { index: 3 })
        );
    }

    #[test]
    fn test_bad_proof_fails() {
        let (ledger, mut chain) = mined_chain(1);
        let pow = ledger.proof_of_work();
        let previous_proof = chain[0].proof;
        let bad = (1..).find(|p| !pow.accepts(previous_proof, *p)).unwrap();
        chain[1].proof = bad;

        assert_eq!(
            validate_chain(&chain, &pow),
            Err(ChainError::InvalidProofOfWork { index: 2 })
        );
    }

    #[test]
    fn test_maximal_proof_is_rejected_without_overflow() {
        let genesis = Block::genesis();
        let forged = Block::new(2, u64::MAX, genesis.hash(), Vec::new());
        let chain = vec![genesis, forged];

        assert_eq!(
            validate_chain(&chain, &ProofOfWork::default()),
            Err(ChainError::InvalidProofOfWork { index: 2 })
        );
    }
}
