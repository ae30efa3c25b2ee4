//! Proof-of-work search and acceptance predicate
//!
//! A proof `p` is accepted against the previous proof `q` when the SHA-256
//! hex digest of the decimal string of `p² - q²` starts with `difficulty`
//! zero characters. The search tries `1, 2, 3, …` and returns the first hit,
//! so every node computes the same proof for the same predecessor.

use crate::crypto::sha256_hex;
use tracing::debug;

/// Leading hex zeros required by default.
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Largest difficulty accepted: a SHA-256 hex digest has 64 characters.
pub const MAX_DIFFICULTY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

impl ProofOfWork {
    /// Difficulty is clamped into `1..=MAX_DIFFICULTY`.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.clamp(1, MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Digest checked by [`ProofOfWork::accepts`]. Squares of any `u64` fit
    /// in `u128`, so the difference is exact over the full proof range.
    pub fn work_digest(previous_proof: u64, proof: u64) -> String {
        let previous = u128::from(previous_proof) * u128::from(previous_proof);
        let current = u128::from(proof) * u128::from(proof);
        let difference = if current >= previous {
            (current - previous).to_string()
        } else {
            format!("-{}", previous - current)
        };
        sha256_hex(difference.as_bytes())
    }

    pub fn accepts(&self, previous_proof: u64, proof: u64) -> bool {
        Self::work_digest(previous_proof, proof)
            .bytes()
            .take(self.difficulty)
            .all(|b| b == b'0')
    }

    /// Exhaustive search for the smallest accepted proof. Unbounded and
    /// CPU-bound: async callers run it on the blocking pool.
    pub fn seal(&self, previous_proof: u64) -> u64 {
        let mut proof = 1u64;
        while !self.accepts(previous_proof, proof) {
            proof += 1;
        }
        debug!(previous_proof, proof, difficulty = self.difficulty, "proof of work found");
        proof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_matches_known_sequence() {
        let pow = ProofOfWork::default();
        assert_eq!(pow.seal(1), 533);
        assert_eq!(pow.seal(533), 45293);
    }

    #[test]
    fn test_seal_is_deterministic() {
        let pow = ProofOfWork::new(3);
        assert_eq!(pow.seal(42), pow.seal(42));
    }

    #[test]
    fn test_accepts_sealed_proof() {
        let pow = ProofOfWork::default();
        for previous in [1u64, 7, 533, 100_000] {
            let proof = pow.seal(previous);
            assert!(pow.accepts(previous, proof));
        }
    }

    #[test]
    fn test_seal_returns_smallest_accepted_value() {
        let pow = ProofOfWork::new(2);
        let proof = pow.seal(10);
        assert!((1..proof).all(|candidate| !pow.accepts(10, candidate)));
    }

    #[test]
    fn test_rejects_arbitrary_proof() {
        let pow = ProofOfWork::default();
        assert!(!pow.accepts(1, 534));
    }

    #[test]
    fn test_negative_difference_is_hashed_with_sign() {
        assert_eq!(
            ProofOfWork::work_digest(3, 2),
            crate::crypto::sha256_hex(b"-5")
        );
    }

    #[test]
    fn test_extreme_proofs_hash_exact_difference() {
        let max = u64::MAX;
        assert_eq!(
            ProofOfWork::work_digest(1, max),
            crate::crypto::sha256_hex(b"340282366920938463426481119284349108224")
        );
        assert_eq!(
            ProofOfWork::work_digest(max, 1),
            crate::crypto::sha256_hex(b"-340282366920938463426481119284349108224")
        );
        assert!(!ProofOfWork::default().accepts(1, max));
        assert!(!ProofOfWork::default().accepts(max, 1));
    }

    #[test]
    fn test_difficulty_is_clamped() {
        assert_eq!(ProofOfWork::new(0).difficulty(), 1);
        assert_eq!(ProofOfWork::new(500).difficulty(), MAX_DIFFICULTY);
    }
}
