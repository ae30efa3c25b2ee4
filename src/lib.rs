//! VaultCoin - a toy proof-of-work ledger node with longest-chain consensus
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Blocks, the ledger (chain + mempool) and chain validation
//! - [`transaction`] - Transaction types and required-field validation
//! - [`mempool`] - Staging area for the next block
//!
//! ## Consensus & Mining
//! - [`miner`] - Proof-of-work search and acceptance predicate
//! - [`consensus`] - Longest-valid-chain resolution over a [`consensus::ChainSource`]
//!
//! ## Cryptography
//! - [`crypto`] - Canonical JSON and SHA-256 block hashing
//!
//! ## Networking & Integration
//! - [`network`] - Peer registry
//! - [`sync`] - HTTP chain fetching from peers
//! - [`node`] - Node orchestration shared by the HTTP layer
//! - `api` - axum REST API (feature `api`)
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod mempool;
pub mod transaction;

// ============================================================================
// Consensus & Mining
// ============================================================================
pub mod consensus;
pub mod miner;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Networking & Integration
// ============================================================================
pub mod network;
pub mod node;
pub mod sync;

#[cfg(feature = "api")]
pub mod api;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
