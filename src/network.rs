//! Peer bookkeeping for VaultCoin
//!
//! The registry is a deduplicated set of peer authorities (`host[:port]`).
//! Addresses are parsed, never contacted, at registration time.

use crate::error::ChainError;
use parking_lot::RwLock;
use reqwest::Url;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Extract the `host[:port]` authority of a peer address.
///
/// Full URLs (`http://10.0.0.2:5002/get_chain`) and bare authorities
/// (`10.0.0.2:5002`) are both accepted; a missing scheme is read as `http`.
pub fn parse_authority(address: &str) -> Result<String, ChainError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ChainError::InvalidAddress(address.to_string()));
    }

    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{}", trimmed))
    }
    .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", address, e)))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ChainError::InvalidAddress(format!("{}: no host", address)))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Thread-safe set of known peers. Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Arc<RwLock<HashSet<String>>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one peer; registering it again is a no-op.
    pub fn add_node(&self, address: &str) -> Result<String, ChainError> {
        let authority = parse_authority(address)?;
        if self.nodes.write().insert(authority.clone()) {
            info!(peer = %authority, "registered peer");
        }
        Ok(authority)
    }

    /// Register several peers. Every address is parsed before any is
    /// inserted, so one bad address leaves the set untouched.
    pub fn add_nodes<I, S>(&self, addresses: I) -> Result<Vec<String>, ChainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = addresses
            .into_iter()
            .map(|a| parse_authority(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if parsed.is_empty() {
            return Err(ChainError::NoNodesSupplied);
        }

        let mut nodes = self.nodes.write();
        for authority in &parsed {
            if nodes.insert(authority.clone()) {
                info!(peer = %authority, "registered peer");
            }
        }
        Ok(parsed)
    }

    /// Known peers, sorted for stable output.
    pub fn list_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.nodes.read().iter().cloned().collect();
        nodes.sort();
        nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}
