//! End-to-end consensus between live nodes talking HTTP on localhost

use std::sync::Arc;
use tokio::net::TcpListener;
use vaultcoin::config::Config;
use vaultcoin::node::Node;

/// Start a node on an ephemeral port and return it with its `host:port`.
async fn spawn_node() -> (Arc<Node>, String) {
    let mut config = Config::default();
    config.mining.difficulty = 2;
    config.consensus.peer_timeout_secs = 2;
    let node = Arc::new(Node::new(config).expect("Failed to create node"));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr").to_string();
    let served = node.clone();
    tokio::spawn(async move {
        let _ = vaultcoin::api::serve(served, listener).await;
    });
    (node, addr)
}

async fn mine_until(node: &Node, length: u64) {
    while node.chain().await.length < length {
        node.mine_block().await.expect("mining failed");
    }
}

#[tokio::test]
async fn test_longer_peer_chain_replaces_local() {
    let (x, _) = spawn_node().await;
    let (y, y_addr) = spawn_node().await;
    mine_until(&x, 3).await;
    mine_until(&y, 5).await;

    x.connect_nodes(Some(vec![format!("http://{}", y_addr)]))
        .expect("connect failed");
    let (replaced, chain) = x.resolve_conflicts().await;

    assert!(replaced);
    assert_eq!(chain.length, 5);
    assert_eq!(chain, y.chain().await);
    assert!(x.is_chain_valid().await);
}

#[tokio::test]
async fn test_tied_peer_chain_does_not_replace_local() {
    let (x, _) = spawn_node().await;
    let (y, y_addr) = spawn_node().await;
    mine_until(&x, 3).await;
    mine_until(&y, 3).await;
    let before = x.chain().await;

    x.connect_nodes(Some(vec![y_addr])).expect("connect failed");
    let (replaced, chain) = x.resolve_conflicts().await;

    assert!(!replaced);
    assert_eq!(chain, before);
}

#[tokio::test]
async fn test_unreachable_peer_is_skipped() {
    let (x, _) = spawn_node().await;
    let (y, y_addr) = spawn_node().await;
    mine_until(&y, 3).await;

    // Nothing listens on a freshly released ephemeral port.
    let dead = {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
        listener.local_addr().expect("no local addr").to_string()
    };

    x.connect_nodes(Some(vec![dead, y_addr])).expect("connect failed");
    let (replaced, chain) = x.resolve_conflicts().await;

    assert!(replaced);
    assert_eq!(chain, y.chain().await);
}
