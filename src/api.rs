//! REST API for a VaultCoin node
//!
//! Exposes mining, chain inspection, transaction submission, peer
//! registration and consensus over HTTP. `GET /get_chain` doubles as the
//! inter-node wire contract consumed by [`crate::sync::HttpChainSource`].

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{self, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::blockchain::Block;
use crate::consensus::ChainResponse;
use crate::error::ChainError;
use crate::node::Node;
use crate::transaction::TransactionRequest;

// ============================================================================
// API Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BlockchainError(ChainError),
    InvalidInput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BlockchainError(e) => {
                let status = match e {
                    ChainError::MissingField(_)
                    | ChainError::NoNodesSupplied
                    | ChainError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        ApiError::BlockchainError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ConnectNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    #[serde(flatten)]
    pub block: Block,
}

#[derive(Serialize)]
pub struct ValidityResponse {
    pub message: String,
    pub valid: bool,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct ConnectNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ReplaceChainResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub length: usize,
}

// ============================================================================
// Middleware
// ============================================================================

/// Logs method, path, status and duration of every request.
async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "api.request"
    );

    response
}

// ============================================================================
// API Server
// ============================================================================

/// Build the API router with all endpoints.
pub fn build_api_router(node: Arc<Node>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(vec![
            http::Method::GET,
            http::Method::POST,
            http::Method::OPTIONS,
        ])
        .allow_headers(vec![http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(home))
        .route("/mine_block", get(mine_block))
        .route("/get_chain", get(get_chain))
        .route("/is_valid", get(is_valid))
        .route("/add_transaction", post(add_transaction))
        .route("/connect_node", post(connect_node))
        .route("/replace_chain", get(replace_chain))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(node)
        .layer(cors)
}

/// Bind `addr` and serve the node until the process stops.
pub async fn run_api_server(node: Arc<Node>, addr: SocketAddr) -> Result<(), ChainError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(node, listener).await
}

/// Serve on an already bound listener.
pub async fn serve(node: Arc<Node>, listener: tokio::net::TcpListener) -> Result<(), ChainError> {
    let local = listener.local_addr()?;
    tracing::info!(address = %local, node_id = %node.node_id, "API server listening");
    axum::serve(listener, build_api_router(node)).await?;
    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn home() -> &'static str {
    "Welcome to the VaultCoin blockchain network !!"
}

async fn mine_block(State(node): State<Arc<Node>>) -> Result<Json<MineResponse>, ApiError> {
    let block = node.mine_block().await?;
    Ok(Json(MineResponse {
        message: "Congratulations! You have just mined a block :)".to_string(),
        block,
    }))
}

async fn get_chain(State(node): State<Arc<Node>>) -> Json<ChainResponse> {
    Json(node.chain().await)
}

async fn is_valid(State(node): State<Arc<Node>>) -> Json<ValidityResponse> {
    let valid = node.is_chain_valid().await;
    let message = if valid {
        "Checks completed. The Blockchain is valid!"
    } else {
        "Checks failed. The Blockchain is invalid!"
    };
    Json(ValidityResponse {
        message: message.to_string(),
        valid,
    })
}

async fn add_transaction(
    State(node): State<Arc<Node>>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let Json(request) = body?;
    let index = node.submit_transaction(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            message: format!("Transaction successful! Transaction added to Block {}", index),
            index,
        }),
    ))
}

async fn connect_node(
    State(node): State<Arc<Node>>,
    body: Result<Json<ConnectNodesRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ConnectNodesResponse>), ApiError> {
    let Json(request) = body?;
    let total_nodes = node.connect_nodes(request.nodes)?;
    Ok((
        StatusCode::CREATED,
        Json(ConnectNodesResponse {
            message: "Nodes successfully added to the blockchain network".to_string(),
            total_nodes,
        }),
    ))
}

async fn replace_chain(State(node): State<Arc<Node>>) -> Json<ReplaceChainResponse> {
    let (replaced, response) = node.resolve_conflicts().await;
    let message = if replaced {
        "Chains different. Local Blockchain updated!"
    } else {
        "No updates available. Local chain is the longest!"
    };
    Json(ReplaceChainResponse {
        message: message.to_string(),
        replaced,
        chain: response.chain,
    })
}

async fn health_check(State(node): State<Arc<Node>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: node.node_id.clone(),
        length: node.ledger.read().await.len(),
    })
}
