//! REST API Server for the mood agent
//!
//! `POST /agent` takes plain JSON payloads, `POST /` speaks JSON-RPC 2.0
//! (`message/send`) for agent platforms.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::agent::{AgentRequest, MoodAgent};
use crate::error::AgentError;
use crate::extract::{clean_html_text, extract_user_message};
use crate::history::ConversationTurn;
use crate::models::{AgentResponse, SERVICE_NAME};
use crate::Result;

const EMPTY_MESSAGE: &str = "I didn't receive a clear message. Please try again.";

/// Keys accepted for the opaque conversation identifier
const SESSION_KEYS: &[&str] = &["session_id", "sessionId", "conversation_id", "chat_id"];

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<MoodAgent>,
}

/// =============================
/// Request Parsing
/// =============================

/// Validate a raw `/agent` body into an agent request.
pub fn parse_agent_request(body: &[u8]) -> Result<AgentRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AgentError::InvalidRequest("Request body is empty.".to_string()));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| AgentError::InvalidRequest("Request body must be valid JSON.".to_string()))?;

    if !payload.is_object() {
        return Err(AgentError::InvalidRequest(
            "Request body must be a JSON object.".to_string(),
        ));
    }

    let text = extract_user_message(&payload);
    if text.is_empty() {
        return Err(AgentError::InvalidRequest(EMPTY_MESSAGE.to_string()));
    }

    let history = match payload.get("history") {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value::<Vec<ConversationTurn>>(raw.clone())
            .map_err(|e| AgentError::InvalidRequest(format!("Invalid history: {}", e)))?,
    };

    let session_id = match SESSION_KEYS.iter().find_map(|k| payload.get(*k).map(|v| (*k, v))) {
        None | Some((_, Value::Null)) => None,
        Some((_, Value::String(id))) => Some(id.clone()),
        Some((key, _)) => {
            return Err(AgentError::InvalidRequest(format!("{} must be a string.", key)));
        }
    };

    Ok(AgentRequest {
        text,
        history,
        session_id,
    })
}

/// =============================
/// Liveness Endpoints
/// =============================

async fn home() -> Json<Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": SERVICE_NAME,
    }))
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Agent Endpoint
/// =============================

async fn agent_endpoint(
    State(state): State<ApiState>,
    body: Bytes,
) -> std::result::Result<Json<AgentResponse>, AgentError> {
    let request = match parse_agent_request(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected /agent payload: {}", e);
            return Err(e);
        }
    };

    info!("Received agent request ({} chars)", request.text.chars().count());

    let response = state.agent.respond(request).await?;
    Ok(Json(response))
}

/// =============================
/// JSON-RPC Endpoint
/// =============================

const JSONRPC_VERSION: &str = "2.0";
const METHOD_MESSAGE_SEND: &str = "message/send";
const RPC_PARSE_ERROR: i32 = -32700;
const RPC_INVALID_REQUEST: i32 = -32600;
const RPC_METHOD_NOT_FOUND: i32 = -32601;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub params: RpcParams,
}

#[derive(Debug, Deserialize)]
pub struct RpcParams {
    pub message: RpcMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<RpcPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcPart {
    #[serde(rename = "type", alias = "kind", default)]
    pub part_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RpcResult {
    pub role: String,
    pub parts: Vec<RpcPart>,
    pub kind: String,
    pub message_id: String,
}

#[derive(Debug, Serialize)]
struct RpcSuccessResponse {
    jsonrpc: &'static str,
    id: Option<Value>,
    result: RpcResult,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

#[derive(Debug, Serialize)]
struct RpcErrorResponse {
    jsonrpc: &'static str,
    id: Option<Value>,
    error: RpcError,
}

fn rpc_error(status: StatusCode, id: Option<Value>, code: i32, message: impl Into<String>) -> Response {
    let body = RpcErrorResponse {
        jsonrpc: JSONRPC_VERSION,
        id,
        error: RpcError {
            code,
            message: message.into(),
        },
    };
    (status, Json(body)).into_response()
}

/// First non-empty text part of a message.
fn first_text_part(message: &RpcMessage) -> String {
    message
        .parts
        .iter()
        .filter(|p| p.part_type.as_deref().map_or(true, |t| t == "text"))
        .filter_map(|p| p.text.as_deref())
        .map(clean_html_text)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

async fn rpc_endpoint(State(state): State<ApiState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unparseable JSON-RPC body: {}", e);
            return rpc_error(StatusCode::BAD_REQUEST, None, RPC_PARSE_ERROR, "Parse error");
        }
    };
    debug!("Raw JSON-RPC payload: {}", payload);

    let id = payload.get("id").cloned();

    let rpc: RpcRequest = match serde_json::from_value(payload) {
        Ok(rpc) => rpc,
        Err(e) => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                id,
                RPC_INVALID_REQUEST,
                format!("Invalid Request: {}", e),
            );
        }
    };

    if rpc.jsonrpc != JSONRPC_VERSION {
        return rpc_error(
            StatusCode::BAD_REQUEST,
            rpc.id,
            RPC_INVALID_REQUEST,
            "Invalid JSON-RPC version. Must be '2.0'.",
        );
    }

    if rpc.method != METHOD_MESSAGE_SEND {
        return rpc_error(
            StatusCode::METHOD_NOT_ALLOWED,
            rpc.id,
            RPC_METHOD_NOT_FOUND,
            "Method not found",
        );
    }

    let text = first_text_part(&rpc.params.message);
    if text.is_empty() {
        return rpc_error(
            StatusCode::BAD_REQUEST,
            rpc.id,
            i32::from(StatusCode::BAD_REQUEST.as_u16()),
            EMPTY_MESSAGE,
        );
    }

    match state.agent.respond(AgentRequest::new(text)).await {
        Ok(response) => {
            let body = RpcSuccessResponse {
                jsonrpc: JSONRPC_VERSION,
                id: rpc.id,
                result: RpcResult {
                    role: "agent".to_string(),
                    parts: vec![RpcPart {
                        part_type: Some("text".to_string()),
                        text: Some(response.render_text()),
                    }],
                    kind: "message".to_string(),
                    message_id: uuid::Uuid::new_v4().to_string(),
                },
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!("Unhandled error in JSON-RPC handler: {}", e);
            }
            rpc_error(status, rpc.id, i32::from(status.as_u16()), e.public_message())
        }
    }
}

/// =============================
/// Router
/// =============================

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AgentError::Internal(format!("handler panicked: {}", detail)).into_response()
}

pub fn create_router(agent: Arc<MoodAgent>) -> Router {
    let state = ApiState { agent };

    Router::new()
        .route("/", get(home).post(rpc_endpoint))
        .route("/health", get(health))
        .route("/agent", post(agent_endpoint))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(agent: Arc<MoodAgent>, port: u16) -> Result<()> {
    let router = create_router(agent);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
