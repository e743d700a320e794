//! HTTP contract server for the lock endpoint.
//!
//! Requires the `http` feature. Uses axum for routing and an
//! [`InMemoryLockTable`] for arbitration.
//!
//! ## Routes
//!
//! - `POST /api/wiki`: body `{"action", "path"}`, caller identity from the
//!   `Authorization` header. Answers `200` with `{"success", "message"?}`.
//! - `GET /health`: returns `{ "ok": true }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wiki_lock::{server, InMemoryLockTable};
//!
//! let table = Arc::new(InMemoryLockTable::new());
//!
//! // Compose with other axum routes
//! let app = server::router(table.clone());
//!
//! // Or serve directly
//! server::serve(table, "127.0.0.1:8888").await?;
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::lock::{ActionRequest, ActionResult, InMemoryLockTable, LockAction};
use crate::path::ResourcePath;

/// Build an axum `Router` serving the lock endpoint over `table`.
pub fn router(table: Arc<InMemoryLockTable>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/wiki", post(wiki_handler))
        .with_state(table)
}

/// Serve the lock endpoint at the given address (e.g. `"127.0.0.1:8888"`).
pub async fn serve(table: Arc<InMemoryLockTable>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(table);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /api/wiki`
async fn wiki_handler(
    State(table): State<Arc<InMemoryLockTable>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(caller) = caller_from_headers(&headers) else {
        let missing = ActionResult::failed("missing Authorization header");
        return reply(StatusCode::UNAUTHORIZED, missing);
    };

    let (Some(action_name), Some(path)) = (
        body.get("action").and_then(Value::as_str),
        body.get("path").and_then(Value::as_str),
    ) else {
        return reply(
            StatusCode::BAD_REQUEST,
            ActionResult::failed("request body needs string fields \"action\" and \"path\""),
        );
    };

    let Some(action) = LockAction::from_wire(action_name) else {
        return reply(StatusCode::OK, ActionResult::failed(format!("Unknown action {action_name}")));
    };

    let result = match ActionRequest::new(action, ResourcePath::new(path)) {
        Ok(request) => match table.apply(&caller, &request) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "lock table unavailable");
                return reply(StatusCode::INTERNAL_SERVER_ERROR, err.into());
            }
        },
        Err(err) => err.into(),
    };

    debug!(%caller, %action, path, success = result.is_success(), "handled lock request");
    reply(StatusCode::OK, result)
}

fn reply(status: StatusCode, result: ActionResult) -> Response {
    (status, Json(result)).into_response()
}

/// The session identity is the raw `Authorization` header value.
fn caller_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
