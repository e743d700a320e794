//! HTTP client for the remote lock service.
//!
//! Speaks the notebook server's wiki endpoint:
//!
//! - `POST <base>/api/wiki` with `{"action": "acquire_lock" | "release_lock", "path": "..."}`
//! - answer `200 {"success": true}` or `200 {"success": false, "message": "..."}`
//!
//! Anything else (send failure, timeout, non-2xx, unparsable body) is an
//! error for the caller to surface. Nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::{ActionRequest, ActionResult, LockError, LockService};
use crate::config::WikiConfig;

/// Longest slice of an error body kept in a diagnostic.
const MAX_BODY_IN_ERROR: usize = 512;

/// Largest success body accepted. A `{success, message}` reply is far smaller.
const MAX_RESPONSE_BODY: usize = 64 * 1024;

/// [`LockService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpLockService {
    client: reqwest::Client,
    url: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpLockService {
    /// Build a client for the endpoint and timeout described by `config`.
    pub fn new(config: &WikiConfig) -> Result<Self, LockError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LockError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Use an existing `reqwest::Client` (shared connection pool, custom TLS).
    pub fn with_client(client: reqwest::Client, config: &WikiConfig) -> Self {
        HttpLockService {
            client,
            url: config.endpoint_url(),
            auth_token: config.auth_token.clone(),
            timeout: config.request_timeout(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LockService for HttpLockService {
    async fn submit(&self, request: &ActionRequest) -> Result<ActionResult, LockError> {
        debug!(
            url = %self.url,
            action = %request.action(),
            path = %request.path(),
            "sending lock request"
        );

        let mut builder = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(token) = &self.auth_token {
            builder = builder.header(AUTHORIZATION, token);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let limit = if status.is_success() {
            MAX_RESPONSE_BODY
        } else {
            MAX_BODY_IN_ERROR
        };
        let (body, cut) = self.read_capped(response, limit).await?;
        debug!(status = %status, bytes = body.len(), cut, "lock service answered");

        if !status.is_success() {
            return Err(LockError::Status {
                status: status.as_u16(),
                body: truncate(&String::from_utf8_lossy(&body), cut),
            });
        }
        if cut {
            return Err(LockError::Protocol(format!(
                "response body exceeds {MAX_RESPONSE_BODY} bytes"
            )));
        }

        ActionResult::from_json(&body)
    }
}

impl HttpLockService {
    /// Read at most `limit` bytes of the body; the flag is set when more was left unread.
    async fn read_capped(
        &self,
        mut response: reqwest::Response,
        limit: usize,
    ) -> Result<(Vec<u8>, bool), LockError> {
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.transport_error(e))? {
            let room = limit - body.len();
            if chunk.len() > room {
                body.extend_from_slice(&chunk[..room]);
                return Ok((body, true));
            }
            body.extend_from_slice(&chunk);
        }
        Ok((body, false))
    }

    fn transport_error(&self, err: reqwest::Error) -> LockError {
        if err.is_timeout() {
            LockError::Transport(format!(
                "request to {} timed out after {}ms",
                self.url,
                self.timeout.as_millis()
            ))
        } else {
            LockError::Transport(format!("request to {} failed: {err}", self.url))
        }
    }
}

/// Trimmed body for a diagnostic; `cut` marks a body that was not read to the end.
fn truncate(body: &str, cut: bool) -> String {
    let body = body.trim();
    if body.len() <= MAX_BODY_IN_ERROR && !cut {
        return body.to_string();
    }
    let mut end = body.len().min(MAX_BODY_IN_ERROR);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
