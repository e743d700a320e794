//! HttpLockService + LockCoordinator against stub endpoints.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use wiki_lock::{determine_action, ActionResult, LockAction, ResourcePath, WikiConfig};

use crate::support::{http_coordinator, refused_base_url, start_server, Stub};

#[tokio::test]
async fn acquire_on_managed_read_only_notebook() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true}"#);
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));
    let path = ResourcePath::new("_design/_home.ipynb");

    assert_eq!(determine_action(&path, false), Some(LockAction::Acquire));

    let result = coordinator.perform(LockAction::Acquire, &path).await;
    assert_eq!(result, ActionResult::ok());

    let seen = stub.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].body,
        json!({ "action": "acquire_lock", "path": "_design/_home.ipynb" })
    );
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(seen[0].authorization, None);
}

#[tokio::test]
async fn release_is_sent_with_its_wire_name() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true, "message": ""}"#);
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .toggle(&ResourcePath::new("_home.ipynb"), true)
        .await
        .unwrap();
    assert!(result.is_success());
    assert_eq!(result.message(), None);
    assert_eq!(stub.seen()[0].body["action"], "release_lock");
}

#[tokio::test]
async fn remote_rejection_is_returned_verbatim() {
    let stub = Stub::replying(
        StatusCode::OK,
        r#"{"success": false, "message": "locked by bob"}"#,
    );
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    assert_eq!(result, ActionResult::failed("locked by bob"));
}

#[tokio::test]
async fn connection_refused_is_a_failed_result() {
    let base = refused_base_url().await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    assert!(!result.is_success());
    let message = result.message().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("unreachable"), "{message}");
}

#[tokio::test]
async fn non_2xx_status_is_a_failed_result() {
    let stub = Stub::replying(StatusCode::INTERNAL_SERVER_ERROR, "database on fire");
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Release, &ResourcePath::new("_home.ipynb"))
        .await;
    let message = result.message().unwrap();
    assert!(message.contains("HTTP 500"), "{message}");
    assert!(message.contains("database on fire"), "{message}");
}

#[tokio::test]
async fn huge_error_body_is_cut_short() {
    let stub = Stub::replying(StatusCode::INTERNAL_SERVER_ERROR, "x".repeat(1 << 20));
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    let message = result.message().unwrap();
    assert!(message.contains("HTTP 500"), "{message}");
    assert!(message.ends_with("..."), "{message}");
    assert!(message.len() < 600, "{} bytes", message.len());
}

#[tokio::test]
async fn oversized_success_body_is_a_protocol_failure() {
    let body = format!(r#"{{"success": false, "message": "{}"}}"#, "x".repeat(1 << 20));
    let stub = Stub::replying(StatusCode::OK, body);
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    let message = result.message().unwrap();
    assert!(message.contains("exceeds"), "{message}");
    assert!(message.len() < 200, "{} bytes", message.len());
}

#[tokio::test]
async fn wrong_endpoint_is_a_status_failure() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true}"#);
    let base = start_server(stub.router()).await;
    let config = WikiConfig {
        endpoint: "api/elsewhere".into(),
        ..WikiConfig::for_base_url(base)
    };

    let result = http_coordinator(config)
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    assert!(result.message().unwrap().contains("HTTP 404"));
    assert!(stub.seen().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_protocol_failure() {
    let stub = Stub::replying(StatusCode::OK, "<html>not json</html>");
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    let message = result.message().unwrap();
    assert!(message.contains("malformed"), "{message}");
}

#[tokio::test]
async fn failure_without_message_is_a_protocol_failure() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": false}"#);
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));

    let result = coordinator
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    assert!(!result.is_success());
    assert!(result.message().unwrap().contains("malformed"));
}

#[tokio::test]
async fn timeout_is_a_transport_failure() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true}"#)
        .with_delay(Duration::from_secs(2));
    let base = start_server(stub.router()).await;
    let config = WikiConfig {
        request_timeout_ms: 100,
        ..WikiConfig::for_base_url(base)
    };

    let result = http_coordinator(config)
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    let message = result.message().unwrap();
    assert!(message.contains("timed out"), "{message}");
}

#[tokio::test]
async fn auth_token_is_forwarded() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true}"#);
    let base = start_server(stub.router()).await;
    let config = WikiConfig {
        auth_token: Some("token-alice".into()),
        ..WikiConfig::for_base_url(base)
    };

    http_coordinator(config)
        .perform(LockAction::Acquire, &ResourcePath::new("_home.ipynb"))
        .await;
    assert_eq!(stub.seen()[0].authorization.as_deref(), Some("token-alice"));
}

#[tokio::test]
async fn unmanaged_notebook_never_reaches_the_service() {
    let stub = Stub::replying(StatusCode::OK, r#"{"success": true}"#);
    let base = start_server(stub.router()).await;
    let coordinator = http_coordinator(WikiConfig::for_base_url(base));
    let path = ResourcePath::new("notes/scratch.ipynb");

    assert!(coordinator.toggle(&path, false).await.is_none());
    assert!(coordinator.toggle(&path, true).await.is_none());
    assert!(!coordinator.perform(LockAction::Acquire, &path).await.is_success());
    assert!(stub.seen().is_empty());
}
