//! Edit and publish a wiki notebook against a local contract server.
//!
//! ```sh
//! RUST_LOG=wiki_lock=debug cargo run --example wiki_roundtrip --features http
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wiki_lock::{
    server, HttpLockService, InMemoryLockTable, LockCoordinator, ResourcePath, WikiConfig,
};

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> DemoResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let table = Arc::new(InMemoryLockTable::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    let app = server::router(table.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });

    let session = |token: &str| -> DemoResult<LockCoordinator<HttpLockService>> {
        let config = WikiConfig {
            auth_token: Some(token.to_string()),
            ..WikiConfig::for_base_url(base.clone())
        };
        Ok(LockCoordinator::new(HttpLockService::new(&config)?))
    };
    let alice = session("alice")?;
    let bob = session("bob")?;

    for raw in ["notes/scratch.ipynb", "_design/_home.ipynb"] {
        let path = ResourcePath::new(raw);
        let writable = table.state(&path, "alice")?.is_writable();
        match alice.toggle(&path, writable).await {
            None => info!(%path, "not a wiki notebook, no toolbar action"),
            Some(result) => info!(%path, success = result.is_success(), "alice clicked edit"),
        }
    }

    let path = ResourcePath::new("_design/_home.ipynb");
    let writable = table.state(&path, "bob")?.is_writable();
    if let Some(result) = bob.toggle(&path, writable).await {
        info!(%path, reason = result.message().unwrap_or_default(), "bob clicked edit");
    }

    let writable = table.state(&path, "alice")?.is_writable();
    if let Some(result) = alice.toggle(&path, writable).await {
        info!(%path, success = result.is_success(), "alice clicked publish");
    }

    Ok(())
}
