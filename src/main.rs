//! Coordinator binary
//!
//! Run with: cargo run -- [CONFIG_FILE]
//!
//! Without a config file, starts with a two-node table on localhost
//! matching the default ports of a local two-node test cluster.

use cascade_rs::{CoordinatorConfig, CoordinatorServer, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cascade_rs=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CoordinatorConfig::from_file(&path)?,
        None => CoordinatorConfig::default()
            .node("1", "127.0.0.1:19350", "127.0.0.1:8083")
            .node("2", "127.0.0.1:19550", "127.0.0.1:8283"),
    };

    let server = CoordinatorServer::new(config);

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
