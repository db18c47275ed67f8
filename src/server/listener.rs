//! Coordinator HTTP server
//!
//! Binds the listen address and serves the notify endpoints until shut
//! down. Wiring of the coordinator's collaborators (directory, registry,
//! dispatch strategy) happens here.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::cluster::NodeRegistry;
use crate::config::CoordinatorConfig;
use crate::coordinator::Coordinator;
use crate::directory::{Directory, MemoryDirectory};
use crate::dispatch::{Dispatch, HttpDispatch};
use crate::error::Result;
use crate::server::routes::build_router;

/// Event-intake HTTP server for the cluster coordinator
pub struct CoordinatorServer {
    config: CoordinatorConfig,
    coordinator: Coordinator,
}

impl CoordinatorServer {
    /// Create a server with the in-memory directory and HTTP dispatch
    pub fn new(config: CoordinatorConfig) -> Self {
        let dispatch = Arc::new(HttpDispatch::new(config.dispatch_timeout));
        Self::with_collaborators(config, Arc::new(MemoryDirectory::new()), dispatch)
    }

    /// Create a server with a custom directory backing and dispatch strategy
    ///
    /// Deployments that need a durable directory or stricter dispatch
    /// delivery substitute their implementations here.
    pub fn with_collaborators(
        config: CoordinatorConfig,
        directory: Arc<dyn Directory>,
        dispatch: Arc<dyn Dispatch>,
    ) -> Self {
        let registry: NodeRegistry = config
            .nodes
            .iter()
            .map(|(id, ep)| (id.clone(), ep.clone()))
            .collect();

        let coordinator = Coordinator::new(directory, Arc::new(registry), dispatch);

        Self {
            config,
            coordinator,
        }
    }

    /// The coordinator driving this server
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// The configured listen address
    pub fn listen_addr(&self) -> SocketAddr {
        self.config.listen_addr
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!(
            addr = %self.config.listen_addr,
            nodes = self.coordinator.registry().len(),
            "Coordinator listening"
        );

        let router = build_router(self.coordinator.clone());
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!(
            addr = %self.config.listen_addr,
            nodes = self.coordinator.registry().len(),
            "Coordinator listening"
        );

        let router = build_router(self.coordinator.clone());
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Coordinator shut down");
        Ok(())
    }
}
