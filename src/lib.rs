//! Cluster coordinator for media streaming nodes
//!
//! Coordinates otherwise-independent media nodes so a stream published on
//! one node can be played from any other. The coordinator keeps a
//! directory of which node owns each live stream and, when a subscriber
//! shows up on a node without a local copy, tells that node to pull the
//! stream from the owner (a "cascade pull").
//!
//! # How it works
//!
//! ```text
//!   node A ──on_pub_start──►┐
//!   node B ──on_pub_stop───►│  CoordinatorServer
//!   node C ──on_sub_start──►│  ┌─ Directory: stream → owning node
//!                           │  ├─ NodeRegistry: node → addresses
//!                           │  └─ Dispatch ──start_pull──► node C
//!                           └──────────────────────────────────────
//! ```
//!
//! Nodes POST lifecycle notifications to the coordinator. Publish events
//! maintain the directory; a subscribe-start on a node with no local
//! input triggers a pull command back to that node, pointed at the
//! owner's data-plane address. Cascade-generated subscribes carry a
//! marker in their URL parameters and are never cascaded again.
//!
//! # Usage
//!
//! ```no_run
//! use cascade_rs::{CoordinatorConfig, CoordinatorServer};
//!
//! #[tokio::main]
//! async fn main() -> cascade_rs::Result<()> {
//!     let config = CoordinatorConfig::default()
//!         .node("1", "127.0.0.1:19350", "127.0.0.1:8083")
//!         .node("2", "127.0.0.1:19550", "127.0.0.1:8283");
//!
//!     CoordinatorServer::new(config).run().await
//! }
//! ```
//!
//! # Scope
//!
//! The directory lives in process memory: a coordinator restart forgets
//! all owners, and a node that crashes without a publish-stop leaves its
//! entry behind until the stream is republished. Deployments that need
//! durability put an external store behind the [`Directory`] trait.

pub mod cluster;
pub mod config;
pub mod coordinator;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod server;

pub use cluster::{NodeEndpoint, NodeId, NodeRegistry};
pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, SubscribeOutcome};
pub use directory::{Directory, MemoryDirectory, StreamKey};
pub use dispatch::{Dispatch, HttpDispatch, StartPullCommand, CASCADE_MARKER};
pub use error::{CoordError, Result};
pub use server::CoordinatorServer;
