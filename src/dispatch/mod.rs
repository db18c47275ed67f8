//! Cascade-pull dispatch
//!
//! When a subscriber shows up on a node that has no local copy of the
//! stream, the coordinator tells that node to pull it from the owning
//! node. This module holds the outbound side of that: the command payload,
//! the loop-prevention marker, and the pluggable send strategy.
//!
//! Sending is deliberately fire-and-forget. A failed dispatch is logged
//! and dropped; recovery is the subscriber's own retry. Deployments that
//! want stricter delivery swap in a different [`Dispatch`] implementation
//! (bounded retry, task queue) without touching the decision logic.

pub mod command;
pub mod http;

use async_trait::async_trait;

pub use command::{StartPullCommand, CASCADE_MARKER};
pub use http::HttpDispatch;

/// Strategy for delivering a pull command to a node's control plane
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Send `command` to the node listening on `api_addr`.
    ///
    /// Implementations own their timeout policy. Callers never retry.
    async fn send(&self, api_addr: &str, command: StartPullCommand);
}
