//! Stream-location directory
//!
//! The directory is the single source of truth for "which node is
//! publishing this stream right now". Entries are created by publish-start
//! events and removed by a matching publish-stop; nothing here is durable,
//! a process restart loses the whole map.
//!
//! # Architecture
//!
//! ```text
//!            Arc<dyn Directory>
//!          ┌────────────────────┐
//!          │ StreamKey → NodeId │   at most one owner per key
//!          └─────────┬──────────┘
//!                    │
//!        ┌───────────┼───────────────┐
//!        ▼           ▼               ▼
//!   put(k, n)   remove(k, n)    lookup(k)
//!   pub start   pub stop        sub start
//!   (last       (no-op unless   (cascade
//!    writer      owner matches)  decision)
//!    wins)
//! ```
//!
//! The `Directory` trait exists so the in-memory map can be swapped for an
//! externally consistent store (redis, etcd, ...) in multi-coordinator
//! deployments without touching the event intake code.

pub mod key;
pub mod store;

use async_trait::async_trait;

pub use key::StreamKey;
pub use store::MemoryDirectory;

use crate::cluster::NodeId;

/// Mapping from stream key to the node currently publishing it
///
/// All three operations are atomic with respect to each other.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Record `node` as the owner of `key`, overwriting any prior owner.
    ///
    /// A republish always supersedes: last writer wins unconditionally.
    async fn put(&self, key: StreamKey, node: NodeId);

    /// Remove the entry for `key` only if its current owner is `node`.
    ///
    /// Returns whether the removal actually happened. A mismatch means a
    /// stale or out-of-order stop event; callers log it and move on.
    async fn remove(&self, key: &StreamKey, node: &NodeId) -> bool;

    /// Current owner of `key`, if any. No side effects.
    async fn lookup(&self, key: &StreamKey) -> Option<NodeId>;
}
