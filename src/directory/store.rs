//! In-memory directory implementation
//!
//! One `HashMap` behind one mutex. Every event handler runs as its own
//! tokio task, so all read-modify-write sequences against the map go
//! through this single critical section. Outbound network calls never
//! happen while the lock is held.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::key::StreamKey;
use super::Directory;
use crate::cluster::NodeId;

/// Process-lifetime, in-memory stream directory
///
/// State is volatile: a coordinator restart forgets every owner. Cluster
/// deployments that need durability substitute an externally backed
/// `Directory` implementation.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    streams: Mutex<HashMap<StreamKey, NodeId>>,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of streams currently owned
    pub async fn len(&self) -> usize {
        self.streams.lock().await.len()
    }

    /// Whether no stream is currently owned
    pub async fn is_empty(&self) -> bool {
        self.streams.lock().await.is_empty()
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn put(&self, key: StreamKey, node: NodeId) {
        let mut streams = self.streams.lock().await;

        if let Some(prev) = streams.insert(key.clone(), node.clone()) {
            if prev != node {
                tracing::info!(
                    stream = %key,
                    prev_node = %prev,
                    node = %node,
                    "Stream owner superseded"
                );
                return;
            }
        }

        tracing::info!(stream = %key, node = %node, "Stream owner recorded");
    }

    async fn remove(&self, key: &StreamKey, node: &NodeId) -> bool {
        let mut streams = self.streams.lock().await;

        match streams.get(key).cloned() {
            Some(owner) if owner == *node => {
                streams.remove(key);
                tracing::info!(stream = %key, node = %node, "Stream owner removed");
                true
            }
            Some(owner) => {
                tracing::warn!(
                    stream = %key,
                    owner = %owner,
                    reported = %node,
                    "Stale publish stop, owner mismatch"
                );
                false
            }
            None => {
                tracing::warn!(
                    stream = %key,
                    reported = %node,
                    "Publish stop for unknown stream"
                );
                false
            }
        }
    }

    async fn lookup(&self, key: &StreamKey) -> Option<NodeId> {
        self.streams.lock().await.get(key).cloned()
    }
}
