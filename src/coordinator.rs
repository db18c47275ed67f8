//! Event intake decision logic
//!
//! Translates each lifecycle notification into a directory operation
//! and/or a cascade dispatch. One coordinator instance is shared by all
//! request handlers; every method is safe to call concurrently.
//!
//! # Cascade decision
//!
//! On subscribe-start, a chain of early-exit guards decides whether the
//! subscriber's node must be told to pull the stream from its owner.
//! Cheap local checks run first; the directory lookup happens inside the
//! directory's own critical section; the outbound network call happens
//! strictly after every lock is released so a slow node cannot stall
//! unrelated directory traffic.

use std::sync::Arc;

use crate::cluster::NodeRegistry;
use crate::directory::Directory;
use crate::dispatch::{command, Dispatch, StartPullCommand};
use crate::error::{CoordError, Result};
use crate::event::{ClusterUpdate, PublishStart, PublishStop, SubscribeStart, SubscribeStop};

/// What the coordinator decided to do with a subscribe-start event
///
/// Returned so callers (and tests) can observe the decision; the dispatch
/// itself has already been handed to the strategy by the time this is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The subscribe was itself produced by a cascade pull
    CascadeOrigin,
    /// The node already has a local input session for the stream
    HasLocalInput,
    /// No node currently owns the stream; nothing to pull from
    NoOwner,
    /// A pull command was sent to the requesting node
    Dispatched,
}

/// Cluster event coordinator
///
/// Owns the stream directory, the static node registry, and the dispatch
/// strategy. Cloning is cheap; all state is behind `Arc`.
#[derive(Clone)]
pub struct Coordinator {
    directory: Arc<dyn Directory>,
    registry: Arc<NodeRegistry>,
    dispatch: Arc<dyn Dispatch>,
}

impl Coordinator {
    /// Create a coordinator from its three collaborators
    pub fn new(
        directory: Arc<dyn Directory>,
        registry: Arc<NodeRegistry>,
        dispatch: Arc<dyn Dispatch>,
    ) -> Self {
        Self {
            directory,
            registry,
            dispatch,
        }
    }

    /// The node registry this coordinator resolves against
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Record the reporting node as the stream's owner
    ///
    /// Unconditional: a republish from another node supersedes the old
    /// owner (last writer wins).
    pub async fn on_publish_start(&self, event: PublishStart) {
        tracing::info!(stream = %event.stream_name, node = %event.server_id, "Publish started");

        self.directory.put(event.stream_name, event.server_id).await;
    }

    /// Clear the stream's owner if the reporting node still owns it
    ///
    /// A stop from a node that is not the current owner is a stale event
    /// from an old session and is ignored; the directory logs the
    /// mismatch.
    pub async fn on_publish_stop(&self, event: PublishStop) {
        tracing::info!(stream = %event.stream_name, node = %event.server_id, "Publish stopped");

        self.directory
            .remove(&event.stream_name, &event.server_id)
            .await;
    }

    /// Decide whether a subscribe needs a cascade pull, and dispatch it
    ///
    /// Never fails the subscribe itself: the only error case is a node ID
    /// missing from the static registry, which is a configuration
    /// inconsistency the caller logs.
    pub async fn on_subscribe_start(&self, event: SubscribeStart) -> Result<SubscribeOutcome> {
        tracing::info!(
            stream = %event.stream_name,
            node = %event.server_id,
            app = %event.app_name,
            has_in_session = event.has_in_session,
            "Subscribe started"
        );

        // Cascade-generated subscribe: dispatching again would loop forever
        if command::is_cascade_pull(&event.url_param) {
            tracing::info!(stream = %event.stream_name, "Subscribe is a cluster-internal pull, ignore");
            return Ok(SubscribeOutcome::CascadeOrigin);
        }

        // The node can already serve this subscriber locally
        if event.has_in_session {
            tracing::info!(stream = %event.stream_name, "Node already has input session, ignore");
            return Ok(SubscribeOutcome::HasLocalInput);
        }

        let requester = self
            .registry
            .resolve(&event.server_id)
            .ok_or_else(|| {
                tracing::error!(node = %event.server_id, "Requesting node not in registry");
                CoordError::UnknownNode(event.server_id.clone())
            })?
            .clone();

        let Some(owner) = self.directory.lookup(&event.stream_name).await else {
            tracing::info!(stream = %event.stream_name, "No owner for stream, ignore");
            return Ok(SubscribeOutcome::NoOwner);
        };

        let origin = self
            .registry
            .resolve(&owner)
            .ok_or_else(|| {
                tracing::error!(node = %owner, "Owning node not in registry");
                CoordError::UnknownNode(owner.clone())
            })?
            .clone();

        let cmd = StartPullCommand::rtmp(
            origin.stream_addr,
            event.app_name,
            event.stream_name.as_str(),
        );

        tracing::info!(
            stream = %event.stream_name,
            node = %event.server_id,
            owner = %owner,
            target = %requester.api_addr,
            "Dispatching cascade pull"
        );

        // No lock is held here; the send may block for the full timeout
        self.dispatch.send(&requester.api_addr, cmd).await;

        Ok(SubscribeOutcome::Dispatched)
    }

    /// Acknowledge a subscriber leaving
    ///
    /// Nodes tear down their own pull session once the last local
    /// subscriber is gone, so there is nothing to coordinate.
    pub async fn on_subscribe_stop(&self, event: SubscribeStop) {
        tracing::info!(stream = %event.stream_name, node = %event.server_id, "Subscribe stopped");
    }

    /// Acknowledge a periodic cluster-state snapshot
    ///
    /// Reserved for reconciliation (evicting owners whose node went away,
    /// discovering publishes whose start notification was missed). No
    /// eviction policy is specified yet, so the snapshot is only logged.
    pub async fn on_cluster_update(&self, event: ClusterUpdate) {
        tracing::debug!(
            node = %event.server_id,
            streams = event.streams.len(),
            "Cluster update received"
        );
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;

    use super::*;
    use crate::cluster::{NodeEndpoint, NodeId};
    use crate::directory::{MemoryDirectory, StreamKey};
    use crate::dispatch::CASCADE_MARKER;

    /// Records every dispatched command instead of sending it
    #[derive(Default)]
    struct RecordingDispatch {
        sent: Mutex<Vec<(String, StartPullCommand)>>,
    }

    #[async_trait::async_trait]
    impl Dispatch for RecordingDispatch {
        async fn send(&self, api_addr: &str, command: StartPullCommand) {
            self.sent.lock().await.push((api_addr.to_string(), command));
        }
    }

    fn test_registry() -> NodeRegistry {
        [
            (
                NodeId::new("A"),
                NodeEndpoint::new("10.0.0.1:1935", "10.0.0.1:8083"),
            ),
            (
                NodeId::new("C"),
                NodeEndpoint::new("10.0.0.3:1935", "10.0.0.3:8083"),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn coordinator_with(registry: NodeRegistry) -> (Coordinator, Arc<RecordingDispatch>) {
        let dispatch = Arc::new(RecordingDispatch::default());
        let coordinator = Coordinator::new(
            Arc::new(MemoryDirectory::new()),
            Arc::new(registry),
            dispatch.clone(),
        );
        (coordinator, dispatch)
    }

    fn sub_start(stream: &str, node: &str, has_in_session: bool, url_param: &str) -> SubscribeStart {
        SubscribeStart {
            stream_name: StreamKey::new(stream),
            server_id: NodeId::new(node),
            app_name: "live".to_string(),
            has_in_session,
            url_param: url_param.to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_start_records_owner() {
        let (coordinator, _) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let owner = coordinator
            .directory
            .lookup(&StreamKey::new("match1"))
            .await;
        assert_eq!(owner, Some(NodeId::new("A")));
    }

    #[tokio::test]
    async fn test_publish_stop_from_wrong_node_keeps_owner() {
        let (coordinator, _) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;
        coordinator
            .on_publish_stop(PublishStop {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("B"),
            })
            .await;

        let owner = coordinator
            .directory
            .lookup(&StreamKey::new("match1"))
            .await;
        assert_eq!(owner, Some(NodeId::new("A")));
    }

    #[tokio::test]
    async fn test_publish_stop_from_owner_clears_entry() {
        let (coordinator, _) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;
        coordinator
            .on_publish_stop(PublishStop {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let owner = coordinator
            .directory
            .lookup(&StreamKey::new("match1"))
            .await;
        assert_eq!(owner, None);
    }

    #[tokio::test]
    async fn test_subscribe_dispatches_pull_from_owner() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let outcome = coordinator
            .on_subscribe_start(sub_start("match1", "C", false, ""))
            .await
            .unwrap();
        assert_eq!(outcome, SubscribeOutcome::Dispatched);

        let sent = dispatch.sent.lock().await;
        assert_eq!(sent.len(), 1);

        let (api_addr, cmd) = &sent[0];
        // Command goes to the requester's control plane...
        assert_eq!(api_addr, "10.0.0.3:8083");
        // ...pointing at the owner's data plane, identifiers verbatim
        assert_eq!(cmd.addr, "10.0.0.1:1935");
        assert_eq!(cmd.app_name, "live");
        assert_eq!(cmd.stream_name, "match1");
        assert_eq!(cmd.url_param, CASCADE_MARKER);
    }

    #[tokio::test]
    async fn test_cascade_marked_subscribe_never_dispatches() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let outcome = coordinator
            .on_subscribe_start(sub_start("match1", "C", false, CASCADE_MARKER))
            .await
            .unwrap();
        assert_eq!(outcome, SubscribeOutcome::CascadeOrigin);
        assert!(dispatch.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_local_input_session_never_dispatches() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let outcome = coordinator
            .on_subscribe_start(sub_start("match1", "C", true, ""))
            .await
            .unwrap();
        assert_eq!(outcome, SubscribeOutcome::HasLocalInput);
        assert!(dispatch.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unpublished_stream_never_dispatches() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        let outcome = coordinator
            .on_subscribe_start(sub_start("unknown", "C", false, ""))
            .await
            .unwrap();
        assert_eq!(outcome, SubscribeOutcome::NoOwner);
        assert!(dispatch.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_requesting_node_aborts() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;

        let result = coordinator
            .on_subscribe_start(sub_start("match1", "Z", false, ""))
            .await;
        assert!(matches!(result, Err(CoordError::UnknownNode(n)) if n == NodeId::new("Z")));
        assert!(dispatch.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_owning_node_aborts() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        // Owner "B" publishes but was never configured in the registry
        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("B"),
            })
            .await;

        let result = coordinator
            .on_subscribe_start(sub_start("match1", "C", false, ""))
            .await;
        assert!(matches!(result, Err(CoordError::UnknownNode(n)) if n == NodeId::new("B")));
        assert!(dispatch.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_republish_redirects_later_subscribers() {
        let registry: NodeRegistry = [
            (
                NodeId::new("A"),
                NodeEndpoint::new("10.0.0.1:1935", "10.0.0.1:8083"),
            ),
            (
                NodeId::new("B"),
                NodeEndpoint::new("10.0.0.2:1935", "10.0.0.2:8083"),
            ),
            (
                NodeId::new("C"),
                NodeEndpoint::new("10.0.0.3:1935", "10.0.0.3:8083"),
            ),
        ]
        .into_iter()
        .collect();
        let (coordinator, dispatch) = coordinator_with(registry);

        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("A"),
            })
            .await;
        coordinator
            .on_publish_start(PublishStart {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("B"),
            })
            .await;

        coordinator
            .on_subscribe_start(sub_start("match1", "C", false, ""))
            .await
            .unwrap();

        let sent = dispatch.sent.lock().await;
        assert_eq!(sent[0].1.addr, "10.0.0.2:1935");
    }

    #[tokio::test]
    async fn test_subscribe_stop_and_update_take_no_action() {
        let (coordinator, dispatch) = coordinator_with(test_registry());

        coordinator
            .on_subscribe_stop(SubscribeStop {
                stream_name: StreamKey::new("match1"),
                server_id: NodeId::new("C"),
            })
            .await;
        coordinator
            .on_cluster_update(ClusterUpdate {
                server_id: NodeId::new("A"),
                streams: vec![StreamKey::new("match1")],
            })
            .await;

        assert!(dispatch.sent.lock().await.is_empty());
    }
}
