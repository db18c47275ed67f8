//! Lifecycle notification events
//!
//! Nodes report every stream lifecycle transition to the coordinator as a
//! JSON payload. Field names follow the nodes' notify wire format
//! (`stream_name`, `server_id`, ...). Parsing happens at the HTTP
//! boundary; the coordinator only ever sees well-formed events.

use serde::{Deserialize, Serialize};

use crate::cluster::NodeId;
use crate::directory::StreamKey;

/// A node started receiving a publish session for a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishStart {
    /// The stream being published
    pub stream_name: StreamKey,
    /// The node the publisher connected to
    pub server_id: NodeId,
}

/// A publish session ended on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishStop {
    /// The stream that stopped
    pub stream_name: StreamKey,
    /// The node reporting the stop
    pub server_id: NodeId,
}

/// A subscriber connected to a node and requested a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeStart {
    /// The requested stream
    pub stream_name: StreamKey,
    /// The node the subscriber connected to
    pub server_id: NodeId,
    /// Application name from the subscribe URL
    pub app_name: String,
    /// Whether the node already has a local input session for this stream
    pub has_in_session: bool,
    /// Raw query-parameter string of the subscribe request
    ///
    /// Carries the cascade marker when the subscribe was itself triggered
    /// by a cascade pull.
    #[serde(default)]
    pub url_param: String,
}

/// A subscriber disconnected
///
/// Informational only. Nodes tear down their own pull sessions once the
/// last local subscriber leaves, so the coordinator takes no action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeStop {
    /// The stream the subscriber was watching
    pub stream_name: StreamKey,
    /// The node reporting the stop
    pub server_id: NodeId,
}

/// Periodic cluster-state snapshot from a node
///
/// Accepted and acknowledged only. Reserved as the extension point for
/// future reconciliation (evicting stale owners, discovering missed
/// publishes); no policy is specified yet, so no action is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    /// The reporting node
    pub server_id: NodeId,
    /// Streams the node currently has input sessions for
    #[serde(default)]
    pub streams: Vec<StreamKey>,
}
