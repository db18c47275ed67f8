//! Node identity and endpoint types

use serde::{Deserialize, Serialize};

/// Cluster-wide identifier of a node
///
/// Opaque to the coordinator; nodes report it in every lifecycle event and
/// the registry uses it as the lookup key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A node's pair of addresses
///
/// `stream_addr` is the data-plane endpoint peers pull media from (e.g. the
/// node's RTMP listener); `api_addr` is the control-plane HTTP endpoint the
/// coordinator sends pull commands to. Both are host:port strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEndpoint {
    /// Data-plane address (media ingest/egress)
    pub stream_addr: String,
    /// Control-plane address (HTTP API)
    pub api_addr: String,
}

impl NodeEndpoint {
    /// Create a new endpoint pair
    pub fn new(stream_addr: impl Into<String>, api_addr: impl Into<String>) -> Self {
        Self {
            stream_addr: stream_addr.into(),
            api_addr: api_addr.into(),
        }
    }
}
