//! Pull command payload and loop-prevention marker

use serde::{Deserialize, Serialize};

/// Marker embedded in cascade-triggered subscribe requests
///
/// When the receiving node starts pulling, the pull shows up back at the
/// coordinator as a subscribe-start whose `url_param` contains this token,
/// and is recognized as cluster-internal instead of triggering another
/// cascade. The value is cluster-wide and stable for the lifetime of the
/// system; changing it mid-flight would break loop detection for in-flight
/// pulls.
pub const CASCADE_MARKER: &str = "lal_cluster_inner_pull=1";

/// Control command instructing a node to pull a stream from a peer
///
/// Posted as JSON to the target node's `/api/ctrl/start_pull` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPullCommand {
    /// Pull protocol (always "rtmp" in this cluster)
    pub protocol: String,
    /// Data-plane address of the node that owns the stream
    pub addr: String,
    /// Application name, copied verbatim from the subscribe event
    pub app_name: String,
    /// Stream name, copied verbatim from the subscribe event
    pub stream_name: String,
    /// Query parameters for the pull; exactly the cascade marker
    pub url_param: String,
}

impl StartPullCommand {
    /// Build a pull command targeting `addr` for `app_name`/`stream_name`
    ///
    /// The marker is attached here so every cascade-generated subscribe is
    /// recognizable; callers never override `url_param`.
    pub fn rtmp(
        addr: impl Into<String>,
        app_name: impl Into<String>,
        stream_name: impl Into<String>,
    ) -> Self {
        Self {
            protocol: "rtmp".to_string(),
            addr: addr.into(),
            app_name: app_name.into(),
            stream_name: stream_name.into(),
            url_param: CASCADE_MARKER.to_string(),
        }
    }
}

/// Whether a subscribe request's parameter string marks it as a cascade pull
pub fn is_cascade_pull(url_param: &str) -> bool {
    url_param.contains(CASCADE_MARKER)
}
