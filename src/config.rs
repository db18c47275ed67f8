//! Coordinator configuration
//!
//! The node table and listen address are load-time inputs: read once,
//! frozen into the [`NodeRegistry`](crate::cluster::NodeRegistry), never
//! mutated afterwards.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::cluster::{NodeEndpoint, NodeId};
use crate::error::{CoordError, Result};

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:10101".parse().unwrap()
}

fn default_dispatch_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Coordinator configuration options
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatorConfig {
    /// Address the event intake HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Static node table: node ID to endpoint pair
    #[serde(default)]
    pub nodes: HashMap<NodeId, NodeEndpoint>,

    /// Timeout for outbound pull commands
    #[serde(default = "default_dispatch_timeout", with = "timeout_secs")]
    pub dispatch_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            nodes: HashMap::new(),
            dispatch_timeout: default_dispatch_timeout(),
        }
    }
}

impl CoordinatorConfig {
    /// Create a config with a custom listen address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }

    /// Set the listen address
    pub fn listen(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// Add a node to the table
    pub fn node(
        mut self,
        id: impl Into<NodeId>,
        stream_addr: impl Into<String>,
        api_addr: impl Into<String>,
    ) -> Self {
        self.nodes
            .insert(id.into(), NodeEndpoint::new(stream_addr, api_addr));
        self
    }

    /// Set the outbound dispatch timeout
    pub fn dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&raw)
            .map_err(|e| CoordError::Config(format!("{}: {e}", path.as_ref().display())))
    }
}

/// `dispatch_timeout` is written as whole seconds in config files
mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}
