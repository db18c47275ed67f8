//! Static node registry
//!
//! Read-only map from node ID to that node's endpoints. Built once from
//! configuration; the coordinator treats it as an immutable injected
//! dependency. A node missing from this table is a configuration
//! inconsistency, not a runtime state.

use std::collections::HashMap;

use super::node::{NodeEndpoint, NodeId};

/// Immutable registry of all known cluster nodes
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: HashMap<NodeId, NodeEndpoint>,
}

impl NodeRegistry {
    /// Build a registry from a node table
    pub fn new(nodes: HashMap<NodeId, NodeEndpoint>) -> Self {
        Self { nodes }
    }

    /// Resolve a node ID to its endpoints
    pub fn resolve(&self, id: &NodeId) -> Option<&NodeEndpoint> {
        self.nodes.get(id)
    }

    /// Whether the registry knows this node
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of configured nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over configured nodes
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeEndpoint)> {
        self.nodes.iter()
    }
}

impl FromIterator<(NodeId, NodeEndpoint)> for NodeRegistry {
    fn from_iter<T: IntoIterator<Item = (NodeId, NodeEndpoint)>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
