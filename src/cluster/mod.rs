//! Cluster topology: node identities and the static node registry
//!
//! Every node in the cluster exposes two addresses: a data-plane address
//! where peers push/pull the actual media, and a control-plane address
//! where the coordinator sends commands. The registry mapping node IDs to
//! those addresses is loaded once at startup and never mutated.

pub mod node;
pub mod registry;

pub use node::{NodeEndpoint, NodeId};
pub use registry::NodeRegistry;
