//! Crate error types

use thiserror::Error;

use crate::cluster::NodeId;

/// Errors produced by the coordinator
#[derive(Debug, Error)]
pub enum CoordError {
    /// A node ID referenced by an event is not in the static registry
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Invalid or unloadable configuration
    #[error("config error: {0}")]
    Config(String),

    /// Outbound control-plane call failed
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// I/O error (listener bind, config file read)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, CoordError>;
