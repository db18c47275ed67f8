//! Stream identity

use serde::{Deserialize, Serialize};

/// Unique identifier for a stream
///
/// The stream name alone identifies a stream cluster-wide; the application
/// name travels alongside it in subscribe events as orthogonal metadata and
/// is not part of the directory key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamKey(pub String);

impl StreamKey {
    /// Create a new stream key
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The stream name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StreamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
