//! Request and response types exchanged with the search index provider.

use serde_json::Value;

/// A raw document returned by the engine, before it is decoded into a product.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHit {
    /// The document key (the product id).
    pub id: String,
    /// Relevance score, present for scored searches only.
    pub score: Option<f64>,
    /// The stored document body.
    pub source: Value,
}

impl DocumentHit {
    /// Create a hit without a relevance score.
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            score: None,
            source,
        }
    }
}

/// Outcome of index initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// The index did not exist and was created with the product mapping.
    Created,
    /// The index already existed; its mapping was left untouched.
    AlreadyExists,
}

/// Connectivity of the search engine as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// The engine answered the ping.
    Connected,
    /// The engine answered with a non-success status.
    Disconnected,
    /// The engine could not be reached.
    Error,
}

impl EngineStatus {
    /// Lowercase label used in health responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_status_labels() {
        assert_eq!(EngineStatus::Connected.as_str(), "connected");
        assert_eq!(EngineStatus::Disconnected.as_str(), "disconnected");
        assert_eq!(EngineStatus::Error.as_str(), "error");
    }
}
