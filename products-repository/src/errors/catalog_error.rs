//! Catalog error types.
//!
//! This module defines the unified error type for every catalog operation,
//! from low-level engine failures to record decoding and input validation.

use thiserror::Error;

/// Unified errors from catalog operations.
///
/// Used by the `ProductIndexProvider` trait and `ProductCatalogService`. The
/// mapping layer never swallows engine errors; every failure is returned to
/// the caller for translation into a transport-level response.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Input failed a field or query constraint. Raised before any engine call.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No document exists for the requested id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A document fetched from the engine does not match the product schema.
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    /// The engine could not be reached (connection failure or timeout).
    #[error("Search engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Failed to create the product index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to write a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to apply a partial update.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// The engine rejected a search or get request.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to refresh the index after a write.
    #[error("Refresh error: {0}")]
    RefreshError(String),

    /// Failed to parse a response from the engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a not found error for a product id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a malformed record error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an engine unavailable error.
    pub fn engine_unavailable(msg: impl Into<String>) -> Self {
        Self::EngineUnavailable(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a refresh error.
    pub fn refresh(msg: impl Into<String>) -> Self {
        Self::RefreshError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
