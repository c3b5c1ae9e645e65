//! Product index provider trait definition.
//!
//! This module defines the abstract interface for search engine operations on
//! the product index, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory test doubles).

use async_trait::async_trait;
use products_shared::{ListQuery, ProductDocument, ProductDocumentPatch, SearchQuery};

use crate::errors::CatalogError;
use crate::types::{DocumentHit, IndexStatus};

/// Abstracts the search engine holding the product index.
///
/// Implementations are injected into `ProductCatalogService`. They speak in
/// documents and raw hits; decoding hits into products is the service's job.
///
/// All methods return `Result<T, CatalogError>`. Transport failures map to
/// `CatalogError::EngineUnavailable`; engine-side rejections map to the
/// operation-specific variant.
///
/// # Index Initialization
///
/// Call `ensure_index_exists` once during application startup, after `ping`
/// succeeds, before performing document operations.
#[async_trait]
pub trait ProductIndexProvider: Send + Sync {
    /// Check that the engine is reachable.
    ///
    /// Returns `Ok(true)` on a successful ping, `Ok(false)` if the engine
    /// answered with an error status, and `Err(EngineUnavailable)` if it could
    /// not be reached.
    async fn ping(&self) -> Result<bool, CatalogError>;

    /// Create the product index with its mapping unless it already exists.
    ///
    /// An existing index is never modified.
    async fn ensure_index_exists(&self) -> Result<IndexStatus, CatalogError>;

    /// Write a full document under `id`, creating or overwriting it.
    async fn index_document(
        &self,
        id: &str,
        document: &ProductDocument,
    ) -> Result<(), CatalogError>;

    /// Merge a partial document into the existing document `id`.
    ///
    /// Fails with `CatalogError::NotFound` if the document does not exist.
    async fn update_document(
        &self,
        id: &str,
        patch: &ProductDocumentPatch,
    ) -> Result<(), CatalogError>;

    /// Fetch the document stored under `id`.
    ///
    /// Fails with `CatalogError::NotFound` if the document does not exist.
    async fn get_document(&self, id: &str) -> Result<DocumentHit, CatalogError>;

    /// Delete the document stored under `id`.
    ///
    /// Deleting a missing document is not an error.
    async fn delete_document(&self, id: &str) -> Result<(), CatalogError>;

    /// Run the listing query: newest first, optionally filtered by exact category.
    async fn list_documents(&self, query: &ListQuery) -> Result<Vec<DocumentHit>, CatalogError>;

    /// Run the full-text query, best match first.
    async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<DocumentHit>, CatalogError>;

    /// Make all previous writes visible to subsequent reads and searches.
    async fn refresh(&self) -> Result<(), CatalogError>;
}
