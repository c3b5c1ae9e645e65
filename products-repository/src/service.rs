//! Product catalog service implementation.
//!
//! This module provides the main service for reading and writing products.
//! Application code uses this to create, update, delete, fetch, list and
//! search products; it never talks to the provider directly.
//!
//! # Read-after-write
//!
//! Every mutating operation forces an index refresh right after the write, so
//! a subsequent get, list or search in the same request sequence observes it.

use chrono::Duration;
use products_shared::{
    new_product_id, now_millis, validation, ListQuery, NewProduct, Product, ProductPatch,
    SearchQuery,
};
use tracing::{debug, info, warn};

use crate::errors::CatalogError;
use crate::interfaces::ProductIndexProvider;
use crate::mapping;
use crate::types::{EngineStatus, IndexStatus};

/// The main service for interacting with the product catalog.
///
/// This is the high-level API that application code should use. It validates
/// input, mints ids and timestamps, maps between products and documents, and
/// delegates to a `ProductIndexProvider` for the actual engine operations.
/// Input is validated before any engine call is made.
///
/// # Example
///
/// ```no_run
/// use products_repository::{OpenSearchProvider, ProductCatalogService, ProviderConfig};
/// use products_shared::NewProduct;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::new("http://localhost:9200", ProviderConfig::default()).await?;
/// let service = ProductCatalogService::new(Box::new(provider));
///
/// let widget = service
///     .create(NewProduct::new("Widget", 9.99, "tools").with_stock(5))
///     .await?;
/// assert_eq!(widget.created_at, widget.updated_at);
/// # Ok(())
/// # }
/// ```
pub struct ProductCatalogService {
    provider: Box<dyn ProductIndexProvider>,
}

impl ProductCatalogService {
    /// Create a new ProductCatalogService.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `ProductIndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn ProductIndexProvider>) -> Self {
        Self { provider }
    }

    fn validate_id(id: &str) -> Result<(), CatalogError> {
        validation::validate_product_id(id).map_err(CatalogError::validation)
    }

    /// Check that the search engine is reachable.
    pub async fn ping(&self) -> Result<bool, CatalogError> {
        self.provider.ping().await
    }

    /// Report search engine connectivity without failing.
    pub async fn engine_status(&self) -> EngineStatus {
        match self.provider.ping().await {
            Ok(true) => EngineStatus::Connected,
            Ok(false) => EngineStatus::Disconnected,
            Err(e) => {
                warn!(error = %e, "Search engine health check failed");
                EngineStatus::Error
            }
        }
    }

    /// Create the product index if it does not exist yet.
    ///
    /// Mapping changes never apply to an existing index.
    pub async fn initialize(&self) -> Result<IndexStatus, CatalogError> {
        self.provider.ensure_index_exists().await
    }

    /// List products newest first, optionally restricted to one category.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Product>)` - The products at sorted positions `[skip, skip + limit)`
    /// * `Err(CatalogError::ValidationError)` - If the limit is out of bounds
    /// * `Err(CatalogError::MalformedRecord)` - If any hit cannot be decoded
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Product>, CatalogError> {
        query.validate().map_err(CatalogError::validation)?;

        let hits = self.provider.list_documents(query).await?;
        hits.into_iter().map(mapping::from_hit).collect()
    }

    /// Full-text search over name, category and description, best match first.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Product>)` - At most `limit` products, in relevance order
    /// * `Err(CatalogError::ValidationError)` - If the query text is empty or the limit is out of bounds
    /// * `Err(CatalogError::MalformedRecord)` - If any hit cannot be decoded
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, CatalogError> {
        query.validate().map_err(CatalogError::validation)?;

        let hits = self.provider.search_documents(query).await?;
        hits.into_iter().map(mapping::from_hit).collect()
    }

    /// Fetch a product by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Product)` - The stored product
    /// * `Err(CatalogError::NotFound)` - If no product has this id
    /// * `Err(CatalogError::MalformedRecord)` - If the stored document cannot be decoded
    pub async fn get(&self, id: &str) -> Result<Product, CatalogError> {
        Self::validate_id(id)?;

        let hit = self.provider.get_document(id).await?;
        mapping::from_hit(hit)
    }

    /// Whether a document is stored under this id, without decoding it.
    pub async fn exists(&self, id: &str) -> Result<bool, CatalogError> {
        Self::validate_id(id)?;

        match self.provider.get_document(id).await {
            Ok(_) => Ok(true),
            Err(CatalogError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Create a product.
    ///
    /// Mints a new id, stamps `created_at` and `updated_at` with the same
    /// instant, writes the document and refreshes the index.
    ///
    /// # Returns
    ///
    /// * `Ok(Product)` - The constructed record
    /// * `Err(CatalogError::ValidationError)` - If any field violates its constraints
    /// * `Err(CatalogError)` - If the write or refresh fails
    pub async fn create(&self, new_product: NewProduct) -> Result<Product, CatalogError> {
        new_product.validate().map_err(CatalogError::validation)?;

        let product = new_product.into_product(new_product_id(), now_millis());
        let document = mapping::to_document(&product);

        self.provider.index_document(&product.id, &document).await?;
        self.provider.refresh().await?;

        info!(product_id = %product.id, category = %product.category, "Product created");
        Ok(product)
    }

    /// Apply a partial update and return the full current record.
    ///
    /// Only the supplied fields change. `updated_at` always moves strictly
    /// forward, even when the update lands within the same millisecond as the
    /// previous write.
    ///
    /// # Returns
    ///
    /// * `Ok(Product)` - The record as re-read after the refresh
    /// * `Err(CatalogError::ValidationError)` - If a supplied field violates its constraints
    /// * `Err(CatalogError::NotFound)` - If no product has this id, including
    ///   when it is deleted between the existence check and the update
    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, CatalogError> {
        Self::validate_id(id)?;
        patch.validate().map_err(CatalogError::validation)?;

        let existing = self.get(id).await?;
        let updated_at = now_millis().max(existing.updated_at + Duration::milliseconds(1));
        let partial = mapping::to_partial_document(patch, updated_at);

        self.provider.update_document(id, &partial).await?;
        self.provider.refresh().await?;

        debug!(product_id = %id, "Product updated");
        self.get(id).await
    }

    /// Delete a product.
    ///
    /// Deleting an id that does not exist is not an error; callers that need
    /// to report a missing product check existence first.
    pub async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        Self::validate_id(id)?;

        self.provider.delete_document(id).await?;
        self.provider.refresh().await?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Index a batch of products with a single refresh at the end.
    ///
    /// Every product gets a fresh id and its own timestamps. Used to populate
    /// a freshly created index.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of products written
    /// * `Err(CatalogError::ValidationError)` - If any product is invalid; nothing is written
    pub async fn seed(&self, products: Vec<NewProduct>) -> Result<usize, CatalogError> {
        for product in &products {
            product.validate().map_err(CatalogError::validation)?;
        }

        let count = products.len();
        for new_product in products {
            let product = new_product.into_product(new_product_id(), now_millis());
            self.provider
                .index_document(&product.id, &mapping::to_document(&product))
                .await?;
        }
        self.provider.refresh().await?;

        info!(count, "Seeded sample products");
        Ok(count)
    }
}
