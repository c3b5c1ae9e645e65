//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the product index.
//! The body returned by [`get_index_settings`] is the exact contract with the
//! engine: field names, types and analyzers must match what the mapping layer
//! writes.

use serde_json::{json, Value};

/// Default name of the product index.
pub const INDEX_NAME: &str = "products";

/// Name of the custom analyzer applied to `name` and `description`.
pub const PRODUCT_ANALYZER: &str = "product_analyzer";

/// Configuration for the product index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME)
    }
}

/// Get the index settings and mappings for the product index.
///
/// The configuration includes:
/// - **product_analyzer**: standard tokenizer with `lowercase` and
///   `asciifolding` filters, so "Écouteurs" matches "ecouteurs"
/// - **Text fields**: `name` and `description`, analyzed for full-text search
/// - **Keyword fields**: `category` and `image_url`, exact match only
/// - **Numeric and date fields**: `price`, `stock`, `created_at`, `updated_at`
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 0 replicas
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0,
            "analysis": {
                "analyzer": {
                    PRODUCT_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "asciifolding"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "name": {
                    "type": "text",
                    "analyzer": PRODUCT_ANALYZER
                },
                "description": {
                    "type": "text",
                    "analyzer": PRODUCT_ANALYZER
                },
                "price": {
                    "type": "float"
                },
                "category": {
                    "type": "keyword"
                },
                "stock": {
                    "type": "integer"
                },
                "image_url": {
                    "type": "keyword"
                },
                "created_at": {
                    "type": "date"
                },
                "updated_at": {
                    "type": "date"
                }
            }
        }
    })
}
