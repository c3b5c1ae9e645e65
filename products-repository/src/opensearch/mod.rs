//! OpenSearch implementation of the product index provider.
//!
//! This module provides a concrete implementation of `ProductIndexProvider`
//! using OpenSearch as the backend, together with the index schema and the
//! query bodies it sends.

mod index_config;
mod provider;
pub mod queries;

pub use index_config::{get_index_settings, IndexConfig, INDEX_NAME, PRODUCT_ANALYZER};
pub use provider::OpenSearchProvider;
