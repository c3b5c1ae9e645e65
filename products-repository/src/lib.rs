//! # Products Repository
//!
//! This crate provides traits and implementations for storing and searching
//! products in the search index. It includes definitions for errors, the
//! provider interface, the product/document mapping layer, and a concrete
//! implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod mapping;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::ProviderConfig;
pub use errors::CatalogError;
pub use interfaces::ProductIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use service::ProductCatalogService;
pub use types::{DocumentHit, EngineStatus, IndexStatus};
