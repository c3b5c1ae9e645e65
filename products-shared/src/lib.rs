//! # Products Shared
//!
//! This crate defines the data structures shared across the products catalog:
//! the API-level `Product` record, the document body stored in the search
//! index, partial update payloads and the list/search query parameters.

pub mod types;
pub mod validation;

pub use types::{
    new_product_id, now_millis, FieldUpdate, ListQuery, NewProduct, Product, ProductDocument,
    ProductDocumentPatch, ProductPatch, SearchQuery,
};
