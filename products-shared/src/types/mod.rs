//! This module defines the record, document and query types shared by the
//! catalog service and the HTTP API.

pub mod product;
pub mod product_document;
pub mod product_patch;
pub mod search_query;

pub use product::{new_product_id, now_millis, NewProduct, Product};
pub use product_document::{ProductDocument, ProductDocumentPatch};
pub use product_patch::{FieldUpdate, ProductPatch};
pub use search_query::{ListQuery, SearchQuery};
