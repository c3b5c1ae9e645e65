//! Translation between API-level products and index documents.

use chrono::{DateTime, Utc};
use products_shared::{Product, ProductDocument, ProductDocumentPatch, ProductPatch};

use crate::errors::CatalogError;
use crate::types::DocumentHit;

/// Serialize a product into its document body. The id is carried as the
/// document key, not as a field.
pub fn to_document(product: &Product) -> ProductDocument {
    ProductDocument::from(product)
}

/// Build the partial document for an update: the supplied fields plus the
/// new `updated_at`.
pub fn to_partial_document(patch: ProductPatch, updated_at: DateTime<Utc>) -> ProductDocumentPatch {
    ProductDocumentPatch::new(patch, updated_at)
}

/// Rebuild a product from a stored document, injecting `key` as the id.
///
/// Fails with `MalformedRecord` if a required field (`name`, `price`,
/// `category`, timestamps) is missing or any field has the wrong type.
pub fn from_document(key: &str, document: serde_json::Value) -> Result<Product, CatalogError> {
    let document: ProductDocument = serde_json::from_value(document)
        .map_err(|e| CatalogError::malformed(key, e.to_string()))?;
    Ok(document.into_product(key))
}

/// Decode a raw hit from the engine.
pub fn from_hit(hit: DocumentHit) -> Result<Product, CatalogError> {
    from_document(&hit.id, hit.source)
}
