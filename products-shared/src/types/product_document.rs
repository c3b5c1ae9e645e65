//! Product document types for the search index.
//!
//! This module defines the document body stored in the search engine. The
//! product id is not part of the body: it is carried as the document key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::product::Product;
use crate::types::product_patch::ProductPatch;

/// ISO-8601 timestamps with millisecond precision, as stored by the engine's
/// `date` type.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// Document representation of a product in the search index.
///
/// All fields are serialized, optional ones as `null`, so the stored body
/// always carries the full schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ProductDocument {
    /// Rebuild the API record, injecting the document key as `id`.
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
            image_url: product.image_url.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Partial document sent to the engine's update API.
///
/// Only the supplied fields of `fields` are serialized, plus `updated_at`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDocumentPatch {
    #[serde(flatten)]
    pub fields: ProductPatch,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ProductDocumentPatch {
    /// Create a partial document from a patch, stamped with `updated_at`.
    pub fn new(fields: ProductPatch, updated_at: DateTime<Utc>) -> Self {
        Self { fields, updated_at }
    }
}
