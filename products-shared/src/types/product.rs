//! Product record types.
//!
//! `Product` is the API-level record returned to callers. `NewProduct` is the
//! creation payload: every field of a product except the id and timestamps.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation;

/// A catalog product as returned by the API.
///
/// # Fields
///
/// - `id`: Opaque identifier, also the search engine document key
/// - `name`: Display name (primary search field)
/// - `description`: Optional long text (secondary search field)
/// - `price`: Unit price, always greater than zero
/// - `category`: Exact-match category used for filtering
/// - `stock`: Units in stock, never negative
/// - `image_url`: Optional image location
/// - `created_at`: Set once when the product is created
/// - `updated_at`: Refreshed on every mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Create a payload with the required fields; stock defaults to 0.
    ///
    /// # Example
    ///
    /// ```
    /// use products_shared::NewProduct;
    ///
    /// let widget = NewProduct::new("Widget", 9.99, "tools").with_stock(5);
    /// assert!(widget.validate().is_ok());
    /// ```
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            category: category.into(),
            stock: 0,
            image_url: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Check every field constraint.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        validation::validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validation::validate_description(description)?;
        }
        validation::validate_price(self.price)?;
        validation::validate_category(&self.category)?;
        validation::validate_stock(self.stock)?;
        Ok(())
    }

    /// Build the full record, stamping both timestamps with `now`.
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mint a fresh product id.
pub fn new_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time truncated to the millisecond resolution the search engine stores.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
