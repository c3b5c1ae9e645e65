//! Partial update payloads.
//!
//! A JSON update body distinguishes three states per field: the key is
//! missing (leave the stored value alone), the key is `null` (clear the stored
//! value) or the key carries a value (overwrite). `FieldUpdate` keeps those
//! three states apart so the document sent to the search engine only contains
//! the fields the caller actually supplied.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation;

/// Presence-aware wrapper for a single updatable field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    /// The field was not supplied.
    Unchanged,
    /// The field was supplied as `null`.
    Clear,
    /// The field was supplied with a value.
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    /// Returns true if the field was not supplied.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the new value, if one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        }
    }
}

// Only reached for keys present in the input; missing keys fall back to
// `Default` through `#[serde(default)]` on the containing struct.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Clear | Self::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Partial update of a product. Every field is optional.
///
/// `name`, `price`, `category` and `stock` can be set but not cleared;
/// `description` and `image_url` can be set or cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub name: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub description: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub price: FieldUpdate<f64>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub category: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub stock: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub image_url: FieldUpdate<String>,
}

fn reject_clear<T>(field: &str, update: &FieldUpdate<T>) -> Result<(), String> {
    if matches!(update, FieldUpdate::Clear) {
        return Err(format!("{} cannot be null", field));
    }
    Ok(())
}

impl ProductPatch {
    /// Returns true if no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_unchanged()
            && self.description.is_unchanged()
            && self.price.is_unchanged()
            && self.category.is_unchanged()
            && self.stock.is_unchanged()
            && self.image_url.is_unchanged()
    }

    /// Check the constraints of every supplied field.
    pub fn validate(&self) -> Result<(), String> {
        reject_clear("name", &self.name)?;
        reject_clear("price", &self.price)?;
        reject_clear("category", &self.category)?;
        reject_clear("stock", &self.stock)?;

        if let Some(name) = self.name.as_set() {
            validation::validate_name(name)?;
        }
        if let Some(description) = self.description.as_set() {
            validation::validate_description(description)?;
        }
        if let Some(price) = self.price.as_set() {
            validation::validate_price(*price)?;
        }
        if let Some(category) = self.category.as_set() {
            validation::validate_category(category)?;
        }
        if let Some(stock) = self.stock.as_set() {
            validation::validate_stock(*stock)?;
        }
        Ok(())
    }
}
