//! Error types for the products repository.
//!
//! This module provides a unified error type for all catalog operations.

mod catalog_error;

pub use catalog_error::CatalogError;
