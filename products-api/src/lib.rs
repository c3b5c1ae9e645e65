//! # Products API
//!
//! HTTP service exposing CRUD and full-text search over the product catalog,
//! backed by OpenSearch.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`seed`]: Sample products indexed into a freshly created index
//! - [`server`]: Router, handlers and HTTP error mapping
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod seed;
pub mod server;
pub mod telemetry;

pub use config::{Dependencies, ServiceConfig};

use products_repository::CatalogError;
use thiserror::Error;

/// Errors that can occur during service startup.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The search engine never became reachable.
    #[error("Search engine not ready: {0}")]
    EngineNotReady(String),

    /// Catalog error during index initialization or seeding.
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an engine readiness error.
    pub fn engine_not_ready(msg: impl Into<String>) -> Self {
        Self::EngineNotReady(msg.into())
    }
}
