//! Configuration types for the OpenSearch provider.

use std::time::Duration;

use crate::opensearch::IndexConfig;

/// Default per-request transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the `OpenSearchProvider`.
///
/// Controls which index is used and how individual engine requests behave on
/// the request path.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// The product index.
    pub index: IndexConfig,

    /// Timeout applied to every engine request.
    pub request_timeout: Duration,

    /// How many times a request is re-sent after a transport failure
    /// (connection refused, timeout). Responses carrying an HTTP status,
    /// including errors, are never retried.
    ///
    /// Defaults to 0.
    pub request_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_retries: 0,
        }
    }
}

impl ProviderConfig {
    /// Create a config for the given index with default request behavior.
    pub fn new(index: IndexConfig) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the number of transport-failure retries.
    pub fn with_request_retries(mut self, retries: u32) -> Self {
        self.request_retries = retries;
        self
    }
}
