//! Dependency initialization and wiring for the products API.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use products_repository::{
    IndexConfig, IndexStatus, OpenSearchProvider, ProductCatalogService, ProviderConfig,
};

use super::{ConnectionMode, ServiceConfig};
use crate::seed::sample_products;
use crate::StartupError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The catalog service shared by every request handler.
    pub catalog: Arc<ProductCatalogService>,
}

impl Dependencies {
    /// Connect to OpenSearch, make sure the product index exists and seed it
    /// when it was just created.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If the engine never answers, or the index cannot be created
    pub async fn new(config: &ServiceConfig) -> Result<Self, StartupError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index = %config.index_name,
            connection_mode = ?config.connection_mode,
            connect_attempts = config.connect_attempts,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let provider_config = ProviderConfig::new(IndexConfig::new(config.index_name.clone()))
            .with_request_timeout(config.request_timeout)
            .with_request_retries(config.request_retries);

        let provider = OpenSearchProvider::new(&config.opensearch_url, provider_config)
            .await
            .map_err(|e| {
                StartupError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;

        Self::from_catalog(ProductCatalogService::new(Box::new(provider)), config).await
    }

    /// Run the startup sequence against an already-built catalog service.
    pub async fn from_catalog(
        catalog: ProductCatalogService,
        config: &ServiceConfig,
    ) -> Result<Self, StartupError> {
        Self::wait_for_engine(
            &catalog,
            config.connection_mode,
            config.connect_attempts,
            config.retry_interval,
        )
        .await?;

        info!("OpenSearch connection established");

        let status = catalog.initialize().await?;
        if status == IndexStatus::Created && config.seed_sample_data {
            catalog.seed(sample_products()).await?;
        }

        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    /// Ping the engine until it answers, following the connection mode.
    async fn wait_for_engine(
        catalog: &ProductCatalogService,
        mode: ConnectionMode,
        attempts: u32,
        retry_interval: Duration,
    ) -> Result<(), StartupError> {
        let max_attempts = match mode {
            ConnectionMode::FailFast => 1,
            ConnectionMode::Retry => attempts.max(1),
        };

        for attempt in 1..=max_attempts {
            let failure = match catalog.ping().await {
                Ok(true) => return Ok(()),
                Ok(false) => "engine answered with an error status".to_string(),
                Err(e) => e.to_string(),
            };

            if attempt == max_attempts {
                return Err(StartupError::engine_not_ready(format!(
                    "no answer after {} attempt(s): {}",
                    max_attempts, failure
                )));
            }

            warn!(
                attempt,
                max_attempts,
                error = %failure,
                retry_interval_secs = retry_interval.as_secs(),
                "Failed to reach OpenSearch, retrying..."
            );
            sleep(retry_interval).await;
        }

        Err(StartupError::engine_not_ready("no connection attempt made"))
    }
}
