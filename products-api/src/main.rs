//! Products API Main Entry Point
//!
//! Serves CRUD and full-text search over the product catalog stored in
//! OpenSearch.

use dotenv::dotenv;
use products_api::{
    server::{self, state::AppState},
    telemetry::{init_tracing, LogFormat},
    Dependencies, ServiceConfig,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing(LogFormat::from_env());

    info!("Starting products API");

    let config = ServiceConfig::from_env();

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e.into());
        }
    };

    let app = server::create_app(AppState {
        catalog: deps.catalog,
    });

    if let Err(e) = server::run_server(app, config.listen_addr()).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    info!("Products API stopped");
    Ok(())
}
