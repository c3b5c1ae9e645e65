// App state for Axum server
use std::sync::Arc;

use products_repository::ProductCatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalogService>,
}
