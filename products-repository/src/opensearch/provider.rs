//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `ProductIndexProvider`
//! using the OpenSearch Rust crate.

use std::future::Future;

use async_trait::async_trait;
use opensearch::{
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts},
    DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts, UpdateParts,
};
use products_shared::{ListQuery, ProductDocument, ProductDocumentPatch, SearchQuery};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::errors::CatalogError;
use crate::interfaces::ProductIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries;
use crate::types::{DocumentHit, IndexStatus};

/// OpenSearch provider implementation.
///
/// Holds a single client for the lifetime of the process. The client is safe
/// to share between concurrent requests.
///
/// # Example
///
/// ```ignore
/// use products_repository::{OpenSearchProvider, ProviderConfig};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", ProviderConfig::default()).await?;
/// provider.ensure_index_exists().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
    request_retries: u32,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the specified URL.
    ///
    /// No request is sent; use `ping` to check connectivity.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - Index name, request timeout and retry policy
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(CatalogError)` - If the URL is invalid or the transport cannot be built
    pub async fn new(url: &str, config: ProviderConfig) -> Result<Self, CatalogError> {
        let parsed_url =
            Url::parse(url).map_err(|e| CatalogError::engine_unavailable(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::engine_unavailable(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %config.index.name,
            timeout_ms = config.request_timeout.as_millis() as u64,
            request_retries = config.request_retries,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config: config.index,
            request_retries: config.request_retries,
        })
    }

    fn index_name(&self) -> &str {
        &self.index_config.name
    }

    /// Send a request, re-sending it after transport failures up to
    /// `request_retries` times.
    ///
    /// Any response, whatever its status, ends the loop.
    async fn send_with_retry<F, Fut>(
        &self,
        operation: &'static str,
        send: F,
    ) -> Result<Response, CatalogError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Response, opensearch::Error>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match send().await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.request_retries => {
                    attempt += 1;
                    warn!(
                        operation,
                        attempt,
                        max_retries = self.request_retries,
                        error = %e,
                        "Search engine request failed, retrying"
                    );
                }
                Err(e) => {
                    error!(operation, error = %e, "Search engine unreachable");
                    return Err(CatalogError::engine_unavailable(format!(
                        "{} failed: {}",
                        operation, e
                    )));
                }
            }
        }
    }

    /// Read the body of a failed response for error reporting.
    async fn error_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }

    /// Whether an index creation failure only means someone else created it first.
    fn is_already_exists(error_body: &str) -> bool {
        error_body.contains("resource_already_exists_exception")
    }

    async fn run_search(
        &self,
        operation: &'static str,
        body: Value,
    ) -> Result<Vec<DocumentHit>, CatalogError> {
        let index = self.index_name();
        let body = &body;

        let response = self
            .send_with_retry(operation, || async move {
                self.client
                    .search(SearchParts::Index(&[index]))
                    .body(body)
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, operation, "Search request failed");
            return Err(CatalogError::search(format!(
                "{} failed with status {}: {}",
                operation, status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::parse(e.to_string()))?;
        let hits = queries::parse_search_response(body)?;

        debug!(operation, hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

#[async_trait]
impl ProductIndexProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<bool, CatalogError> {
        let response = self
            .send_with_retry("ping", || async move { self.client.ping().send().await })
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            warn!(status = %status, "Search engine ping returned an error status");
        }
        Ok(status.is_success())
    }

    /// Create the product index with its settings and mappings unless it exists.
    ///
    /// An existing index is left untouched, even if its mapping differs.
    async fn ensure_index_exists(&self) -> Result<IndexStatus, CatalogError> {
        let index = self.index_name();

        let response = self
            .send_with_retry("index_exists", || async move {
                self.client
                    .indices()
                    .exists(IndicesExistsParts::Index(&[index]))
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Product index already exists, skipping creation");
            return Ok(IndexStatus::AlreadyExists);
        }
        if status.as_u16() != 404 {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index existence check failed");
            return Err(CatalogError::index_creation(format!(
                "Existence check failed with status {}: {}",
                status, error_body
            )));
        }

        let settings = get_index_settings();
        let settings = &settings;

        let response = self
            .send_with_retry("create_index", || async move {
                self.client
                    .indices()
                    .create(IndicesCreateParts::Index(index))
                    .body(settings)
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            if Self::is_already_exists(&error_body) {
                info!(index = %index, "Product index was created concurrently");
                return Ok(IndexStatus::AlreadyExists);
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(CatalogError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created product index");
        Ok(IndexStatus::Created)
    }

    async fn index_document(
        &self,
        id: &str,
        document: &ProductDocument,
    ) -> Result<(), CatalogError> {
        let index = self.index_name();

        let response = self
            .send_with_retry("index_document", || async move {
                self.client
                    .index(IndexParts::IndexId(index, id))
                    .body(document)
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(CatalogError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, "Document indexed");
        Ok(())
    }

    /// Merge a partial document. Unlike an upsert, a missing document is an error.
    async fn update_document(
        &self,
        id: &str,
        patch: &ProductDocumentPatch,
    ) -> Result<(), CatalogError> {
        let index = self.index_name();
        let doc = serde_json::to_value(patch)
            .map_err(|e| CatalogError::serialization(e.to_string()))?;
        let body = json!({ "doc": doc });
        let body = &body;

        let response = self
            .send_with_retry("update_document", || async move {
                self.client
                    .update(UpdateParts::IndexId(index, id))
                    .body(body)
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            debug!(doc_id = %id, "Update target does not exist");
            return Err(CatalogError::not_found(id));
        }
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Update request failed");
            return Err(CatalogError::update(format!(
                "Update failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, "Document updated");
        Ok(())
    }

    async fn get_document(&self, id: &str) -> Result<DocumentHit, CatalogError> {
        let index = self.index_name();

        let response = self
            .send_with_retry("get_document", || async move {
                self.client.get(GetParts::IndexId(index, id)).send().await
            })
            .await?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(CatalogError::not_found(id));
        }
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Get request failed");
            return Err(CatalogError::search(format!(
                "Get failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::parse(e.to_string()))?;
        queries::parse_get_response(body)
    }

    /// Delete a document. If the document doesn't exist, the operation is
    /// considered successful.
    async fn delete_document(&self, id: &str) -> Result<(), CatalogError> {
        let index = self.index_name();

        let response = self
            .send_with_retry("delete_document", || async move {
                self.client.delete(DeleteParts::IndexId(index, id)).send().await
            })
            .await?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(CatalogError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, "Document deleted");
        Ok(())
    }

    async fn list_documents(&self, query: &ListQuery) -> Result<Vec<DocumentHit>, CatalogError> {
        self.run_search("list_documents", queries::list_query_body(query))
            .await
    }

    async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<DocumentHit>, CatalogError> {
        self.run_search("search_documents", queries::search_query_body(query))
            .await
    }

    async fn refresh(&self) -> Result<(), CatalogError> {
        let index = self.index_name();

        let response = self
            .send_with_retry("refresh", || async move {
                self.client
                    .indices()
                    .refresh(IndicesRefreshParts::Index(&[index]))
                    .send()
                    .await
            })
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Refresh request failed");
            return Err(CatalogError::refresh(format!(
                "Refresh failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Nothing listens on port 1, so every request fails at the transport level.
    const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

    fn fast_config() -> ProviderConfig {
        ProviderConfig::default().with_request_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchProvider::new("not a url", ProviderConfig::default()).await;
        assert!(matches!(result, Err(CatalogError::EngineUnavailable(_))));
    }

    #[tokio::test]
    async fn test_new_uses_configured_index() {
        let config = ProviderConfig::new(IndexConfig::new("catalog_test"));
        let provider = OpenSearchProvider::new("http://localhost:9200", config)
            .await
            .unwrap();
        assert_eq!(provider.index_name(), "catalog_test");
        assert_eq!(provider.request_retries, 0);
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_engine_unavailable() {
        let provider = OpenSearchProvider::new(UNREACHABLE_URL, fast_config())
            .await
            .unwrap();

        assert!(matches!(
            provider.ping().await,
            Err(CatalogError::EngineUnavailable(_))
        ));
        assert!(matches!(
            provider.get_document("abc").await,
            Err(CatalogError::EngineUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_retries_are_bounded() {
        let provider =
            OpenSearchProvider::new(UNREACHABLE_URL, fast_config().with_request_retries(2))
                .await
                .unwrap();

        let result = provider.refresh().await;
        assert!(matches!(result, Err(CatalogError::EngineUnavailable(_))));
    }

    use products_shared::{now_millis, FieldUpdate, ProductPatch};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    type RequestLog = Arc<Mutex<Vec<String>>>;

    /// Read one HTTP request and return its request line.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Local HTTP server answering every request with `respond(request_line)`.
    async fn stub_engine<F>(respond: F) -> (OpenSearchProvider, RequestLog)
    where
        F: Fn(&str) -> (u16, &'static str) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request_line = read_request(&mut socket).await;
                let (status, body) = respond(&request_line);
                let body = if request_line.starts_with("HEAD ") { "" } else { body };
                recorded.lock().unwrap().push(request_line);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let provider = OpenSearchProvider::new(&url, ProviderConfig::default())
            .await
            .unwrap();
        (provider, requests)
    }

    fn recorded(requests: &RequestLog) -> Vec<String> {
        requests.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_update_of_missing_document_is_not_found() {
        let (provider, requests) = stub_engine(|_| {
            (404, r#"{"error":{"type":"document_missing_exception"},"status":404}"#)
        })
        .await;
        let patch = ProductDocumentPatch::new(
            ProductPatch {
                stock: FieldUpdate::Set(3),
                ..Default::default()
            },
            now_millis(),
        );

        let result = provider.update_document("abc", &patch).await;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "abc"));
        assert!(recorded(&requests)[0].starts_with("POST /products/_update/abc "));
    }

    #[tokio::test]
    async fn test_update_engine_error_is_update_error() {
        let (provider, _) = stub_engine(|_| {
            (400, r#"{"error":{"type":"mapper_parsing_exception"},"status":400}"#)
        })
        .await;
        let patch = ProductDocumentPatch::new(ProductPatch::default(), now_millis());

        let result = provider.update_document("abc", &patch).await;
        assert!(matches!(result, Err(CatalogError::UpdateError(_))));
    }

    #[tokio::test]
    async fn test_get_status_mapping() {
        let (provider, _) = stub_engine(|line| {
            if line.contains("/_doc/missing ") {
                (404, r#"{"_index":"products","_id":"missing","found":false}"#)
            } else if line.contains("/_doc/abc ") {
                (
                    200,
                    r#"{"_index":"products","_id":"abc","_version":1,"found":true,"_source":{"name":"Widget"}}"#,
                )
            } else {
                (500, r#"{"error":"boom"}"#)
            }
        })
        .await;

        assert!(matches!(
            provider.get_document("missing").await,
            Err(CatalogError::NotFound(_))
        ));

        let hit = provider.get_document("abc").await.unwrap();
        assert_eq!(hit.id, "abc");
        assert_eq!(hit.source["name"], "Widget");

        assert!(matches!(
            provider.get_document("other").await,
            Err(CatalogError::SearchError(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_status_mapping() {
        let (provider, requests) = stub_engine(|line| {
            if line.contains("/_doc/missing ") {
                (404, r#"{"_index":"products","_id":"missing","result":"not_found"}"#)
            } else {
                (500, r#"{"error":"boom"}"#)
            }
        })
        .await;

        assert!(provider.delete_document("missing").await.is_ok());
        assert!(matches!(
            provider.delete_document("other").await,
            Err(CatalogError::DeleteError(_))
        ));
        assert!(recorded(&requests)[0].starts_with("DELETE /products/_doc/missing "));
    }

    #[tokio::test]
    async fn test_document_ids_are_path_encoded() {
        let (provider, requests) =
            stub_engine(|_| (200, r#"{"result":"deleted"}"#)).await;

        provider.delete_document("a/b").await.unwrap();

        assert!(recorded(&requests)[0].starts_with("DELETE /products/_doc/a%2Fb "));
    }

    #[tokio::test]
    async fn test_ensure_index_creates_missing_index() {
        let (provider, requests) = stub_engine(|line| {
            if line.starts_with("HEAD ") {
                (404, "")
            } else {
                (200, r#"{"acknowledged":true,"index":"products"}"#)
            }
        })
        .await;

        let status = provider.ensure_index_exists().await.unwrap();

        assert_eq!(status, IndexStatus::Created);
        let requests = recorded(&requests);
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("HEAD /products "));
        assert!(requests[1].starts_with("PUT /products "));
    }

    #[tokio::test]
    async fn test_ensure_index_leaves_existing_index() {
        let (provider, requests) = stub_engine(|_| (200, "")).await;

        let status = provider.ensure_index_exists().await.unwrap();

        assert_eq!(status, IndexStatus::AlreadyExists);
        assert_eq!(recorded(&requests).len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_index_created_concurrently() {
        let (provider, _) = stub_engine(|line| {
            if line.starts_with("HEAD ") {
                (404, "")
            } else {
                (
                    400,
                    r#"{"error":{"root_cause":[{"type":"resource_already_exists_exception"}],"type":"resource_already_exists_exception"},"status":400}"#,
                )
            }
        })
        .await;

        let status = provider.ensure_index_exists().await.unwrap();
        assert_eq!(status, IndexStatus::AlreadyExists);
    }

    #[tokio::test]
    async fn test_ensure_index_creation_failure() {
        let (provider, _) = stub_engine(|line| {
            if line.starts_with("HEAD ") {
                (404, "")
            } else {
                (400, r#"{"error":{"type":"mapper_parsing_exception"},"status":400}"#)
            }
        })
        .await;

        assert!(matches!(
            provider.ensure_index_exists().await,
            Err(CatalogError::IndexCreationError(_))
        ));
    }

    #[tokio::test]
    async fn test_search_status_mapping() {
        let (provider, requests) = stub_engine(|line| {
            if line.contains("/_search") {
                (
                    200,
                    r#"{"hits":{"total":{"value":1,"relation":"eq"},"hits":[{"_id":"abc","_score":1.5,"_source":{"name":"Widget"}}]}}"#,
                )
            } else {
                (500, r#"{"error":"boom"}"#)
            }
        })
        .await;

        let hits = provider
            .search_documents(&SearchQuery::new("widget"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "abc");
        assert_eq!(hits[0].score, Some(1.5));
        assert!(recorded(&requests)[0].contains(" /products/_search"));

        assert!(matches!(
            provider.refresh().await,
            Err(CatalogError::RefreshError(_))
        ));
    }

    #[tokio::test]
    async fn test_search_rejected_by_engine() {
        let (provider, _) = stub_engine(|_| {
            (400, r#"{"error":{"type":"search_phase_execution_exception"},"status":400}"#)
        })
        .await;

        assert!(matches!(
            provider.list_documents(&ListQuery::default()).await,
            Err(CatalogError::SearchError(_))
        ));
    }

    #[test]
    fn test_is_already_exists() {
        let body = r#"{"error":{"root_cause":[{"type":"resource_already_exists_exception"}]},"status":400}"#;
        assert!(OpenSearchProvider::is_already_exists(body));
        assert!(!OpenSearchProvider::is_already_exists(
            r#"{"error":{"type":"mapper_parsing_exception"}}"#
        ));
    }
}
