//! Query bodies sent to the search engine, and decoding of its responses.
//!
//! Only two query shapes exist: the paginated listing and the multi-field
//! full-text search. Get-by-id is a direct key lookup and needs no body.

use products_shared::{ListQuery, SearchQuery};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::CatalogError;
use crate::types::DocumentHit;

/// Fields searched by full-text queries, with their boosts.
pub const SEARCH_FIELDS: [&str; 3] = ["name^3", "category^2", "description"];

/// Build the listing body: `match_all` or an exact `term` on `category`,
/// newest first, paginated by offset.
pub fn list_query_body(query: &ListQuery) -> Value {
    let filter = match query.category_filter() {
        Some(category) => json!({ "term": { "category": category } }),
        None => json!({ "match_all": {} }),
    };

    json!({
        "query": filter,
        "from": query.skip,
        "size": query.limit,
        "sort": [{ "created_at": { "order": "desc" } }]
    })
}

/// Build the full-text body: OR across terms, fuzzy, ranked by score.
pub fn search_query_body(query: &SearchQuery) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": query.query,
                "fields": SEARCH_FIELDS,
                "operator": "or",
                "fuzziness": "AUTO"
            }
        },
        "size": query.limit
    })
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Value,
}

impl From<RawHit> for DocumentHit {
    fn from(hit: RawHit) -> Self {
        Self {
            id: hit.id,
            score: hit.score,
            source: hit.source,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    hits: HitsEnvelope,
}

/// Extract the hits of a `_search` response, preserving engine order.
pub fn parse_search_response(body: Value) -> Result<Vec<DocumentHit>, CatalogError> {
    let parsed: SearchResponseBody = serde_json::from_value(body)
        .map_err(|e| CatalogError::parse(format!("Invalid search response: {}", e)))?;
    Ok(parsed.hits.hits.into_iter().map(DocumentHit::from).collect())
}

/// Extract the document of a successful `_doc` get response.
pub fn parse_get_response(body: Value) -> Result<DocumentHit, CatalogError> {
    let parsed: RawHit = serde_json::from_value(body)
        .map_err(|e| CatalogError::parse(format!("Invalid get response: {}", e)))?;
    Ok(parsed.into())
}
