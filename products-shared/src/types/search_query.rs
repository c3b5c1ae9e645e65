//! Query parameter types for listing and searching products.

use serde::{Deserialize, Serialize};

/// Default page size for listing.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Maximum page size for listing.
pub const MAX_LIST_LIMIT: usize = 100;

/// Default result cap for full-text search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Maximum result cap for full-text search.
pub const MAX_SEARCH_LIMIT: usize = 50;

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Paginated listing, newest first, optionally restricted to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Number of products to skip.
    #[serde(default)]
    pub skip: usize,

    /// Page size. Between 1 and 100, default 50.
    #[serde(default = "default_list_limit")]
    pub limit: usize,

    /// Exact category to filter on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
            category: None,
        }
    }
}

impl ListQuery {
    /// Create a listing query for the window `[skip, skip + limit)`.
    pub fn new(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit,
            category: None,
        }
    }

    /// Restrict the listing to an exact category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The category filter to apply. An empty category means no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Validate the query parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == 0 || self.limit > MAX_LIST_LIMIT {
            return Err(format!(
                "limit must be between 1 and {} (got {})",
                MAX_LIST_LIMIT, self.limit
            ));
        }
        Ok(())
    }
}

/// Full-text search over name, category and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search text.
    #[serde(rename = "q")]
    pub query: String,

    /// Maximum number of results. Between 1 and 50, default 20.
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl SearchQuery {
    /// Create a search query with the default result cap.
    ///
    /// # Example
    ///
    /// ```
    /// use products_shared::SearchQuery;
    ///
    /// let query = SearchQuery::new("macbook").with_limit(5);
    /// assert!(query.validate().is_ok());
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Set the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Validate the query parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.query.is_empty() {
            return Err("Query string cannot be empty".to_string());
        }
        if self.limit == 0 || self.limit > MAX_SEARCH_LIMIT {
            return Err(format!(
                "limit must be between 1 and {} (got {})",
                MAX_SEARCH_LIMIT, self.limit
            ));
        }
        Ok(())
    }
}
