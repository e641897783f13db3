use serde::Serialize;

use crate::config::DEFAULT_PAGE_SIZE;

/// Listing request. `search` and `category` are mutually exclusive on the
/// wire: when a search term is present the search endpoint is used and the
/// category is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListParams<'a> {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchParams<'a> {
    pub q: &'a str,
    pub page: u32,
    pub limit: u32,
}

impl ProductQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            category: None,
            search: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Page at least 1, limit within 1..=100, blank filters dropped.
    pub fn normalize(&self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
            category: non_blank(self.category.as_deref()),
            search: non_blank(self.search.as_deref()),
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub(crate) fn list_params(&self) -> ListParams<'_> {
        ListParams {
            page: self.page,
            limit: self.limit,
            category: self.category.as_deref().filter(|c| !c.trim().is_empty()),
        }
    }

    pub(crate) fn search_params<'a>(&self, q: &'a str) -> SearchParams<'a> {
        SearchParams {
            q,
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
