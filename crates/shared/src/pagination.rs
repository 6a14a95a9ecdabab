//! Page-based pagination utilities.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Upper bound for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    /// 1-based page number, defaulting to 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.per_page() as i64
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.per_page() as i64
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(params: &PageParams, total: i64) -> Self {
        let per_page = params.per_page();
        let total_pages = if total <= 0 {
            0
        } else {
            ((total as u64 + per_page as u64 - 1) / per_page as u64) as u32
        };
        Self {
            page: params.page(),
            per_page,
            total,
            total_pages,
        }
    }
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            data,
            pagination: Pagination::new(params, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let params = PageParams {
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), MAX_PER_PAGE);

        let zero = PageParams {
            page: None,
            per_page: Some(0),
        };
        assert_eq!(zero.per_page(), 1);
    }

    #[test]
    fn test_total_pages() {
        let params = PageParams {
            page: Some(1),
            per_page: Some(20),
        };
        assert_eq!(Pagination::new(&params, 0).total_pages, 0);
        assert_eq!(Pagination::new(&params, 20).total_pages, 1);
        assert_eq!(Pagination::new(&params, 21).total_pages, 2);
    }

    #[test]
    fn test_paginated_serializes_camel_case() {
        let page = Paginated::new(vec![1, 2, 3], &PageParams::default(), 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"]["perPage"], 20);
        assert_eq!(json["pagination"]["totalPages"], 1);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }
}
