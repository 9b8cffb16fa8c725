//! REST API envelope shapes.
//!
//! ```text
//! single resource  { "data": T, "message"?: string, "meta"?: object }
//! paginated        { "data": [T], "meta": { page, limit, totalItems, totalPages } }
//! error            { "message", "status", "errorCode"?, "details"?, "trackingId"? }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::SortOrder;

/// Envelope for a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            data,
            message: None,
            meta: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add one entry to `meta`, creating the object on first use.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Build metadata with `totalPages = ceil(totalItems / limit)`.
    ///
    /// A zero `limit` yields zero pages.
    #[must_use]
    pub const fn new(page: u32, limit: u32, total_items: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_items.div_ceil(limit)
        };
        Self {
            page,
            limit,
            total_items,
            total_pages,
        }
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Envelope for a page of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Cut the requested page out of the full, already-ordered result set.
    #[must_use]
    pub fn from_items(items: Vec<T>, params: &PaginationParams) -> Self {
        let total_items = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let page = params.page();
        let limit = params.limit();
        let data = items
            .into_iter()
            .skip(params.offset())
            .take(limit as usize)
            .collect();
        Self {
            data,
            meta: PaginationMeta::new(page, limit, total_items),
        }
    }

    /// Transform each item, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// List request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
}

impl PaginationParams {
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Requested page, 1-based; defaults to 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Requested page size clamped to `1..=MAX_LIMIT`; defaults to 20.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    /// Number of items before the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page() as usize - 1) * self.limit() as usize
    }

    /// Requested sort direction; defaults to ascending.
    #[must_use]
    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }
}

/// Error envelope returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            error_code: None,
            details: None,
            tracking_id: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn with_tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = Some(tracking_id.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = PaginationMeta::new(1, 20, 95);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_next());
    }

    #[test]
    fn test_total_pages_exact_and_empty() {
        assert_eq!(PaginationMeta::new(1, 20, 100).total_pages, 5);
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 0, 10).total_pages, 0);
    }

    #[test]
    fn test_params_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            page: Some(0),
            limit: Some(500),
            ..PaginationParams::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            page: Some(3),
            limit: Some(5),
            ..PaginationParams::default()
        };
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn test_from_items_slices_page() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(4),
            ..PaginationParams::default()
        };
        let page = PaginatedResponse::from_items((1..=10).collect::<Vec<u32>>(), &params);
        assert_eq!(page.data, vec![5, 6, 7, 8]);
        assert_eq!(page.meta, PaginationMeta::new(2, 4, 10));
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_from_items_past_end_is_empty() {
        let params = PaginationParams {
            page: Some(9),
            limit: Some(4),
            ..PaginationParams::default()
        };
        let page = PaginatedResponse::from_items(vec![1, 2, 3], &params);
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_items, 3);
    }

    #[test]
    fn test_paginated_envelope_shape() {
        let page = PaginatedResponse::from_items(vec!["a"], &PaginationParams::default());
        assert_eq!(
            serde_json::to_value(page).unwrap(),
            json!({
                "data": ["a"],
                "meta": { "page": 1, "limit": 20, "totalItems": 1, "totalPages": 1 }
            })
        );
    }

    #[test]
    fn test_api_response_envelope_shape() {
        let response = ApiResponse::new(7).with_message("ok").with_meta("source", "static");
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "data": 7, "message": "ok", "meta": { "source": "static" } })
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::new("x")).unwrap(),
            json!({ "data": "x" })
        );
    }

    #[test]
    fn test_api_error_envelope_shape() {
        let err = ApiError::new(404, "Product not found")
            .with_code("PRODUCT_NOT_FOUND")
            .with_tracking_id("req-1");
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            json!({
                "message": "Product not found",
                "status": 404,
                "errorCode": "PRODUCT_NOT_FOUND",
                "trackingId": "req-1"
            })
        );
    }
}
