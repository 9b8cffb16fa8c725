//! Read-only JSON view of the catalog.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use evolution_core::{
    ApiResponse, PaginatedResponse, PaginationParams, Product, ProductFilter, ProductId,
    ProductSummary, SortOrder,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query string accepted by `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductListQuery {
    fn into_parts(self) -> (ProductFilter, PaginationParams) {
        let filter = ProductFilter {
            category: self.category.filter(|c| !c.trim().is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            search: None,
            include_inactive: false,
        };
        let params = PaginationParams {
            page: self.page,
            limit: self.limit,
            search: self.search,
            sort: self.sort.filter(|s| !s.trim().is_empty()),
            order: self.order,
            filters: None,
        };
        (filter, params)
    }
}

/// List catalog products, filtered and paginated.
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<ProductSummary>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (filter, params) = query.into_parts();

    let page = state.catalog().catalog().query(&filter, &params)?;
    tracing::debug!(
        returned = page.data.len(),
        total = page.meta.total_items,
        "Listed products"
    );
    Ok(Json(page))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product_id: ProductId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid product id: {id}")))?;

    state
        .catalog()
        .find_product(product_id)
        .map(|product| Json(ApiResponse::new(product)))
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_ignored() {
        let query = ProductListQuery {
            category: Some("  ".to_string()),
            sort: Some(String::new()),
            limit: Some(5),
            ..Default::default()
        };
        let (filter, params) = query.into_parts();
        assert!(filter.category.is_none());
        assert!(params.sort.is_none());
        assert_eq!(params.limit(), 5);
    }
}
