//! In-memory product catalog.
//!
//! A [`Catalog`] guarantees that product ids and skus are unique and that
//! every product passes [`Product::validate`]. Listing goes through
//! [`Catalog::query`], which filters, sorts and pages into the paginated
//! envelope.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{
    PaginatedResponse, PaginationParams, Product, ProductError, ProductId, ProductSummary,
    SortOrder,
};

/// Catalog construction and query failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("duplicate product sku: {0}")]
    DuplicateSku(String),
    #[error("invalid product {id}: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ProductError,
    },
    #[error("cannot sort by '{0}' (expected id, name or price)")]
    InvalidSortField(String),
    #[error("min_price {min} is greater than max_price {max}")]
    InvalidPriceRange { min: Decimal, max: Decimal },
}

/// Filters applied before pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive exact category match.
    #[serde(default)]
    pub category: Option<String>,
    /// Inclusive lower price bound.
    #[serde(default)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub search: Option<String>,
    /// Include products with `isActive = false`.
    #[serde(default)]
    pub include_inactive: bool,
}

impl ProductFilter {
    fn matches(&self, product: &Product, search: Option<&str>) -> bool {
        if !self.include_inactive && !product.is_active {
            return false;
        }
        if let Some(category) = non_blank(self.category.as_deref()) {
            if !product.in_category(category) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price.amount < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price.amount > max) {
            return false;
        }
        if let Some(needle) = search {
            if !product.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    Id,
    Name,
    Price,
}

impl SortField {
    fn parse(raw: Option<&str>) -> Result<Self, CatalogError> {
        match non_blank(raw).map(str::to_ascii_lowercase).as_deref() {
            None | Some("id") => Ok(Self::Id),
            Some("name") => Ok(Self::Name),
            Some("price") => Ok(Self::Price),
            Some(_) => Err(CatalogError::InvalidSortField(
                raw.unwrap_or_default().to_string(),
            )),
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Price => a.price.amount.cmp(&b.price.amount),
        }
        .then_with(|| a.id.cmp(&b.id))
    }
}

/// A validated, immutable set of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Fails if ids or skus repeat, or a product breaks a product rule.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut skus = HashSet::new();
        for product in &products {
            product
                .validate()
                .map_err(|source| CatalogError::InvalidProduct {
                    id: product.id,
                    source,
                })?;
            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if !skus.insert(product.sku.as_str()) {
                return Err(CatalogError::DuplicateSku(product.sku.clone()));
            }
        }
        Ok(Self { products })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories across all products, sorted.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.products
            .iter()
            .flat_map(|p| p.categories.iter().map(String::as_str))
            .collect()
    }

    /// Filter, sort and page the catalog.
    ///
    /// `filter.search` takes precedence over `params.search`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown sort field or an inverted price range.
    pub fn query(
        &self,
        filter: &ProductFilter,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProductSummary>, CatalogError> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(CatalogError::InvalidPriceRange { min, max });
            }
        }
        let field = SortField::parse(params.sort.as_deref())?;
        let search = non_blank(filter.search.as_deref()).or(non_blank(params.search.as_deref()));

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p, search))
            .collect();
        matches.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            match params.order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(PaginatedResponse::from_items(matches, params).map(ProductSummary::from))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CurrencyCode, Money};

    fn product(id: i32, name: &str, cents: i64, category: &str) -> Product {
        Product::new(
            ProductId::new(id),
            format!("SKU-{id}"),
            name,
            Money::from_minor(cents, CurrencyCode::USD),
        )
        .with_category(category)
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Laptop HP Pavilion", 89_999, "Electronics"),
            product(2, "iPhone 15 Pro", 99_999, "Electronics"),
            product(3, "Coffee Maker Deluxe", 15_999, "Home"),
            product(4, "Running Shoes Pro", 12_999, "Sports"),
            product(5, "Wireless Headphones", 7_999, "Electronics"),
            product(6, "Smart Watch", 24_999, "Electronics"),
        ])
        .unwrap()
    }

    fn ids(page: &PaginatedResponse<ProductSummary>) -> Vec<i32> {
        page.data.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = Catalog::new(vec![product(1, "A", 100, "X"), product(1, "B", 100, "X")]);
        assert_eq!(result, Err(CatalogError::DuplicateId(ProductId::new(1))));
    }

    #[test]
    fn test_rejects_duplicate_sku() {
        let mut second = product(2, "B", 100, "X");
        second.sku = "SKU-1".to_string();
        let result = Catalog::new(vec![product(1, "A", 100, "X"), second]);
        assert_eq!(result, Err(CatalogError::DuplicateSku("SKU-1".to_string())));
    }

    #[test]
    fn test_rejects_invalid_product() {
        let result = Catalog::new(vec![product(1, " ", 100, "X")]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidProduct {
                source: ProductError::EmptyName,
                ..
            })
        ));
    }

    #[test]
    fn test_default_query_lists_everything_in_id_order() {
        let page = catalog()
            .query(&ProductFilter::default(), &PaginationParams::default())
            .unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(page.meta.total_items, 6);
        assert_eq!(page.meta.total_pages, 1);
    }

    #[test]
    fn test_filter_by_category() {
        let filter = ProductFilter {
            category: Some("electronics".to_string()),
            ..ProductFilter::default()
        };
        let page = catalog().query(&filter, &PaginationParams::default()).unwrap();
        assert_eq!(ids(&page), vec![1, 2, 5, 6]);
        assert!(page.data.iter().all(|p| p.category == "Electronics"));
    }

    #[test]
    fn test_search_by_name() {
        let params = PaginationParams {
            search: Some("coffee".to_string()),
            ..PaginationParams::default()
        };
        let page = catalog().query(&ProductFilter::default(), &params).unwrap();
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filter = ProductFilter {
            min_price: Some(Decimal::from(80)),
            max_price: Some(Decimal::new(24_999, 2)),
            ..ProductFilter::default()
        };
        let page = catalog().query(&filter, &PaginationParams::default()).unwrap();
        assert_eq!(ids(&page), vec![3, 4, 6]);
    }

    #[test]
    fn test_inverted_price_range() {
        let filter = ProductFilter {
            min_price: Some(Decimal::from(200)),
            max_price: Some(Decimal::from(80)),
            ..ProductFilter::default()
        };
        assert!(matches!(
            catalog().query(&filter, &PaginationParams::default()),
            Err(CatalogError::InvalidPriceRange { .. })
        ));
    }

    #[test]
    fn test_sort_by_price_desc() {
        let params = PaginationParams {
            sort: Some("price".to_string()),
            order: Some(SortOrder::Desc),
            ..PaginationParams::default()
        };
        let page = catalog().query(&ProductFilter::default(), &params).unwrap();
        assert_eq!(ids(&page), vec![2, 1, 6, 3, 4, 5]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let params = PaginationParams {
            sort: Some("name".to_string()),
            ..PaginationParams::default()
        };
        let page = catalog().query(&ProductFilter::default(), &params).unwrap();
        assert_eq!(ids(&page), vec![3, 2, 1, 4, 6, 5]);
    }

    #[test]
    fn test_unknown_sort_field() {
        let params = PaginationParams {
            sort: Some("rating".to_string()),
            ..PaginationParams::default()
        };
        assert_eq!(
            catalog().query(&ProductFilter::default(), &params),
            Err(CatalogError::InvalidSortField("rating".to_string()))
        );
    }

    #[test]
    fn test_pages_do_not_overlap() {
        let first = PaginationParams {
            page: Some(1),
            limit: Some(4),
            ..PaginationParams::default()
        };
        let second = PaginationParams {
            page: Some(2),
            ..first.clone()
        };
        let c = catalog();
        let a = c.query(&ProductFilter::default(), &first).unwrap();
        let b = c.query(&ProductFilter::default(), &second).unwrap();
        assert_eq!(ids(&a), vec![1, 2, 3, 4]);
        assert_eq!(ids(&b), vec![5, 6]);
        assert_eq!(a.meta.total_pages, 2);
    }

    #[test]
    fn test_inactive_products_hidden_by_default() {
        let mut hidden = product(7, "Old Phone", 1000, "Electronics");
        hidden.is_active = false;
        let mut products = catalog().products().to_vec();
        products.push(hidden);
        let c = Catalog::new(products).unwrap();

        let page = c
            .query(&ProductFilter::default(), &PaginationParams::default())
            .unwrap();
        assert_eq!(page.meta.total_items, 6);

        let filter = ProductFilter {
            include_inactive: true,
            ..ProductFilter::default()
        };
        let page = c.query(&filter, &PaginationParams::default()).unwrap();
        assert_eq!(page.meta.total_items, 7);
    }

    #[test]
    fn test_categories() {
        let c = catalog();
        let categories: Vec<&str> = c.categories().into_iter().collect();
        assert_eq!(categories, vec!["Electronics", "Home", "Sports"]);
    }

    #[test]
    fn test_get_and_get_by_slug() {
        let c = catalog();
        assert_eq!(c.get(ProductId::new(5)).unwrap().name, "Wireless Headphones");
        assert_eq!(c.get_by_slug("smart-watch").unwrap().id, ProductId::new(6));
        assert!(c.get(ProductId::new(99)).is_none());
    }
}
