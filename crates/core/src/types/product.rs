//! Product catalog types.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::money::Money;

/// Highest value accepted for [`Product::rating`].
pub const MAX_RATING: f64 = 5.0;

/// Rule violations for a single product.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// The name is blank after trimming.
    #[error("product name is required")]
    EmptyName,
    /// The price (or a variant price) is below zero.
    #[error("price cannot be negative: {0}")]
    NegativePrice(Money),
    /// Two variants share a SKU.
    #[error("duplicate variant sku: {0}")]
    DuplicateVariantSku(String),
    /// Rating is outside `0..=5`.
    #[error("rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Absolute image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt: String,
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ProductImage {
    /// An image with no known dimensions.
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            width: None,
            height: None,
        }
    }
}

/// A purchasable variant of a product (size, color, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub price: Money,
    pub stock: u32,
    /// Free-form attributes such as `{"color": "black"}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Shipping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
}

/// A catalog product.
///
/// `id` and `sku` are unique within a catalog; see [`crate::Catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Money>,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ProductDimensions>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Create an active product with a slug derived from `name`.
    pub fn new(id: ProductId, sku: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        let name = name.into();
        Self {
            id,
            sku: sku.into(),
            slug: slugify(&name),
            name,
            description: None,
            categories: BTreeSet::new(),
            brand: None,
            images: Vec::new(),
            price,
            compare_at_price: None,
            stock: 0,
            rating: None,
            variants: Vec::new(),
            dimensions: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: ProductImage) -> Self {
        self.images.push(image);
        self
    }

    #[must_use]
    pub const fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// The category shown on product cards (first in sort order).
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.iter().next().map(String::as_str)
    }

    /// Whether the product belongs to `category`, ignoring ASCII case.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category.trim()))
    }

    /// Check the product-level rules.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(ProductError::NegativePrice(self.price));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ProductError::InvalidRating(rating));
            }
        }

        let mut skus = HashSet::new();
        for variant in &self.variants {
            if variant.price.is_negative() {
                return Err(ProductError::NegativePrice(variant.price));
            }
            if !skus.insert(variant.sku.as_str()) {
                return Err(ProductError::DuplicateVariantSku(variant.sku.clone()));
            }
        }
        Ok(())
    }
}

/// Narrow read-only view of a [`Product`] used by listing pages and cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub image_alt: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        let image = product.images.first();
        Self {
            id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.primary_category().unwrap_or_default().to_owned(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            image_url: image.map(|img| img.url.clone()),
            image_alt: image.map_or_else(|| product.name.clone(), |img| img.alt.clone()),
        }
    }
}

/// Lower-case, hyphen-separated URL slug: `"iPhone 15 Pro"` becomes `"iphone-15-pro"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
