//! Product data provider.
//!
//! The home page and the catalog API read products through [`ProductCatalog`]
//! rather than a fixed array, so a database- or API-backed source can replace
//! [`StaticCatalog`] without touching the handlers.

use evolution_core::{Catalog, CatalogError, CurrencyCode, Money, Product, ProductId, ProductImage};
use rust_decimal::Decimal;

/// Source of the products shown by the storefront.
pub trait ProductCatalog: Send + Sync {
    /// The validated catalog backing this provider.
    fn catalog(&self) -> &Catalog;

    /// All products, in catalog order.
    fn list_products(&self) -> Vec<Product> {
        self.catalog().products().to_vec()
    }

    /// Look up a single product by id.
    fn find_product(&self, id: ProductId) -> Option<Product> {
        self.catalog().get(id).cloned()
    }
}

/// A featured product as listed on the home page.
struct FeaturedProduct {
    id: i32,
    sku: &'static str,
    name: &'static str,
    /// Price in minor units.
    price: i64,
    category: &'static str,
    description: &'static str,
    image: &'static str,
    stock: u32,
}

const FEATURED: [FeaturedProduct; 6] = [
    FeaturedProduct {
        id: 1,
        sku: "ELEC-LAPTOP-001",
        name: "Laptop HP Pavilion",
        price: 89_999,
        category: "Electronics",
        description: "High performance laptop perfect for work and entertainment",
        image: "https://via.placeholder.com/300x200/1890ff/white?text=Laptop",
        stock: 15,
    },
    FeaturedProduct {
        id: 2,
        sku: "ELEC-PHONE-002",
        name: "iPhone 15 Pro",
        price: 99_999,
        category: "Electronics",
        description: "Latest iPhone model with advanced camera system",
        image: "https://via.placeholder.com/300x200/52c41a/white?text=iPhone",
        stock: 25,
    },
    FeaturedProduct {
        id: 3,
        sku: "HOME-COFFEE-003",
        name: "Coffee Maker Deluxe",
        price: 15_999,
        category: "Home",
        description: "Premium coffee maker for the perfect morning brew",
        image: "https://via.placeholder.com/300x200/f5222d/white?text=Coffee",
        stock: 40,
    },
    FeaturedProduct {
        id: 4,
        sku: "SPORT-SHOES-004",
        name: "Running Shoes Pro",
        price: 12_999,
        category: "Sports",
        description: "Comfortable running shoes for professional athletes",
        image: "https://via.placeholder.com/300x200/722ed1/white?text=Shoes",
        stock: 60,
    },
    FeaturedProduct {
        id: 5,
        sku: "ELEC-AUDIO-005",
        name: "Wireless Headphones",
        price: 7_999,
        category: "Electronics",
        description: "Premium sound quality with noise cancellation",
        image: "https://via.placeholder.com/300x200/fa8c16/white?text=Headphones",
        stock: 80,
    },
    FeaturedProduct {
        id: 6,
        sku: "ELEC-WATCH-006",
        name: "Smart Watch",
        price: 24_999,
        category: "Electronics",
        description: "Track your fitness and stay connected",
        image: "https://via.placeholder.com/300x200/13c2c2/white?text=Watch",
        stock: 30,
    },
];

impl FeaturedProduct {
    fn to_product(&self, currency: CurrencyCode) -> Product {
        Product::new(
            ProductId::new(self.id),
            self.sku,
            self.name,
            Money::new(Decimal::new(self.price, 2), currency),
        )
        .with_description(self.description)
        .with_category(self.category)
        .with_image(ProductImage::new(self.image, self.name))
        .with_stock(self.stock)
    }
}

/// The built-in featured catalog: six products held in memory.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    /// Build the featured catalog priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in products fail validation.
    pub fn new(currency: CurrencyCode) -> Result<Self, CatalogError> {
        let products = FEATURED.iter().map(|p| p.to_product(currency)).collect();
        Ok(Self {
            catalog: Catalog::new(products)?,
        })
    }

    /// Wrap an already validated catalog.
    #[must_use]
    pub const fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl ProductCatalog for StaticCatalog {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use evolution_core::format_currency_default;

    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(CurrencyCode::USD).unwrap()
    }

    #[test]
    fn test_six_featured_products_in_order() {
        let names: Vec<String> = catalog().list_products().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "Laptop HP Pavilion",
                "iPhone 15 Pro",
                "Coffee Maker Deluxe",
                "Running Shoes Pro",
                "Wireless Headphones",
                "Smart Watch",
            ]
        );
    }

    #[test]
    fn test_featured_prices_and_categories() {
        let catalog = catalog();
        let coffee = catalog.find_product(ProductId::new(3)).unwrap();
        assert_eq!(format_currency_default(coffee.price.amount), "$159.99");
        assert_eq!(coffee.primary_category(), Some("Home"));
        assert_eq!(coffee.slug, "coffee-maker-deluxe");

        let shoes = catalog.find_product(ProductId::new(4)).unwrap();
        assert_eq!(shoes.primary_category(), Some("Sports"));
    }

    #[test]
    fn test_every_product_has_one_image() {
        for product in catalog().list_products() {
            assert_eq!(product.images.len(), 1, "{}", product.name);
            assert!(product.images.first().unwrap().url.starts_with("https://via.placeholder.com/"));
            assert!(product.is_active);
        }
    }

    #[test]
    fn test_unknown_product() {
        assert!(catalog().find_product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_priced_in_requested_currency() {
        let catalog = StaticCatalog::new(CurrencyCode::EUR).unwrap();
        assert!(
            catalog
                .list_products()
                .iter()
                .all(|p| p.price.currency == CurrencyCode::EUR)
        );
    }
}
