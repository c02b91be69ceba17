//! # Product Types
//!
//! Product catalog types for basket-cart.
//! Products are loaded from `config/products.toml`; the same file is
//! embedded at build time as the fallback catalog.

use crate::error::{CartError, CartResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use std::sync::Arc;

/// Catalog seed shipped with the repository
pub const BUILTIN_CATALOG_TOML: &str = include_str!("../../../config/products.toml");

/// Stable product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl ProductId {
    /// Parse an id from control attribute text (`data-id="2"`).
    /// Returns `None` for anything that is not a plain integer.
    pub fn parse_attr(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(ProductId)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

/// Largest decimal amount whose cent value fits in `u64`
const MAX_DECIMAL: f64 = (u64::MAX / 100) as f64;

/// Tolerance for float noise when checking for whole cents
const CENT_EPSILON: f64 = 1e-6;

/// Non-negative price in whole cents (USD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price {
    /// Amount in cents
    pub amount: u64,
}

impl Price {
    pub const ZERO: Price = Price { amount: 0 };

    /// Create a price from a decimal amount. The amount must be a whole
    /// number of cents; sub-cent amounts are rejected, never rounded.
    pub fn new(amount: f64) -> CartResult<Self> {
        if !amount.is_finite() {
            return Err(CartError::InvalidPrice {
                message: format!("{} is not a finite amount", amount),
            });
        }
        if amount < 0.0 {
            return Err(CartError::InvalidPrice {
                message: format!("{} is negative", amount),
            });
        }
        if amount > MAX_DECIMAL {
            return Err(CartError::InvalidPrice {
                message: format!("{} is too large", amount),
            });
        }
        let cents = amount * 100.0;
        let whole = cents.round();
        if (cents - whole).abs() > CENT_EPSILON {
            return Err(CartError::InvalidPrice {
                message: format!("{} is not a whole number of cents", amount),
            });
        }
        Ok(Self {
            amount: whole as u64,
        })
    }

    /// Create a price from cents
    pub fn from_cents(amount: u64) -> Self {
        Self { amount }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.amount as f64 / 100.0
    }

    /// Price of `quantity` units
    pub fn times(&self, quantity: u32) -> Price {
        Price {
            amount: self.amount.saturating_mul(quantity as u64),
        }
    }

    /// Format for display (e.g., "$ 170.00")
    pub fn display(&self) -> String {
        format!("$ {}.{:02}", self.amount / 100, self.amount % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<f64> for Price {
    type Error = CartError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::new(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_decimal()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price {
            amount: self.amount.saturating_add(rhs.amount),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

/// A product in the catalog. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Card text, defaults to "This is a {name}"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Card image, defaults to `/assets/{name}.png` (lowercased)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            description: None,
            image_url: None,
        }
    }

    pub fn description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("This is a {}", self.name))
    }

    pub fn image_url(&self) -> String {
        self.image_url
            .clone()
            .unwrap_or_else(|| format!("/assets/{}.png", self.name.to_lowercase()))
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Ordered product catalog. Owns the products; carts hold `Arc` handles.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Arc<Product>>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product. Ids must be unique.
    pub fn add(&mut self, product: Product) -> CartResult<Arc<Product>> {
        if self.get(product.id).is_some() {
            return Err(CartError::DuplicateProduct {
                product_id: product.id.0,
            });
        }
        let product = Arc::new(product);
        self.products.push(Arc::clone(&product));
        Ok(product)
    }

    /// Find a product by ID
    pub fn get(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Product at catalog position (page "add" controls are wired by index)
    pub fn get_index(&self, index: usize) -> Option<&Arc<Product>> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> CartResult<Self> {
        let file: CatalogFile = toml::from_str(toml_str)?;
        let mut catalog = Self::new();
        for product in file.products {
            catalog.add(product)?;
        }
        tracing::info!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Catalog embedded from `config/products.toml`
    pub fn builtin() -> CartResult<Self> {
        Self::from_toml(BUILTIN_CATALOG_TOML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::new(10.99).unwrap().amount, 1099);
        assert_eq!(Price::new(100.0).unwrap().amount, 10000);
        assert_eq!(Price::new(0.0).unwrap(), Price::ZERO);
        assert!(Price::new(-1.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_price_rejects_sub_cent_amounts() {
        assert!(matches!(
            Price::new(0.004),
            Err(CartError::InvalidPrice { .. })
        ));
        assert!(Price::new(19.999).is_err());
        assert_eq!(Price::new(0.01).unwrap().amount, 1);

        let catalog = ProductCatalog::from_toml(
            r#"
            [[products]]
            id = 1
            name = "Pin"
            price = 0.004
            "#,
        );
        assert!(matches!(catalog, Err(CartError::Catalog(_))));
    }

    #[test]
    fn test_price_rejects_amounts_beyond_u64_cents() {
        assert!(matches!(
            Price::new(1e20),
            Err(CartError::InvalidPrice { .. })
        ));
        assert!(Price::new(f64::MAX).is_err());
        assert!(Price::new(1_000_000.0).is_ok());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(17000).display(), "$ 170.00");
        assert_eq!(Price::from_cents(5).display(), "$ 0.05");
        assert_eq!(Price::ZERO.to_string(), "$ 0.00");
    }

    #[test]
    fn test_price_arithmetic() {
        let socks = Price::from_cents(2000);
        assert_eq!(socks.times(3), Price::from_cents(6000));
        assert_eq!(socks.times(0), Price::ZERO);
        let total: Price = vec![socks, Price::from_cents(10000)].into_iter().sum();
        assert_eq!(total.amount, 12000);
    }

    #[test]
    fn test_product_id_parse_attr() {
        assert_eq!(ProductId::parse_attr("2"), Some(ProductId(2)));
        assert_eq!(ProductId::parse_attr(" 3 "), Some(ProductId(3)));
        assert_eq!(ProductId::parse_attr(""), None);
        assert_eq!(ProductId::parse_attr("abc"), None);
        assert_eq!(ProductId::parse_attr("-1"), None);
    }

    #[test]
    fn test_product_defaults() {
        let product = Product::new(1, "Baskets", Price::from_cents(10000));
        assert_eq!(product.description(), "This is a Baskets");
        assert_eq!(product.image_url(), "/assets/baskets.png");

    }

    #[test]
    fn test_product_card_fields_from_toml() {
        let catalog = ProductCatalog::from_toml(
            r#"
            [[products]]
            id = 1
            name = "Baskets"
            price = 100.0
            description = "Running shoes"
            image_url = "/img/b.webp"
            "#,
        )
        .unwrap();

        let product = catalog.get(ProductId(1)).unwrap();
        assert_eq!(product.description(), "Running shoes");
        assert_eq!(product.image_url(), "/img/b.webp");
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = ProductCatalog::from_toml(
            r#"
            [[products]]
            id = 7
            name = "Hat"
            price = 12.5

            [[products]]
            id = 8
            name = "Scarf"
            price = 30
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId(7)).unwrap().price.amount, 1250);
        assert_eq!(catalog.get_index(1).unwrap().name, "Scarf");
        assert!(catalog.get(ProductId(9)).is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates_and_negative_prices() {
        let dup = ProductCatalog::from_toml(
            r#"
            [[products]]
            id = 1
            name = "A"
            price = 1.0

            [[products]]
            id = 1
            name = "B"
            price = 2.0
            "#,
        );
        assert!(matches!(dup, Err(CartError::DuplicateProduct { product_id: 1 })));

        let negative = ProductCatalog::from_toml(
            r#"
            [[products]]
            id = 1
            name = "A"
            price = -5.0
            "#,
        );
        assert!(matches!(negative, Err(CartError::Catalog(_))));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = ProductCatalog::builtin().unwrap();
        let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Baskets", "Socks", "Bag"]);
        assert_eq!(catalog.get(ProductId(2)).unwrap().price, Price::from_cents(2000));
    }
}
