//! Catalog Fixtures
//!
//! Loads a catalog of categories and products from YAML, e.g.
//!
//! ```yaml
//! currency: USD
//! categories:
//!   kitchen:
//!     name: Kitchen
//! products:
//!   kettle:
//!     name: Electric Kettle
//!     price: "24.99 USD"
//!     category: kitchen
//! ```

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{categories::Category, ids::CategoryId, products::Product};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between a product and the catalog
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product refers to a category that is not defined
    #[error("Product {product} refers to unknown category {category}")]
    UnknownCategory {
        /// Product key
        product: String,
        /// Category key
        category: String,
    },
}

/// Catalog file layout.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code every price is in
    pub currency: String,

    /// Map of category key -> category fixture
    #[serde(default)]
    pub categories: FxHashMap<String, CategoryFixture>,

    /// Map of product key -> product fixture
    #[serde(default)]
    pub products: FxHashMap<String, ProductFixture>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional parent category key
    #[serde(default)]
    pub parent: Option<String>,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Whether the category is shown
    #[serde(default = "active_default")]
    pub active: bool,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "24.99 USD")
    pub price: String,

    /// Pre-sale price, if on sale
    #[serde(default)]
    pub original_price: Option<String>,

    /// Category key
    pub category: String,

    /// Brand name
    #[serde(default)]
    pub brand: String,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Product tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the product is sold
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

/// A parsed catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog currency
    pub currency: &'static Currency,

    /// Categories, ordered by id
    pub categories: Vec<Category>,

    /// Products, ordered by id
    pub products: Vec<Product<'static>>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, a price cannot be parsed, a product is in
    /// another currency, or a product refers to an unknown category.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        fixture.try_into()
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let currency = find_currency(&fixture.currency)?;

        let mut categories: Vec<Category> = fixture
            .categories
            .into_iter()
            .map(|(key, category)| Category {
                id: CategoryId::from(key),
                name: category.name,
                description: category.description,
                parent: category.parent.map(CategoryId::from),
                image: category.image,
                active: category.active,
            })
            .collect();

        categories.sort_by(|a, b| a.id.cmp(&b.id));

        let mut products = Vec::with_capacity(fixture.products.len());

        for (key, product) in fixture.products {
            if !categories.iter().any(|c| c.id.as_str() == product.category) {
                return Err(FixtureError::UnknownCategory {
                    product: key,
                    category: product.category,
                });
            }

            products.push(product_from_fixture(key, product, currency)?);
        }

        products.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Catalog {
            currency,
            categories,
            products,
        })
    }
}

fn product_from_fixture(
    key: String,
    fixture: ProductFixture,
    currency: &'static Currency,
) -> Result<Product<'static>, FixtureError> {
    let price = parse_money(&fixture.price, currency)?;
    let original_price = fixture
        .original_price
        .as_deref()
        .map(|price| parse_money(price, currency))
        .transpose()?;

    Ok(Product {
        id: key.into(),
        name: fixture.name,
        description: fixture.description,
        price,
        original_price,
        images: SmallVec::from_vec(fixture.images),
        category: CategoryId::from(fixture.category),
        brand: fixture.brand,
        stock_quantity: fixture.stock,
        active: fixture.active,
        tags: SmallVec::from_vec(fixture.tags),
    })
}

fn parse_money(s: &str, expected: &'static Currency) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    if currency != expected {
        return Err(FixtureError::CurrencyMismatch(
            expected.iso_alpha_code.to_string(),
            currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

fn find_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = find_currency(code)?;

    // Amounts finer than the currency's minor unit are rejected, never rounded.
    if amount.normalize().scale() > currency.exponent {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    if minor_units < 0 {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    Ok((minor_units, currency))
}
