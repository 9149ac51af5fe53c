//! Catalog Records

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use storefront::{
    categories::Category,
    ids::{CategoryId, ProductId},
    products::Product,
};

use crate::domain::catalog::errors::CatalogServiceError;

/// Stored form of a product. Prices are minor units of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub original_price: Option<i64>,
    pub currency: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub stock_quantity: u32,
    pub active: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProductRecord {
    pub fn from_product(product: &Product<'_>) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_minor_units(),
            original_price: product.original_price.map(|price| price.to_minor_units()),
            currency: product.currency().iso_alpha_code.to_string(),
            images: product.images.to_vec(),
            category: product.category.to_string(),
            brand: product.brand.clone(),
            stock_quantity: product.stock_quantity,
            active: product.active,
            tags: product.tags.to_vec(),
        }
    }

    /// Rebuild the catalog product stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::InvalidData`] when the currency code is unknown.
    pub fn into_product(self, id: ProductId) -> Result<Product<'static>, CatalogServiceError> {
        let currency = iso::find(&self.currency).ok_or_else(|| {
            CatalogServiceError::InvalidData(format!("unknown currency {}", self.currency))
        })?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price: Money::from_minor(self.price, currency),
            original_price: self
                .original_price
                .map(|price| Money::from_minor(price, currency)),
            images: SmallVec::from_vec(self.images),
            category: CategoryId::from(self.category),
            brand: self.brand,
            stock_quantity: self.stock_quantity,
            active: self.active,
            tags: SmallVec::from_vec(self.tags),
        })
    }
}

/// Stored form of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub image: String,
    pub active: bool,
}

impl CategoryRecord {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            parent: category.parent.as_ref().map(ToString::to_string),
            image: category.image.clone(),
            active: category.active,
        }
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
            parent: self.parent.map(CategoryId::from),
            image: self.image,
            active: self.active,
        }
    }
}
