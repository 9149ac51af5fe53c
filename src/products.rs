//! Products

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::ids::{CategoryId, ProductId};

/// Catalog product.
///
/// Products are read-only from the point of view of carts and orders: an order copies the
/// fields it needs into its line items rather than referring back to the product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Current unit price
    pub price: Money<'a, Currency>,

    /// Price before any sale, if the product is on sale
    pub original_price: Option<Money<'a, Currency>>,

    /// Image references
    pub images: SmallVec<[String; 4]>,

    /// Category the product is listed under
    pub category: CategoryId,

    /// Brand name
    pub brand: String,

    /// Units in stock
    pub stock_quantity: u32,

    /// Whether the product is currently sold
    pub active: bool,

    /// Free-form tags
    pub tags: SmallVec<[String; 4]>,
}

impl<'a> Product<'a> {
    /// Create an active product with the given id, name and price and empty details.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            images: SmallVec::new(),
            category: CategoryId::from(""),
            brand: String::new(),
            stock_quantity: 0,
            active: true,
            tags: SmallVec::new(),
        }
    }

    /// Whether the product can be put into an order.
    pub fn is_available(&self) -> bool {
        self.active
    }

    /// Returns the currency the product is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.price.currency()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    #[test]
    fn new_product_is_available() {
        let product = Product::new("p1", "Kettle", Money::from_minor(24_99, USD));

        assert!(product.is_available());
        assert_eq!(product.id, ProductId::from("p1"));
        assert_eq!(product.currency(), USD);
    }

    #[test]
    fn inactive_product_is_unavailable() {
        let mut product = Product::new("p1", "Kettle", Money::from_minor(24_99, USD));
        product.active = false;

        assert!(!product.is_available());
    }
}
