//! Cart Aggregation
//!
//! Joins a cart against the catalog. Entries whose product can no longer be resolved, or has
//! been deactivated, are dropped: a product can legitimately disappear from the catalog after
//! it was put into a cart.

use rustc_hash::FxHashMap;

use crate::{
    cart::{Cart, CartEntry},
    ids::ProductId,
    items::LineItem,
    products::Product,
};

/// Looks up catalog products by id.
pub trait ProductResolver<'a> {
    /// Returns the product, or `None` if it does not exist.
    fn resolve(&self, product: &ProductId) -> Option<&Product<'a>>;
}

impl<'a, S: std::hash::BuildHasher> ProductResolver<'a>
    for std::collections::HashMap<ProductId, Product<'a>, S>
{
    fn resolve(&self, product: &ProductId) -> Option<&Product<'a>> {
        self.get(product)
    }
}

impl<'a> ProductResolver<'a> for [Product<'a>] {
    fn resolve(&self, product: &ProductId) -> Option<&Product<'a>> {
        self.iter().find(|candidate| &candidate.id == product)
    }
}

/// A cart entry joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// Resolved product
    pub product: Product<'a>,

    /// Cart entry the product was resolved for
    pub entry: CartEntry,
}

impl<'a> CartLine<'a> {
    /// Snapshot the line at the product's current price.
    pub fn line_item(&self) -> LineItem<'a> {
        LineItem::new(
            self.product.id.clone(),
            self.product.name.clone(),
            self.product.price,
            self.entry.quantity,
        )
    }
}

/// Join `cart` against `resolver`.
///
/// Lines come out ordered by when they were added, then by product id, so the same snapshot
/// always aggregates to the same sequence.
pub fn aggregate<'a, R>(cart: &Cart, resolver: &R) -> Vec<CartLine<'a>>
where
    R: ProductResolver<'a> + ?Sized,
{
    let mut lines: Vec<CartLine<'a>> = cart
        .iter()
        .filter_map(|entry| {
            resolver
                .resolve(&entry.product)
                .filter(|product| product.is_available())
                .map(|product| CartLine {
                    product: product.clone(),
                    entry: entry.clone(),
                })
        })
        .collect();

    lines.sort_by(|a, b| {
        a.entry
            .added_at
            .cmp(&b.entry.added_at)
            .then_with(|| a.entry.product.cmp(&b.entry.product))
    });

    lines
}

/// Snapshot every line as a [`LineItem`].
pub fn line_items<'a>(lines: &[CartLine<'a>]) -> Vec<LineItem<'a>> {
    lines.iter().map(CartLine::line_item).collect()
}

/// Index products by id, for use as a [`ProductResolver`].
pub fn catalog_index<'a>(products: impl IntoIterator<Item = Product<'a>>) -> FxHashMap<ProductId, Product<'a>> {
    products
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::cart::Quantity;

    use super::*;

    fn entry(id: &str, quantity: u32, second: i64) -> TestResult<CartEntry> {
        Ok(CartEntry::new(
            id,
            Quantity::new(quantity).ok_or("zero quantity")?,
            Timestamp::from_second(second)?,
        ))
    }

    fn product(id: &str, minor: i64) -> Product<'static> {
        Product::new(id, id.to_uppercase(), Money::from_minor(minor, USD))
    }

    #[test]
    fn unresolved_products_are_dropped() -> TestResult {
        let cart = Cart::from_entries([entry("p1", 1, 1)?, entry("p2", 3, 2)?]);
        let catalog = catalog_index([product("p2", 5_00)]);

        let lines = aggregate(&cart, &catalog);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.product.id.as_str()), Some("p2"));

        Ok(())
    }

    #[test]
    fn inactive_products_are_dropped() -> TestResult {
        let mut retired = product("p1", 1_00);
        retired.active = false;

        let cart = Cart::from_entries([entry("p1", 1, 1)?]);
        let catalog = catalog_index([retired]);

        assert!(aggregate(&cart, &catalog).is_empty());

        Ok(())
    }

    #[test]
    fn empty_cart_aggregates_to_nothing() {
        let catalog = catalog_index([product("p1", 1_00)]);

        assert!(aggregate(&Cart::new(), &catalog).is_empty());
    }

    #[test]
    fn lines_are_ordered_by_added_at_then_id() -> TestResult {
        let cart = Cart::from_entries([entry("c", 1, 2)?, entry("b", 1, 1)?, entry("a", 1, 2)?]);
        let catalog = catalog_index([product("a", 1), product("b", 1), product("c", 1)]);

        let lines = aggregate(&cart, &catalog);
        let ids: Vec<&str> = lines.iter().map(|line| line.product.id.as_str()).collect();

        assert_eq!(ids, ["b", "a", "c"]);

        Ok(())
    }

    #[test]
    fn slice_resolver_finds_products() -> TestResult {
        let products = [product("p1", 2_50)];
        let cart = Cart::from_entries([entry("p1", 2, 1)?]);

        let lines = aggregate(&cart, products.as_slice());
        let items = line_items(&lines);

        assert_eq!(items.len(), 1);
        assert_eq!(
            items.first().map(LineItem::line_total).transpose()?,
            Some(Money::from_minor(5_00, USD))
        );

        Ok(())
    }

    #[test]
    fn aggregation_is_repeatable() -> TestResult {
        let cart = Cart::from_entries([entry("p1", 1, 5)?, entry("p2", 2, 5)?, entry("p3", 1, 1)?]);
        let catalog = catalog_index([product("p1", 1_00), product("p2", 2_00), product("p3", 3_00)]);

        assert_eq!(aggregate(&cart, &catalog), aggregate(&cart, &catalog));

        Ok(())
    }
}
