//! Checkout Data

use storefront::{
    aggregate::CartLine, items::LineItem, orders::Address, pricing::OrderTotals,
};

/// What the customer supplies at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub shipping_address: Address,
    pub payment_method: String,
}

/// The signed-in user's cart, resolved and priced.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<CartLine<'static>>,
    pub items: Vec<LineItem<'static>>,
    pub totals: OrderTotals<'static>,
}
