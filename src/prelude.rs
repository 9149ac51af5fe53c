//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    aggregate::{CartLine, ProductResolver, aggregate, catalog_index, line_items},
    cart::{Cart, CartEntry, CartError, Quantity, QuantityUpdate},
    categories::Category,
    fixtures::{Catalog, FixtureError},
    ids::{CategoryId, OrderId, ProductId, TypedId, UserId},
    items::LineItem,
    orders::{Address, Order, OrderDraft, OrderStatus, PaymentStatus, ValidationError},
    pricing::{EmptyCartShipping, OrderTotals, PricingError, PricingPolicy, price_items},
    products::Product,
    receipt::{Receipt, ReceiptError},
};
