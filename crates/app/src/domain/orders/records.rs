//! Order Records

use jiff::Timestamp;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use storefront::{
    cart::Quantity,
    ids::{OrderId, UserId},
    items::LineItem,
    orders::{Address, Order, OrderDraft, OrderStatus, PaymentStatus},
    pricing::OrderTotals,
};

use crate::domain::orders::errors::OrdersServiceError;

/// Stored form of an order. Amounts are minor units of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub user: String,
    pub items: Vec<LineItemRecord>,
    pub currency: String,
    pub subtotal: i64,
    pub tax: i64,
    pub shipping: i64,
    pub total: i64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRecord {
    pub product: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: Quantity,
}

impl OrderRecord {
    /// A new pending order for `draft`.
    pub fn from_draft(draft: &OrderDraft<'_>, created_at: Timestamp) -> Self {
        let totals = &draft.totals;

        Self {
            user: draft.user.to_string(),
            items: draft
                .items
                .iter()
                .map(|item| LineItemRecord {
                    product: item.product.to_string(),
                    name: item.name.clone(),
                    unit_price: item.unit_price.to_minor_units(),
                    quantity: item.quantity,
                })
                .collect(),
            currency: draft.currency().iso_alpha_code.to_string(),
            subtotal: totals.subtotal.to_minor_units(),
            tax: totals.tax.to_minor_units(),
            shipping: totals.shipping.to_minor_units(),
            total: totals.total.to_minor_units(),
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address.clone(),
            payment_method: draft.payment_method.clone(),
            payment_status: PaymentStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    /// Rebuild the order stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] when the currency code is unknown.
    pub fn into_order(self, id: OrderId) -> Result<Order<'static>, OrdersServiceError> {
        let currency = iso::find(&self.currency).ok_or_else(|| {
            OrdersServiceError::InvalidData(format!("unknown currency {}", self.currency))
        })?;

        let money = |minor: i64| -> Money<'static, Currency> { Money::from_minor(minor, currency) };

        let items = self
            .items
            .into_iter()
            .map(|item| LineItem::new(item.product, item.name, money(item.unit_price), item.quantity))
            .collect();

        let totals = OrderTotals {
            subtotal: money(self.subtotal),
            tax: money(self.tax),
            shipping: money(self.shipping),
            total: money(self.total),
        };

        Ok(Order::restore(
            id,
            UserId::from(self.user),
            items,
            totals,
            self.status,
            self.shipping_address,
            self.payment_method,
            self.payment_status,
            self.created_at,
            self.updated_at,
        ))
    }
}
