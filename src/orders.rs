//! Orders

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    aggregate::{CartLine, line_items},
    ids::{OrderId, UserId},
    items::LineItem,
    pricing::{OrderTotals, PricingError, PricingPolicy, price_items, subtotal},
};

/// Reasons an order draft cannot be submitted.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The shipping address has no street.
    #[error("shipping address street is required")]
    MissingStreet,

    /// No payment method was chosen.
    #[error("payment method is required")]
    MissingPaymentMethod,

    /// The order has no line items.
    #[error("order has no items")]
    NoItems,

    /// The subtotal does not equal the sum of the line totals.
    #[error("subtotal {recorded} does not match line totals {expected}")]
    SubtotalMismatch {
        /// Subtotal on the draft, in minor units
        recorded: i64,
        /// Sum of the line totals, in minor units
        expected: i64,
    },

    /// The total does not equal subtotal plus tax plus shipping.
    #[error("total {recorded} does not match subtotal + tax + shipping {expected}")]
    TotalMismatch {
        /// Total on the draft, in minor units
        recorded: i64,
        /// Subtotal plus tax plus shipping, in minor units
        expected: i64,
    },

    /// Line totals could not be recomputed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Postal address an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street and number
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal code
    pub zip_code: String,

    /// Country
    pub country: String,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, not yet confirmed
    #[default]
    Pending,
    /// Accepted by the store
    Confirmed,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled before delivery
    Cancelled,
}

impl OrderStatus {
    /// Lowercase name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet paid
    #[default]
    Pending,
    /// Payment captured
    Paid,
    /// Payment declined
    Failed,
    /// Payment returned
    Refunded,
}

impl PaymentStatus {
    /// Lowercase name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order that has been priced but not yet submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft<'a> {
    /// Ordering user
    pub user: UserId,

    /// Line item snapshots
    pub items: Vec<LineItem<'a>>,

    /// Totals for `items`
    pub totals: OrderTotals<'a>,

    /// Destination address
    pub shipping_address: Address,

    /// Chosen payment method
    pub payment_method: String,
}

impl<'a> OrderDraft<'a> {
    /// Snapshot aggregated cart lines and price them under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the lines cannot be priced.
    pub fn price(
        user: UserId,
        lines: &[CartLine<'a>],
        policy: &PricingPolicy<'a>,
        shipping_address: Address,
        payment_method: impl Into<String>,
    ) -> Result<Self, PricingError> {
        let items = line_items(lines);
        let totals = price_items(&items, policy)?;

        Ok(Self {
            user,
            items,
            totals,
            shipping_address,
            payment_method: payment_method.into(),
        })
    }

    /// Check the draft is complete and internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shipping_address.street.trim().is_empty() {
            return Err(ValidationError::MissingStreet);
        }

        if self.payment_method.trim().is_empty() {
            return Err(ValidationError::MissingPaymentMethod);
        }

        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        let totals = &self.totals;
        let expected = subtotal(&self.items, totals.subtotal.currency())?;

        if expected != totals.subtotal {
            return Err(ValidationError::SubtotalMismatch {
                recorded: totals.subtotal.to_minor_units(),
                expected: expected.to_minor_units(),
            });
        }

        let expected = totals
            .subtotal
            .add(totals.tax)
            .and_then(|sum| sum.add(totals.shipping))
            .map_err(PricingError::from)?;

        if expected != totals.total {
            return Err(ValidationError::TotalMismatch {
                recorded: totals.total.to_minor_units(),
                expected: expected.to_minor_units(),
            });
        }

        Ok(())
    }

    /// Returns the currency the draft is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.totals.total.currency()
    }
}

/// A submitted order.
///
/// Orders are snapshots: prices are those at submission time, and nothing in this crate
/// changes an order once it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    id: OrderId,
    user: UserId,
    items: Vec<LineItem<'a>>,
    totals: OrderTotals<'a>,
    status: OrderStatus,
    shipping_address: Address,
    payment_method: String,
    payment_status: PaymentStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl<'a> Order<'a> {
    /// Create a pending order from a submitted draft.
    pub fn from_draft(id: OrderId, draft: OrderDraft<'a>, created_at: Timestamp) -> Self {
        Self {
            id,
            user: draft.user,
            items: draft.items,
            totals: draft.totals,
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            payment_status: PaymentStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    /// Rebuild an order from stored parts.
    #[expect(clippy::too_many_arguments, reason = "mirrors the stored document")]
    pub fn restore(
        id: OrderId,
        user: UserId,
        items: Vec<LineItem<'a>>,
        totals: OrderTotals<'a>,
        status: OrderStatus,
        shipping_address: Address,
        payment_method: String,
        payment_status: PaymentStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user,
            items,
            totals,
            status,
            shipping_address,
            payment_method,
            payment_status,
            created_at,
            updated_at,
        }
    }

    /// Order identifier
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Ordering user
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Line item snapshots
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Totals at submission time
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Shortcut for the order total
    pub fn total(&self) -> Money<'a, Currency> {
        self.totals.total
    }

    /// Fulfilment status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Destination address
    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Chosen payment method
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    /// Payment status
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Creation time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update time
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{cart::Quantity, products::Product};

    use super::*;

    fn address() -> Address {
        Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
        }
    }

    fn draft() -> TestResult<OrderDraft<'static>> {
        let lines = [CartLine {
            product: Product::new("p1", "Lamp", Money::from_minor(10_00, USD)),
            entry: crate::cart::CartEntry::new(
                "p1",
                Quantity::new(2).ok_or("zero quantity")?,
                Timestamp::UNIX_EPOCH,
            ),
        }];

        Ok(OrderDraft::price(
            UserId::from("u1"),
            &lines,
            &PricingPolicy::standard(USD),
            address(),
            "card",
        )?)
    }

    #[test]
    fn priced_draft_is_valid() -> TestResult {
        let draft = draft()?;

        draft.validate()?;

        assert_eq!(draft.totals.total, Money::from_minor(27_00, USD));

        Ok(())
    }

    #[test]
    fn blank_street_is_rejected() -> TestResult {
        let mut draft = draft()?;
        draft.shipping_address.street = "   ".to_string();

        assert_eq!(draft.validate(), Err(ValidationError::MissingStreet));

        Ok(())
    }

    #[test]
    fn blank_payment_method_is_rejected() -> TestResult {
        let mut draft = draft()?;
        draft.payment_method = String::new();

        assert_eq!(draft.validate(), Err(ValidationError::MissingPaymentMethod));

        Ok(())
    }

    #[test]
    fn empty_order_is_rejected() -> TestResult {
        let draft = OrderDraft::price(
            UserId::from("u1"),
            &[],
            &PricingPolicy::standard(USD),
            address(),
            "card",
        )?;

        assert_eq!(draft.validate(), Err(ValidationError::NoItems));

        Ok(())
    }

    #[test]
    fn tampered_subtotal_is_rejected() -> TestResult {
        let mut draft = draft()?;
        draft.totals.subtotal = Money::from_minor(1_00, USD);

        assert_eq!(
            draft.validate(),
            Err(ValidationError::SubtotalMismatch {
                recorded: 1_00,
                expected: 20_00,
            })
        );

        Ok(())
    }

    #[test]
    fn tampered_total_is_rejected() -> TestResult {
        let mut draft = draft()?;
        draft.totals.total = Money::from_minor(1_00, USD);

        assert_eq!(
            draft.validate(),
            Err(ValidationError::TotalMismatch {
                recorded: 1_00,
                expected: 27_00,
            })
        );

        Ok(())
    }

    #[test]
    fn order_from_draft_is_pending() -> TestResult {
        let created_at = Timestamp::from_second(1_700_000_000)?;
        let order = Order::from_draft(OrderId::from("o1"), draft()?, created_at);

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
        assert_eq!(order.created_at(), order.updated_at());
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total(), Money::from_minor(27_00, USD));

        Ok(())
    }

    #[test]
    fn statuses_render_lowercase() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(PaymentStatus::Refunded.to_string(), "refunded");
    }
}
