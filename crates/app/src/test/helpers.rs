//! Test Helpers

use rusty_money::{Money, iso::USD};
use storefront::{
    aggregate::CartLine,
    cart::{CartEntry, Quantity},
    ids::UserId,
    orders::{Address, OrderDraft},
    pricing::{PricingError, PricingPolicy},
    products::Product,
};

use crate::domain::checkout::data::CheckoutDetails;

pub(crate) fn address() -> Address {
    Address {
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) fn details() -> CheckoutDetails {
    CheckoutDetails {
        shipping_address: address(),
        payment_method: "card".to_string(),
    }
}

/// One 10.00 lamp under the standard policy: 16.00 in total.
pub(crate) fn lamp_draft(user: &UserId) -> Result<OrderDraft<'static>, PricingError> {
    let lines = [CartLine {
        product: Product::new("lamp", "Desk Lamp", Money::from_minor(10_00, USD)),
        entry: CartEntry::new("lamp", Quantity::ONE, jiff::Timestamp::UNIX_EPOCH),
    }];

    OrderDraft::price(
        user.clone(),
        &lines,
        &PricingPolicy::standard(USD),
        address(),
        "card",
    )
}
