//! Pricing
//!
//! Derives order totals from line items. Every amount is handled in integer minor units or
//! [`Decimal`]; tax is rounded half away from zero to the smallest currency unit.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Default tax rate applied to the subtotal.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Default flat shipping fee, in minor units.
pub const DEFAULT_SHIPPING_MINOR: i64 = 5_00;

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line item is priced in a different currency to the policy.
    #[error("item {0} has currency {1}, but pricing is in {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A minor unit amount overflowed.
    #[error("amount overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Whether an empty cart still pays the flat shipping fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCartShipping {
    /// Charge the flat fee regardless of cart contents.
    #[default]
    Charge,

    /// Charge nothing when there are no items.
    Waive,
}

/// Tax and shipping settings.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy<'a> {
    tax_rate: Percentage,
    shipping_flat: Money<'a, Currency>,
    empty_cart_shipping: EmptyCartShipping,
}

impl<'a> PricingPolicy<'a> {
    /// Create a policy with the given tax rate and flat shipping fee.
    ///
    /// Pricing happens in the shipping fee's currency.
    pub fn new(tax_rate: Percentage, shipping_flat: Money<'a, Currency>) -> Self {
        Self {
            tax_rate,
            shipping_flat,
            empty_cart_shipping: EmptyCartShipping::default(),
        }
    }

    /// 10% tax and 5.00 flat shipping in the given currency.
    pub fn standard(currency: &'a Currency) -> Self {
        Self::new(
            Percentage::from(DEFAULT_TAX_RATE),
            Money::from_minor(DEFAULT_SHIPPING_MINOR, currency),
        )
    }

    /// Set how shipping is charged on an empty cart.
    #[must_use]
    pub fn with_empty_cart_shipping(mut self, empty_cart_shipping: EmptyCartShipping) -> Self {
        self.empty_cart_shipping = empty_cart_shipping;
        self
    }

    /// Returns the tax rate.
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Returns the flat shipping fee.
    pub fn shipping_flat(&self) -> Money<'a, Currency> {
        self.shipping_flat
    }

    /// Returns the empty cart shipping rule.
    pub fn empty_cart_shipping(&self) -> EmptyCartShipping {
        self.empty_cart_shipping
    }

    /// Returns the currency prices are calculated in.
    pub fn currency(&self) -> &'a Currency {
        self.shipping_flat.currency()
    }
}

/// Totals derived from a set of line items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of line totals
    pub subtotal: Money<'a, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'a, Currency>,

    /// Shipping fee
    pub shipping: Money<'a, Currency>,

    /// Subtotal plus tax plus shipping
    pub total: Money<'a, Currency>,
}

/// Calculate subtotal, tax, shipping and total for a set of line items.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: an item is not priced in the policy currency.
/// - [`PricingError::Overflow`]: a line total or the subtotal overflowed.
/// - [`PricingError::PercentConversion`]: tax could not be represented in minor units.
/// - [`PricingError::Money`]: wrapped money arithmetic error.
pub fn price_items<'a>(
    items: &[LineItem<'a>],
    policy: &PricingPolicy<'a>,
) -> Result<OrderTotals<'a>, PricingError> {
    let currency = policy.currency();
    let subtotal = subtotal(items, currency)?;

    let tax = Money::from_minor(
        percent_of_minor(&policy.tax_rate, subtotal.to_minor_units())?,
        currency,
    );

    let shipping = match policy.empty_cart_shipping {
        EmptyCartShipping::Waive if items.is_empty() => Money::from_minor(0, currency),
        EmptyCartShipping::Charge | EmptyCartShipping::Waive => policy.shipping_flat,
    };

    let total = subtotal.add(tax)?.add(shipping)?;

    Ok(OrderTotals {
        subtotal,
        tax,
        shipping,
        total,
    })
}

/// Sum the line totals of `items`. An empty slice sums to zero.
///
/// # Errors
///
/// Returns an error if an item is in another currency or the sum overflows.
pub fn subtotal<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = items
        .iter()
        .enumerate()
        .try_fold(0_i64, |acc, (idx, item)| {
            if item.currency() != currency {
                return Err(PricingError::CurrencyMismatch(
                    idx,
                    item.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            acc.checked_add(item.line_total()?.to_minor_units())
                .ok_or(PricingError::Overflow)
        })?;

    Ok(Money::from_minor(minor, currency))
}

/// Calculate `percent` of a minor unit amount, rounded to a whole minor unit.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}
