//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::{cart::Quantity, ids::ProductId, pricing::PricingError};

/// A priced, quantity-bound snapshot of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    /// Product the line was taken from
    pub product: ProductId,

    /// Product name at the time the line was taken
    pub name: String,

    /// Unit price at the time the line was taken
    pub unit_price: Money<'a, Currency>,

    /// Number of units
    pub quantity: Quantity,
}

impl<'a> LineItem<'a> {
    /// Create a new line item.
    pub fn new(
        product: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: Quantity,
    ) -> Self {
        Self {
            product: product.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }

    /// Returns the currency of the line.
    pub fn currency(&self) -> &'a Currency {
        self.unit_price.currency()
    }
}
