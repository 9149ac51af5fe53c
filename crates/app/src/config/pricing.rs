//! Pricing Config

use clap::Args;
use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use storefront::pricing::{EmptyCartShipping, PricingPolicy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: Decimal },

    #[error("{name} is out of range: {value}")]
    OutOfRange { name: &'static str, value: Decimal },
}

/// Whether an empty cart pays the flat shipping fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EmptyCartShippingArg {
    /// Always charge the flat fee.
    Charge,

    /// Charge nothing for an empty cart.
    Waive,
}

impl From<EmptyCartShippingArg> for EmptyCartShipping {
    fn from(value: EmptyCartShippingArg) -> Self {
        match value {
            EmptyCartShippingArg::Charge => Self::Charge,
            EmptyCartShippingArg::Waive => Self::Waive,
        }
    }
}

/// Tax and shipping settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO currency code; defaults to the catalog's currency
    #[arg(long, env = "STORE_CURRENCY", global = true)]
    pub currency: Option<String>,

    /// Tax rate as a fraction of the subtotal (0.10 is 10%)
    #[arg(long, env = "TAX_RATE", default_value = "0.10", global = true)]
    pub tax_rate: Decimal,

    /// Flat shipping fee in major units
    #[arg(long, env = "SHIPPING_FLAT", default_value = "5.00", global = true)]
    pub shipping_flat: Decimal,

    /// Shipping on an empty cart (charge, waive)
    #[arg(
        long,
        env = "EMPTY_CART_SHIPPING",
        value_enum,
        default_value_t = EmptyCartShippingArg::Charge,
        global = true
    )]
    pub empty_cart_shipping: EmptyCartShippingArg,
}

impl PricingConfig {
    /// Build the pricing policy, falling back to `default_currency` when none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency, a negative rate or fee, or a fee that does
    /// not fit in minor units.
    pub fn policy(
        &self,
        default_currency: &'static Currency,
    ) -> Result<PricingPolicy<'static>, ConfigError> {
        let currency = match &self.currency {
            Some(code) => {
                iso::find(code).ok_or_else(|| ConfigError::UnknownCurrency(code.clone()))?
            }
            None => default_currency,
        };

        if self.tax_rate.is_sign_negative() {
            return Err(ConfigError::Negative {
                name: "tax rate",
                value: self.tax_rate,
            });
        }

        let shipping = to_minor_units("shipping fee", self.shipping_flat, currency)?;

        Ok(PricingPolicy::new(
            Percentage::from(self.tax_rate),
            Money::from_minor(shipping, currency),
        )
        .with_empty_cart_shipping(self.empty_cart_shipping.into()))
    }
}

fn to_minor_units(
    name: &'static str,
    value: Decimal,
    currency: &Currency,
) -> Result<i64, ConfigError> {
    if value.is_sign_negative() {
        return Err(ConfigError::Negative { name, value });
    }

    Decimal::from(10_i64.pow(currency.exponent))
        .checked_mul(value)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or(ConfigError::OutOfRange { name, value })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, JPY, USD};
    use storefront::{items::LineItem, pricing::price_items};
    use testresult::TestResult;

    use super::*;

    fn pricing_config() -> PricingConfig {
        PricingConfig {
            currency: None,
            tax_rate: Decimal::new(10, 2),
            shipping_flat: Decimal::new(500, 2),
            empty_cart_shipping: EmptyCartShippingArg::Charge,
        }
    }

    #[test]
    fn defaults_match_the_standard_policy() -> TestResult {
        let policy = pricing_config().policy(USD)?;
        let standard = PricingPolicy::standard(USD);

        assert_eq!(policy.shipping_flat(), standard.shipping_flat());
        assert_eq!(policy.empty_cart_shipping(), EmptyCartShipping::Charge);

        let items = [LineItem::new(
            "lamp",
            "Lamp",
            Money::from_minor(10_00, USD),
            storefront::cart::Quantity::ONE,
        )];

        assert_eq!(price_items(&items, &policy)?, price_items(&items, &standard)?);

        Ok(())
    }

    #[test]
    fn configured_currency_overrides_default() -> TestResult {
        let mut config = pricing_config();
        config.currency = Some("EUR".to_string());

        assert_eq!(config.policy(USD)?.currency(), EUR);

        Ok(())
    }

    #[test]
    fn shipping_uses_the_currency_exponent() -> TestResult {
        let mut config = pricing_config();
        config.shipping_flat = Decimal::new(500, 0);

        assert_eq!(config.policy(JPY)?.shipping_flat(), Money::from_minor(500, JPY));

        Ok(())
    }

    #[test]
    fn waive_is_carried_into_the_policy() -> TestResult {
        let mut config = pricing_config();
        config.empty_cart_shipping = EmptyCartShippingArg::Waive;

        assert_eq!(config.policy(USD)?.empty_cart_shipping(), EmptyCartShipping::Waive);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let mut config = pricing_config();
        config.currency = Some("XYZ".to_string());

        assert!(matches!(config.policy(USD), Err(ConfigError::UnknownCurrency(_))));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut config = pricing_config();
        config.shipping_flat = Decimal::new(-1, 0);

        assert!(matches!(config.policy(USD), Err(ConfigError::Negative { .. })));

        let mut config = pricing_config();
        config.tax_rate = Decimal::new(-5, 2);

        assert!(matches!(config.policy(USD), Err(ConfigError::Negative { .. })));
    }
}
