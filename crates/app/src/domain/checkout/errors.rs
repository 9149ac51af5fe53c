//! Checkout errors.

use storefront::{orders::ValidationError, pricing::PricingError};
use thiserror::Error;

use crate::{
    database::StoreError,
    domain::{
        carts::CartsServiceError, catalog::CatalogServiceError, orders::OrdersServiceError,
    },
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("order is invalid")]
    Validation(#[from] ValidationError),

    #[error("order could not be priced")]
    Pricing(#[from] PricingError),

    #[error("catalog lookup failed")]
    Catalog(#[from] CatalogServiceError),

    #[error("cart lookup failed")]
    Carts(#[from] CartsServiceError),

    #[error("order submission failed")]
    Orders(#[from] OrdersServiceError),
}

impl CheckoutError {
    /// The underlying store failure, if this error came from one.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Catalog(CatalogServiceError::Store(error))
            | Self::Carts(CartsServiceError::Store(error))
            | Self::Orders(OrdersServiceError::Store(error)) => Some(error),
            _ => None,
        }
    }
}
