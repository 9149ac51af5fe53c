//! Carts service errors.

use storefront::cart::CartError;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("invalid quantity")]
    InvalidQuantity(#[from] CartError),

    #[error("storage error")]
    Store(#[from] StoreError),
}
