//! Orders service errors.

use storefront::orders::ValidationError;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order is invalid")]
    Validation(#[from] ValidationError),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("storage error")]
    Store(#[from] StoreError),
}
