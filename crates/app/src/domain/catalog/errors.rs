//! Catalog service errors.

use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("storage error")]
    Store(#[from] StoreError),
}
