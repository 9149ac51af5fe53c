//! Cart Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::{
    cart::{CartEntry, Quantity},
    ids::ProductId,
};

/// Stored form of one cart entry. The document id is the product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntryRecord {
    pub quantity: Quantity,
    pub added_at: Timestamp,
}

impl CartEntryRecord {
    pub fn from_entry(entry: &CartEntry) -> Self {
        Self {
            quantity: entry.quantity,
            added_at: entry.added_at,
        }
    }

    pub fn into_entry(self, product: impl Into<ProductId>) -> CartEntry {
        CartEntry::new(product, self.quantity, self.added_at)
    }
}
