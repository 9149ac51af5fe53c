//! Cart

use std::num::NonZeroU32;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised while changing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity does not fit in a cart entry.
    #[error("quantity {0} is too large")]
    QuantityOverflow(i64),
}

/// A strictly positive number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Number of units.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add `other` units, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("quantity must be positive")
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.get()
    }
}

/// What to do with a cart entry after a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// Store the entry with this quantity.
    Set(Quantity),

    /// Drop the entry.
    Remove,
}

impl QuantityUpdate {
    /// Interpret a requested quantity. Anything at or below zero removes the entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] when the quantity exceeds `u32::MAX`.
    pub fn from_requested(requested: i64) -> Result<Self, CartError> {
        if requested <= 0 {
            return Ok(Self::Remove);
        }

        let value = u32::try_from(requested).map_err(|_err| CartError::QuantityOverflow(requested))?;

        Ok(Quantity::new(value).map_or(Self::Remove, Self::Set))
    }
}

/// One product in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    /// Product in the cart
    pub product: ProductId,

    /// Number of units
    pub quantity: Quantity,

    /// When the product was first put into the cart
    pub added_at: Timestamp,
}

impl CartEntry {
    /// Create a new cart entry.
    pub fn new(product: impl Into<ProductId>, quantity: Quantity, added_at: Timestamp) -> Self {
        Self {
            product: product.into(),
            quantity,
            added_at,
        }
    }
}

/// A user's cart, keyed by product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: FxHashMap<ProductId, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from entries. A later entry for the same product replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.product.clone(), entry))
                .collect(),
        }
    }

    /// Apply a quantity update to the entry for `product`.
    ///
    /// Setting the quantity of an existing entry keeps its original `added_at`.
    pub fn apply(&mut self, product: &ProductId, update: QuantityUpdate, now: Timestamp) {
        match update {
            QuantityUpdate::Set(quantity) => {
                self.entries
                    .entry(product.clone())
                    .and_modify(|entry| entry.quantity = quantity)
                    .or_insert_with(|| CartEntry::new(product.clone(), quantity, now));
            }
            QuantityUpdate::Remove => {
                self.entries.remove(product);
            }
        }
    }

    /// Get the entry for a product.
    pub fn get(&self, product: &ProductId) -> Option<&CartEntry> {
        self.entries.get(product)
    }

    /// Iterate over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
