//! Typed Identifiers
//!
//! Backend documents are keyed by opaque strings. [`TypedId`] tags those strings with the
//! kind of document they point at so a product id can never be passed where an order id is
//! expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Serialize};

use crate::{categories::Category, orders::Order, products::Product};

/// User marker
#[derive(Debug)]
pub struct User;

/// Product identifier
pub type ProductId = TypedId<Product<'static>>;

/// Category identifier
pub type CategoryId = TypedId<Category>;

/// User identifier
pub type UserId = TypedId<User>;

/// Order identifier
pub type OrderId = TypedId<Order<'static>>;

/// Opaque string identifier tagged with the document type it refers to.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedId<T> {
    value: String,

    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

impl<T> TypedId<T> {
    /// Wrap an identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            marker: PhantomData,
        }
    }

    /// Borrow the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Unwrap into the identifier string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.value, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for TypedId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> AsRef<str> for TypedId<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn ids_compare_by_value() {
        let a = ProductId::from("p1");
        let b = ProductId::new(String::from("p1"));

        assert_eq!(a, b);
        assert!(ProductId::from("a") < ProductId::from("b"));
    }

    #[test]
    fn ids_hash_by_value() {
        let mut set = FxHashSet::default();

        set.insert(UserId::from("u1"));
        set.insert(UserId::from("u1"));

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_and_debug_show_inner_string() {
        let id = OrderId::from("ord-7");

        assert_eq!(id.to_string(), "ord-7");
        assert_eq!(format!("{id:?}"), "\"ord-7\"");
    }

    #[test]
    fn into_string_returns_value() {
        assert_eq!(CategoryId::from("shoes").into_string(), "shoes");
    }
}
