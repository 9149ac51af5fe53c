//! Storefront
//!
//! Cart aggregation, pricing and order snapshots for a catalog-backed store. Everything in
//! this crate is synchronous and side-effect free; persistence lives in `storefront-app`.

pub mod aggregate;
pub mod cart;
pub mod categories;
pub mod fixtures;
pub mod ids;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
