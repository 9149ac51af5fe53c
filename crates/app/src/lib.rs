//! Storefront application: document store, services and the checkout pipeline.

pub mod cli;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod identity;
pub mod observability;

#[cfg(test)]
mod test;
