//! Command line interface.
//!
//! Every command runs against a fresh in-memory store seeded from the catalog fixture.

use std::io;

use clap::{Parser, Subcommand};
use storefront::{
    fixtures::{Catalog, FixtureError},
    receipt::ReceiptError,
};
use thiserror::Error;

use crate::{
    config::{AppConfig, ConfigError},
    context::AppContext,
    database::Db,
    domain::{
        carts::CartsServiceError, catalog::CatalogServiceError, checkout::CheckoutError,
        orders::OrdersServiceError,
    },
    observability::{self, ObservabilityError},
};

mod catalog;
mod checkout;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("failed to load catalog")]
    Fixture(#[from] FixtureError),

    #[error("failed to initialise logging")]
    Observability(#[from] ObservabilityError),

    #[error("catalog error")]
    Catalog(#[from] CatalogServiceError),

    #[error("cart error")]
    Carts(#[from] CartsServiceError),

    #[error("checkout failed")]
    Checkout(#[from] CheckoutError),

    #[error("order lookup failed")]
    Orders(#[from] OrdersServiceError),

    #[error("failed to print receipt")]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(catalog::CatalogArgs),

    /// Fill a cart, then quote it or place it as an order
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    /// Run the command, writing its output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration, the catalog fixture or the command itself fails.
    pub async fn run(self) -> Result<(), CliError> {
        observability::init_subscriber(&self.config.logging)?;

        let catalog = Catalog::load(&self.config.store.catalog)?;
        let policy = self.config.pricing.policy(catalog.currency)?;

        let ctx = AppContext::new(&Db::new(), policy);

        ctx.seed(&catalog).await?;

        let out = io::stdout();

        match self.command {
            Commands::Catalog(args) => catalog::run(&ctx, args, out).await,
            Commands::Checkout(args) => checkout::run(&ctx, args, out).await,
        }
    }
}
