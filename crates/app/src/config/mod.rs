//! Application configuration

use clap::Args;

use crate::config::{observability::LoggingConfig, pricing::PricingConfig, store::StoreConfig};

pub mod observability;
pub mod pricing;
pub mod store;

pub use observability::LogFormat;
pub use pricing::{ConfigError, EmptyCartShippingArg};

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tax and shipping settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Catalog source settings.
    #[command(flatten)]
    pub store: StoreConfig,
}
