//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Catalog source settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// YAML catalog loaded into the store at startup
    #[arg(long, env = "CATALOG_PATH", default_value = "fixtures/catalog.yml", global = true)]
    pub catalog: PathBuf,
}
