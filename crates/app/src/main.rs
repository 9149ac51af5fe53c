//! Storefront Application CLI

use std::{error::Error, process};

use clap::Parser;
use storefront_app::cli::Cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");

        let mut source = error.source();

        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }

        process::exit(1);
    }
}
