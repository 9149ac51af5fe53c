use std::io::Write;

use clap::Args;
use storefront::ids::CategoryId;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{cli::CliError, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Only list products in this category
    #[arg(long)]
    category: Option<String>,
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: CatalogArgs,
    mut out: impl Write,
) -> Result<(), CliError> {
    let products = match args.category {
        Some(category) => {
            ctx.catalog
                .list_products_in_category(&CategoryId::from(category))
                .await?
        }
        None => ctx.catalog.list_products().await?,
    };

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Stock", "Active"]);

    for product in &products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            product.price.to_string(),
            product.stock_quantity.to_string(),
            if product.active { "yes" } else { "no" }.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use storefront::{fixtures::Catalog, pricing::PricingPolicy};
    use testresult::TestResult;

    use crate::database::Db;

    use super::*;

    const CATALOG: &str = r#"
currency: USD
categories:
  lighting:
    name: Lighting
  kitchen:
    name: Kitchen
products:
  lamp:
    name: Desk Lamp
    price: "10.00 USD"
    category: lighting
  kettle:
    name: Electric Kettle
    price: "24.99 USD"
    category: kitchen
"#;

    async fn context() -> TestResult<AppContext> {
        let ctx = AppContext::new(&Db::new(), PricingPolicy::standard(USD));

        ctx.seed(&Catalog::from_yaml(CATALOG)?).await?;

        Ok(ctx)
    }

    #[tokio::test]
    async fn lists_every_product() -> TestResult {
        let ctx = context().await?;
        let mut out = Vec::new();

        run(&ctx, CatalogArgs { category: None }, &mut out).await?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Desk Lamp"), "missing lamp:\n{output}");
        assert!(output.contains("Electric Kettle"), "missing kettle:\n{output}");
        assert!(output.contains("24.99"), "missing price:\n{output}");

        Ok(())
    }

    #[tokio::test]
    async fn filters_by_category() -> TestResult {
        let ctx = context().await?;
        let mut out = Vec::new();

        let args = CatalogArgs {
            category: Some("kitchen".to_string()),
        };

        run(&ctx, args, &mut out).await?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Electric Kettle"), "missing kettle:\n{output}");
        assert!(!output.contains("Desk Lamp"), "lamp is not in the kitchen:\n{output}");

        Ok(())
    }
}
