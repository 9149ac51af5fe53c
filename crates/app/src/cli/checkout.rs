use std::io::Write;

use clap::Args;
use storefront::{
    ids::{ProductId, UserId},
    orders::Address,
    receipt::Receipt,
};
use tracing::info;

use crate::{cli::CliError, context::AppContext, domain::checkout::data::CheckoutDetails};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// User placing the order
    #[arg(long, env = "STOREFRONT_USER", default_value = "guest")]
    user: String,

    /// Cart entry as PRODUCT=QUANTITY; repeat for more products
    #[arg(long = "item", value_name = "PRODUCT=QUANTITY", value_parser = parse_item)]
    items: Vec<(String, i64)>,

    /// Shipping street
    #[arg(long, default_value = "")]
    street: String,

    /// Shipping city
    #[arg(long, default_value = "")]
    city: String,

    /// Shipping state or region
    #[arg(long, default_value = "")]
    state: String,

    /// Shipping postal code
    #[arg(long, default_value = "")]
    zip_code: String,

    /// Shipping country
    #[arg(long, default_value = "")]
    country: String,

    /// Payment method
    #[arg(long, default_value = "card")]
    payment: String,

    /// Print the quote without placing an order
    #[arg(long)]
    quote_only: bool,
}

fn parse_item(value: &str) -> Result<(String, i64), String> {
    let (product, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT=QUANTITY, got {value}"))?;

    if product.trim().is_empty() {
        return Err(format!("missing product in {value}"));
    }

    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|error| format!("invalid quantity in {value}: {error}"))?;

    Ok((product.trim().to_string(), quantity))
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: CheckoutArgs,
    mut out: impl Write,
) -> Result<(), CliError> {
    let user = UserId::from(args.user);

    ctx.identity.sign_in(user.clone());

    for (product, quantity) in args.items {
        ctx.carts
            .set_quantity(&user, &ProductId::from(product), quantity)
            .await?;
    }

    if args.quote_only {
        let quote = ctx.checkout.quote().await?;

        Receipt::for_quote(quote.items, quote.totals).write_to(&mut out)?;

        return Ok(());
    }

    let details = CheckoutDetails {
        shipping_address: Address {
            street: args.street,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
            country: args.country,
        },
        payment_method: args.payment,
    };

    let id = ctx.checkout.place_order(details).await?;
    let order = ctx.orders.get_order(&id).await?;

    info!(order_id = %id, total = %order.total(), "order placed from cli");

    Receipt::for_order(&order).write_to(&mut out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use storefront::{fixtures::Catalog, pricing::PricingPolicy};
    use testresult::TestResult;

    use crate::{database::Db, domain::checkout::CheckoutError};

    use super::*;

    const CATALOG: &str = r#"
currency: USD
categories:
  lighting:
    name: Lighting
products:
  lamp:
    name: Desk Lamp
    price: "10.00 USD"
    category: lighting
"#;

    async fn context() -> TestResult<AppContext> {
        let ctx = AppContext::new(&Db::new(), PricingPolicy::standard(USD));

        ctx.seed(&Catalog::from_yaml(CATALOG)?).await?;

        Ok(ctx)
    }

    fn args(items: &[(&str, i64)], street: &str, quote_only: bool) -> CheckoutArgs {
        CheckoutArgs {
            user: "u1".to_string(),
            items: items
                .iter()
                .map(|(product, quantity)| ((*product).to_string(), *quantity))
                .collect(),
            street: street.to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
            payment: "card".to_string(),
            quote_only,
        }
    }

    #[test]
    fn parse_item_accepts_product_and_quantity() {
        assert_eq!(parse_item("lamp=2"), Ok(("lamp".to_string(), 2)));
        assert_eq!(parse_item("lamp=-1"), Ok(("lamp".to_string(), -1)));
    }

    #[test]
    fn parse_item_rejects_malformed_values() {
        assert!(parse_item("lamp").is_err());
        assert!(parse_item("=2").is_err());
        assert!(parse_item("lamp=two").is_err());
    }

    #[tokio::test]
    async fn places_order_and_prints_receipt() -> TestResult {
        let ctx = context().await?;
        let mut out = Vec::new();

        run(&ctx, args(&[("lamp", 2)], "1 Main St", false), &mut out).await?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Order "), "missing order id:\n{output}");
        assert!(output.contains("27.00"), "missing total:\n{output}");

        let orders = ctx.orders.list_orders(&UserId::from("u1")).await?;

        assert_eq!(orders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn quote_only_places_no_order() -> TestResult {
        let ctx = context().await?;
        let mut out = Vec::new();

        run(&ctx, args(&[("lamp", 1)], "", true), &mut out).await?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("16.00"), "missing total:\n{output}");
        assert!(ctx.orders.list_orders(&UserId::from("u1")).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn missing_street_fails_validation() -> TestResult {
        let ctx = context().await?;

        let result = run(&ctx, args(&[("lamp", 1)], "", false), Vec::new()).await;

        assert!(
            matches!(result, Err(CliError::Checkout(CheckoutError::Validation(_)))),
            "expected validation failure, got {result:?}"
        );

        Ok(())
    }
}
