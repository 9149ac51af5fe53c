//! App Context

use std::sync::Arc;

use storefront::{fixtures::Catalog, pricing::PricingPolicy};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{CartsService, DocumentCartsService},
        catalog::{CatalogService, CatalogServiceError, DocumentCatalogService},
        checkout::{CheckoutService, StoreCheckoutService},
        orders::{DocumentOrdersService, OrdersService},
    },
    identity::SessionIdentity,
};

#[derive(Clone)]
pub struct AppContext {
    pub identity: Arc<SessionIdentity>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Wire the services over a document store.
    #[must_use]
    pub fn new(db: &Db, policy: PricingPolicy<'static>) -> Self {
        let identity = Arc::new(SessionIdentity::new());
        let catalog: Arc<dyn CatalogService> = Arc::new(DocumentCatalogService::new(db.clone()));
        let carts: Arc<dyn CartsService> = Arc::new(DocumentCartsService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(DocumentOrdersService::new(db.clone()));

        let checkout = Arc::new(StoreCheckoutService::new(
            identity.clone(),
            catalog.clone(),
            carts.clone(),
            orders.clone(),
            policy,
        ));

        Self {
            identity,
            catalog,
            carts,
            orders,
            checkout,
        }
    }

    /// Load every category and product of a catalog into the store.
    ///
    /// # Errors
    ///
    /// Returns an error when a write fails.
    pub async fn seed(&self, catalog: &Catalog) -> Result<(), CatalogServiceError> {
        for category in &catalog.categories {
            self.catalog.put_category(category.clone()).await?;
        }

        for product in &catalog.products {
            self.catalog.put_product(product.clone()).await?;
        }

        info!(
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            "seeded catalog"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use storefront::ids::ProductId;
    use testresult::TestResult;

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

    #[tokio::test]
    async fn seed_makes_fixture_products_available() -> TestResult {
        let ctx = AppContext::new(&Db::new(), PricingPolicy::standard(USD));

        ctx.seed(&Catalog::from_yaml(CATALOG)?).await?;

        let lamp = ctx.catalog.get_product(&ProductId::from("lamp")).await?;

        assert_eq!(lamp.name, "Desk Lamp");
        assert_eq!(ctx.catalog.list_categories().await?.len(), 1);

        Ok(())
    }
}
