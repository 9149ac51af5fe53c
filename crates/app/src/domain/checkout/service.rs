//! Checkout service.
//!
//! Resolves the signed-in user's cart against the catalog, prices it and submits it as an
//! order. The cart itself is never modified here, whatever the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use storefront::{
    aggregate::{CartLine, aggregate, line_items},
    ids::{OrderId, UserId},
    orders::OrderDraft,
    pricing::{PricingPolicy, price_items},
};
use tracing::{debug, info};

use crate::{
    domain::{
        carts::CartsService,
        catalog::{CatalogService, CatalogServiceError},
        checkout::{
            data::{CheckoutDetails, Quote},
            errors::CheckoutError,
        },
        orders::OrdersService,
    },
    identity::Identity,
};

pub struct StoreCheckoutService {
    identity: Arc<dyn Identity>,
    catalog: Arc<dyn CatalogService>,
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    policy: PricingPolicy<'static>,
}

impl StoreCheckoutService {
    #[must_use]
    pub fn new(
        identity: Arc<dyn Identity>,
        catalog: Arc<dyn CatalogService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        policy: PricingPolicy<'static>,
    ) -> Self {
        Self {
            identity,
            catalog,
            carts,
            orders,
            policy,
        }
    }

    fn user(&self) -> Result<UserId, CheckoutError> {
        self.identity.current_user().ok_or(CheckoutError::NotSignedIn)
    }

    async fn resolve(&self, user: &UserId) -> Result<Vec<CartLine<'static>>, CheckoutError> {
        let cart = self.carts.get_cart(user).await?;

        let mut products = FxHashMap::default();

        for entry in cart.iter() {
            match self.catalog.get_product(&entry.product).await {
                Ok(product) => {
                    products.insert(product.id.clone(), product);
                }
                Err(CatalogServiceError::NotFound) => {
                    debug!(product_id = %entry.product, "dropping cart entry for missing product");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Ok(aggregate(&cart, &products))
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    #[tracing::instrument(name = "checkout.service.cart_lines", skip(self), err)]
    async fn cart_lines(&self) -> Result<Vec<CartLine<'static>>, CheckoutError> {
        let user = self.user()?;

        self.resolve(&user).await
    }

    #[tracing::instrument(name = "checkout.service.quote", skip(self), err)]
    async fn quote(&self) -> Result<Quote, CheckoutError> {
        let user = self.user()?;
        let lines = self.resolve(&user).await?;
        let items = line_items(&lines);
        let totals = price_items(&items, &self.policy)?;

        Ok(Quote {
            lines,
            items,
            totals,
        })
    }

    #[tracing::instrument(
        name = "checkout.service.place_order",
        skip(self, details),
        fields(user_id = tracing::field::Empty),
        err
    )]
    async fn place_order(&self, details: CheckoutDetails) -> Result<OrderId, CheckoutError> {
        let user = self.user()?;

        tracing::Span::current().record("user_id", tracing::field::display(&user));

        let lines = self.resolve(&user).await?;

        let draft = OrderDraft::price(
            user,
            &lines,
            &self.policy,
            details.shipping_address,
            details.payment_method,
        )?;

        draft.validate()?;

        let order = self.orders.submit_order(draft).await?;

        info!(order_id = %order, "placed order");

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// The signed-in user's cart joined with current catalog products.
    ///
    /// Entries for products that no longer exist, or are inactive, are left out.
    async fn cart_lines(&self) -> Result<Vec<CartLine<'static>>, CheckoutError>;

    /// Price the signed-in user's cart.
    async fn quote(&self) -> Result<Quote, CheckoutError>;

    /// Price, validate and submit the signed-in user's cart as an order.
    async fn place_order(&self, details: CheckoutDetails) -> Result<OrderId, CheckoutError>;
}
