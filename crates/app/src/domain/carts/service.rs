//! Carts service.
//!
//! Mutations do not return the updated cart; callers re-fetch with [`CartsService::get_cart`].

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::{
    cart::{Cart, Quantity, QuantityUpdate},
    ids::{ProductId, UserId},
};

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError, records::CartEntryRecord, repository::DocumentCartsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct DocumentCartsService {
    db: Db,
    repository: DocumentCartsRepository,
}

impl DocumentCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: DocumentCartsRepository::new(),
        }
    }

    /// Updates touch only the entry for `product`, so writes to other products never conflict.
    async fn update(
        &self,
        user: &UserId,
        product: &ProductId,
        update: impl FnOnce(Option<Quantity>) -> QuantityUpdate + Send,
    ) -> Result<(), CartsServiceError> {
        let now = Timestamp::now();

        self.repository
            .update_entry(&self.db, user, product, |current| {
                let mut cart = Cart::from_entries(
                    current.map(|record| record.into_entry(product.clone())),
                );

                let quantity = cart.get(product).map(|entry| entry.quantity);

                cart.apply(product, update(quantity), now);

                cart.get(product).map(CartEntryRecord::from_entry)
            })
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CartsService for DocumentCartsService {
    #[tracing::instrument(name = "carts.service.get_cart", skip(self, user), fields(user_id = %user), err)]
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        Ok(self.repository.get_cart(&self.db, user).await?)
    }

    #[tracing::instrument(
        name = "carts.service.set_quantity",
        skip(self, user, product),
        fields(user_id = %user, product_id = %product),
        err
    )]
    async fn set_quantity(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: i64,
    ) -> Result<(), CartsServiceError> {
        let update = QuantityUpdate::from_requested(quantity)?;

        self.update(user, product, |_| update).await
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, user, product),
        fields(user_id = %user, product_id = %product),
        err
    )]
    async fn add_item(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: Quantity,
    ) -> Result<(), CartsServiceError> {
        self.update(user, product, |current| {
            QuantityUpdate::Set(current.map_or(quantity, |current| current.saturating_add(quantity)))
        })
        .await
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self, user, product),
        fields(user_id = %user, product_id = %product),
        err
    )]
    async fn remove_item(&self, user: &UserId, product: &ProductId) -> Result<(), CartsServiceError> {
        self.update(user, product, |_| QuantityUpdate::Remove).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a user's cart. A user without a stored cart has an empty one.
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of a product. Zero or less removes it.
    async fn set_quantity(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: i64,
    ) -> Result<(), CartsServiceError>;

    /// Add units of a product, on top of any already in the cart.
    async fn add_item(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: Quantity,
    ) -> Result<(), CartsServiceError>;

    /// Remove a product from the cart.
    async fn remove_item(&self, user: &UserId, product: &ProductId) -> Result<(), CartsServiceError>;
}
