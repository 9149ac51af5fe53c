//! Carts Repository
//!
//! Each cart entry is its own document in `users/{user}/cart`, keyed by product id.

use storefront::{
    cart::Cart,
    ids::{ProductId, UserId},
};

use crate::{
    database::{Db, StoreError, decode, encode},
    domain::carts::records::CartEntryRecord,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentCartsRepository;

impl DocumentCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart(&self, db: &Db, user: &UserId) -> Result<Cart, StoreError> {
        let entries = db
            .list(&collection(user))
            .await?
            .into_iter()
            .map(|(id, document)| {
                decode::<CartEntryRecord>(&id, document).map(|record| record.into_entry(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::from_entries(entries))
    }

    /// Replace the entry for `product` with whatever `apply` returns, atomically.
    pub(crate) async fn update_entry<F>(
        &self,
        db: &Db,
        user: &UserId,
        product: &ProductId,
        apply: F,
    ) -> Result<(), StoreError>
    where
        F: FnOnce(Option<CartEntryRecord>) -> Option<CartEntryRecord> + Send,
    {
        let id = product.as_str();

        db.update(&collection(user), id, |document| {
            let current = document
                .map(|document| decode::<CartEntryRecord>(id, document.clone()))
                .transpose()?;

            apply(current).map(|record| encode(&record)).transpose()
        })
        .await
    }
}

fn collection(user: &UserId) -> String {
    format!("users/{user}/cart")
}
