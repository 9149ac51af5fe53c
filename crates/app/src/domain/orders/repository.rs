//! Orders Repository

use serde_json::Value;
use storefront::ids::{OrderId, UserId};

use crate::{
    database::{Db, StoreError, decode, encode},
    domain::orders::records::OrderRecord,
};

const ORDERS: &str = "orders";

#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentOrdersRepository;

impl DocumentOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        db: &Db,
        record: &OrderRecord,
    ) -> Result<OrderId, StoreError> {
        let id = db.add(ORDERS, encode(record)?).await?;

        Ok(OrderId::from(id))
    }

    pub(crate) async fn get_order(
        &self,
        db: &Db,
        order: &OrderId,
    ) -> Result<Option<OrderRecord>, StoreError> {
        db.get(ORDERS, order.as_str())
            .await?
            .map(|document| decode(order.as_str(), document))
            .transpose()
    }

    pub(crate) async fn list_orders(
        &self,
        db: &Db,
        user: &UserId,
    ) -> Result<Vec<(OrderId, OrderRecord)>, StoreError> {
        db.find_eq(ORDERS, "user", &Value::from(user.as_str()))
            .await?
            .into_iter()
            .map(|(id, document)| {
                let record = decode(&id, document)?;

                Ok((OrderId::from(id), record))
            })
            .collect()
    }
}
