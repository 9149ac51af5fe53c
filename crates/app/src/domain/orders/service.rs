//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::{
    ids::{OrderId, UserId},
    orders::{Order, OrderDraft},
};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError, records::OrderRecord, repository::DocumentOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct DocumentOrdersService {
    db: Db,
    repository: DocumentOrdersRepository,
}

impl DocumentOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: DocumentOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for DocumentOrdersService {
    #[tracing::instrument(
        name = "orders.service.submit_order",
        skip(self, draft),
        fields(
            user_id = %draft.user,
            item_count = draft.items.len(),
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn submit_order(&self, draft: OrderDraft<'static>) -> Result<OrderId, OrdersServiceError> {
        draft.validate()?;

        let record = OrderRecord::from_draft(&draft, Timestamp::now());

        let order = self.repository.create_order(&self.db, &record).await?;

        Span::current().record("order_id", tracing::field::display(&order));

        info!(order_id = %order, total = record.total, "created order");

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self, order),
        fields(order_id = %order),
        err
    )]
    async fn get_order(&self, order: &OrderId) -> Result<Order<'static>, OrdersServiceError> {
        let record = self
            .repository
            .get_order(&self.db, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        record.into_order(order.clone())
    }

    #[tracing::instrument(
        name = "orders.service.list_orders",
        skip(self, user),
        fields(user_id = %user),
        err
    )]
    async fn list_orders(&self, user: &UserId) -> Result<Vec<Order<'static>>, OrdersServiceError> {
        let mut orders = self
            .repository
            .list_orders(&self.db, user)
            .await?
            .into_iter()
            .map(|(id, record)| record.into_order(id))
            .collect::<Result<Vec<_>, _>>()?;

        orders.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validates a draft and stores it as a new pending order.
    ///
    /// Nothing is written when validation fails. Every successful call creates a new order,
    /// even for a draft identical to one already submitted.
    async fn submit_order(&self, draft: OrderDraft<'static>) -> Result<OrderId, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: &OrderId) -> Result<Order<'static>, OrdersServiceError>;

    /// Retrieves a user's orders, newest first.
    async fn list_orders(&self, user: &UserId) -> Result<Vec<Order<'static>>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use storefront::{
        orders::{OrderStatus, PaymentStatus, ValidationError},
        pricing::PricingPolicy,
    };
    use testresult::TestResult;

    use crate::{
        database::StoreError,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn submit_order_then_get_order_round_trips() -> TestResult {
        let ctx = TestContext::new().await;
        let draft = helpers::lamp_draft(&ctx.user)?;

        let id = ctx.orders.submit_order(draft.clone()).await?;
        let order = ctx.orders.get_order(&id).await?;

        assert_eq!(order.id(), &id);
        assert_eq!(order.user(), &ctx.user);
        assert_eq!(order.items(), draft.items.as_slice());
        assert_eq!(order.totals(), &draft.totals);
        assert_eq!(order.total(), Money::from_minor(16_00, USD));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
        assert_eq!(order.created_at(), order.updated_at());

        Ok(())
    }

    #[tokio::test]
    async fn submit_order_rejects_invalid_draft_without_writing() -> TestResult {
        let ctx = TestContext::new().await;

        let mut draft = helpers::lamp_draft(&ctx.user)?;
        draft.shipping_address.street = String::new();

        let result = ctx.orders.submit_order(draft).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::Validation(ValidationError::MissingStreet))
            ),
            "expected MissingStreet, got {result:?}"
        );
        assert!(ctx.orders.list_orders(&ctx.user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn submit_order_rejects_empty_order() -> TestResult {
        let ctx = TestContext::new().await;

        let draft = OrderDraft::price(
            ctx.user.clone(),
            &[],
            &PricingPolicy::standard(USD),
            helpers::address(),
            "card",
        )?;

        let result = ctx.orders.submit_order(draft).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::Validation(ValidationError::NoItems))
            ),
            "expected NoItems, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn resubmitting_a_draft_creates_another_order() -> TestResult {
        let ctx = TestContext::new().await;
        let draft = helpers::lamp_draft(&ctx.user)?;

        let first = ctx.orders.submit_order(draft.clone()).await?;
        let second = ctx.orders.submit_order(draft).await?;

        assert_ne!(first, second);
        assert_eq!(ctx.orders.list_orders(&ctx.user).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn submit_order_while_offline_returns_store_error() -> TestResult {
        let ctx = TestContext::new().await;
        let draft = helpers::lamp_draft(&ctx.user)?;

        ctx.db.set_offline(true).await;

        let result = ctx.orders.submit_order(draft).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Store(StoreError::Unavailable))),
            "expected Unavailable, got {result:?}"
        );

        ctx.db.set_offline(false).await;

        assert!(ctx.orders.list_orders(&ctx.user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(&OrderId::from("missing")).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_orders_only_returns_the_users_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let other = UserId::from("someone-else");

        ctx.orders
            .submit_order(helpers::lamp_draft(&ctx.user)?)
            .await?;
        ctx.orders.submit_order(helpers::lamp_draft(&other)?).await?;

        let orders = ctx.orders.list_orders(&other).await?;

        assert_eq!(orders.len(), 1);
        assert!(orders.iter().all(|order| order.user() == &other));

        Ok(())
    }
}
