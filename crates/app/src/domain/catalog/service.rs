//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    categories::Category,
    ids::{CategoryId, ProductId},
    products::Product,
};

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        records::{CategoryRecord, ProductRecord},
        repository::DocumentCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct DocumentCatalogService {
    db: Db,
    repository: DocumentCatalogRepository,
}

impl DocumentCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: DocumentCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for DocumentCatalogService {
    #[tracing::instrument(
        name = "catalog.service.get_product",
        skip(self, product),
        fields(product_id = %product),
        err
    )]
    async fn get_product(
        &self,
        product: &ProductId,
    ) -> Result<Product<'static>, CatalogServiceError> {
        let record = self
            .repository
            .get_product(&self.db, product)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        record.into_product(product.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product<'static>>, CatalogServiceError> {
        self.repository
            .list_products(&self.db)
            .await?
            .into_iter()
            .map(|(id, record)| record.into_product(id))
            .collect()
    }

    async fn list_products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<Product<'static>>, CatalogServiceError> {
        self.repository
            .list_products_in_category(&self.db, category)
            .await?
            .into_iter()
            .map(|(id, record)| record.into_product(id))
            .collect()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let categories = self
            .repository
            .list_categories(&self.db)
            .await?
            .into_iter()
            .map(|(id, record)| record.into_category(id))
            .collect();

        Ok(categories)
    }

    #[tracing::instrument(
        name = "catalog.service.put_product",
        skip(self, product),
        fields(product_id = %product.id),
        err
    )]
    async fn put_product(&self, product: Product<'static>) -> Result<(), CatalogServiceError> {
        self.repository
            .put_product(&self.db, &product.id, &ProductRecord::from_product(&product))
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "catalog.service.put_category",
        skip(self, category),
        fields(category_id = %category.id),
        err
    )]
    async fn put_category(&self, category: Category) -> Result<(), CatalogServiceError> {
        self.repository
            .put_category(
                &self.db,
                &category.id,
                &CategoryRecord::from_category(&category),
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: &ProductId,
    ) -> Result<Product<'static>, CatalogServiceError>;

    /// Retrieves all products, ordered by id.
    async fn list_products(&self) -> Result<Vec<Product<'static>>, CatalogServiceError>;

    /// Retrieves the products listed under a category, ordered by id.
    async fn list_products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<Product<'static>>, CatalogServiceError>;

    /// Retrieves all categories, ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    /// Creates or replaces a product.
    async fn put_product(&self, product: Product<'static>) -> Result<(), CatalogServiceError>;

    /// Creates or replaces a category.
    async fn put_category(&self, category: Category) -> Result<(), CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{database::StoreError, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn get_product_returns_seeded_product() -> TestResult {
        let ctx = TestContext::new().await;

        let lamp = ctx.catalog.get_product(&ProductId::from("lamp")).await?;

        assert_eq!(lamp.name, "Desk Lamp");
        assert_eq!(lamp.price, Money::from_minor(10_00, USD));
        assert_eq!(lamp.category, CategoryId::from("lighting"));

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product(&ProductId::from("nope")).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_while_offline_returns_store_error() {
        let ctx = TestContext::new().await;

        ctx.db.set_offline(true).await;

        let result = ctx.catalog.get_product(&ProductId::from("lamp")).await;

        assert!(
            matches!(result, Err(CatalogServiceError::Store(StoreError::Unavailable))),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_includes_inactive_products() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.catalog.list_products().await?;
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["bulb", "lamp", "retired"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_in_category_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let mut kettle = Product::new("kettle", "Kettle", Money::from_minor(24_99, USD));
        kettle.category = CategoryId::from("kitchen");

        ctx.catalog.put_product(kettle).await?;

        let kitchen = ctx
            .catalog
            .list_products_in_category(&CategoryId::from("kitchen"))
            .await?;

        assert_eq!(kitchen.len(), 1);
        assert!(kitchen.iter().all(|p| p.id.as_str() == "kettle"));

        Ok(())
    }

    #[tokio::test]
    async fn put_product_replaces_existing_product() -> TestResult {
        let ctx = TestContext::new().await;
        let id = ProductId::from("lamp");

        let mut lamp = ctx.catalog.get_product(&id).await?;
        lamp.price = Money::from_minor(12_50, USD);

        ctx.catalog.put_product(lamp).await?;

        assert_eq!(
            ctx.catalog.get_product(&id).await?.price,
            Money::from_minor(12_50, USD)
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_returns_seeded_categories() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .put_category(Category::new("kitchen", "Kitchen"))
            .await?;

        let categories = ctx.catalog.list_categories().await?;
        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, ["kitchen", "lighting"]);

        Ok(())
    }
}
