//! Catalog Repository

use serde_json::Value;
use storefront::ids::{CategoryId, ProductId};

use crate::{
    database::{Db, StoreError, decode, encode},
    domain::catalog::records::{CategoryRecord, ProductRecord},
};

const PRODUCTS: &str = "products";
const CATEGORIES: &str = "categories";

#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentCatalogRepository;

impl DocumentCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        db: &Db,
        product: &ProductId,
    ) -> Result<Option<ProductRecord>, StoreError> {
        db.get(PRODUCTS, product.as_str())
            .await?
            .map(|document| decode(product.as_str(), document))
            .transpose()
    }

    pub(crate) async fn list_products(
        &self,
        db: &Db,
    ) -> Result<Vec<(ProductId, ProductRecord)>, StoreError> {
        decode_all(db.list(PRODUCTS).await?)
    }

    pub(crate) async fn list_products_in_category(
        &self,
        db: &Db,
        category: &CategoryId,
    ) -> Result<Vec<(ProductId, ProductRecord)>, StoreError> {
        let documents = db
            .find_eq(PRODUCTS, "category", &Value::from(category.as_str()))
            .await?;

        decode_all(documents)
    }

    pub(crate) async fn put_product(
        &self,
        db: &Db,
        product: &ProductId,
        record: &ProductRecord,
    ) -> Result<(), StoreError> {
        db.set(PRODUCTS, product.as_str(), encode(record)?).await
    }

    pub(crate) async fn list_categories(
        &self,
        db: &Db,
    ) -> Result<Vec<(CategoryId, CategoryRecord)>, StoreError> {
        decode_all(db.list(CATEGORIES).await?)
    }

    pub(crate) async fn put_category(
        &self,
        db: &Db,
        category: &CategoryId,
        record: &CategoryRecord,
    ) -> Result<(), StoreError> {
        db.set(CATEGORIES, category.as_str(), encode(record)?).await
    }
}

fn decode_all<I, R>(documents: Vec<(String, Value)>) -> Result<Vec<(I, R)>, StoreError>
where
    I: From<String>,
    R: serde::de::DeserializeOwned,
{
    documents
        .into_iter()
        .map(|(id, document)| {
            let record = decode(&id, document)?;

            Ok((I::from(id), record))
        })
        .collect()
}
