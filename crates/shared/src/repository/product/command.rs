use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const RETURNING: &str = r#"
    RETURNING product_id, name, description, category, subcategory,
              price, deal_price, is_deal, deal_expires_at, stock,
              image_url, is_active, created_at, updated_at, deleted_at
"#;

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (name, description, category, subcategory, price, deal_price,
                 is_deal, deal_expires_at, stock, image_url, is_active,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE,
                    current_timestamp, current_timestamp)
            {RETURNING}
            "#
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.category)
        .bind(&req.subcategory)
        .bind(req.price)
        .bind(req.deal_price)
        .bind(req.is_deal)
        .bind(req.deal_expires_at)
        .bind(req.stock)
        .bind(&req.image_url)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product {}", product.product_id);
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<Product, RepositoryError> {
        let id = req
            .product_id
            .ok_or_else(|| RepositoryError::Custom("missing product id".into()))?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                category = $4,
                subcategory = $5,
                price = $6,
                deal_price = $7,
                is_deal = $8,
                deal_expires_at = $9,
                stock = $10,
                image_url = $11,
                is_active = $12,
                updated_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            {RETURNING}
            "#
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.category)
        .bind(&req.subcategory)
        .bind(req.price)
        .bind(req.deal_price)
        .bind(req.is_deal)
        .bind(req.deal_expires_at)
        .bind(req.stock)
        .bind(&req.image_url)
        .bind(req.is_active)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product {}: {:?}", id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product {}", product.product_id);
        Ok(product)
    }

    async fn trash_product(&self, id: Uuid) -> Result<Product, RepositoryError> {
        info!("🗑️ Trashing product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET deleted_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            {RETURNING}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to trash product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn restore_product(&self, id: Uuid) -> Result<Product, RepositoryError> {
        info!("🔄 Restoring product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET deleted_at = NULL
            WHERE product_id = $1 AND deleted_at IS NOT NULL
            {RETURNING}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to restore product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)
    }
}
