use crate::{
    abstract_trait::ProductQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::FindAllProducts, errors::RepositoryError, model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = r#"
    product_id, name, description, category, subcategory,
    price, deal_price, is_deal, deal_expires_at, stock,
    image_url, is_active, created_at, updated_at, deleted_at
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!("🔍 Fetching products with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(format!("%{}%", req.search.trim()))
        };

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE deleted_at IS NULL
              AND is_active = TRUE
              AND ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1)
              AND ($2::TEXT IS NULL OR category = $2)
            "#,
        )
        .bind(&search_pattern)
        .bind(&req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE deleted_at IS NULL
              AND is_active = TRUE
              AND ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1)
              AND ($2::TEXT IS NULL OR category = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&search_pattern)
        .bind(&req.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((products, total))
    }

    async fn find_trashed(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!("🗑️ Fetching trashed products with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(format!("%{}%", req.search.trim()))
        };

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE deleted_at IS NOT NULL
              AND ($1::TEXT IS NULL OR name ILIKE $1)
            "#,
        )
        .bind(&search_pattern)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE deleted_at IS NOT NULL
              AND ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY deleted_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE product_id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(product)
    }
}
