use crate::{
    abstract_trait::CartRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{CartItem, CartLine},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT c.cart_item_id,
                   c.product_id,
                   c.quantity,
                   c.unit_price,
                   p.name AS product_name,
                   p.image_url,
                   p.stock,
                   p.is_active
            FROM cart_items c
            JOIN products p ON p.product_id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        Ok(lines)
    }

    async fn upsert_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: i64,
    ) -> Result<CartItem, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Re-adding a product accumulates quantity but keeps the price
        // resolved when the line was first created.
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items
                (user_id, product_id, quantity, unit_price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, current_timestamp, current_timestamp)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = current_timestamp
            RETURNING cart_item_id, user_id, product_id, quantity, unit_price,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to add product {} to cart: {:?}", product_id, e);
            RepositoryError::from(e)
        })?;

        info!("🛒 Cart line {} now qty {}", item.cart_item_id, item.quantity);
        Ok(item)
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $3, updated_at = current_timestamp
            WHERE user_id = $1 AND product_id = $2
            RETURNING cart_item_id, user_id, product_id, quantity, unit_price,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), RepositoryError> {
        info!("🧹 Clearing cart for user {}", user_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query(
            r#"
            DELETE FROM cart_items WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to clear cart for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        Ok(())
    }
}
