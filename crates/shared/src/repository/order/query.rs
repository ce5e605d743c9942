use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllOrders,
    errors::RepositoryError,
    model::{Order, OrderItem, OrderStatusHistory},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub(super) const ORDER_COLUMNS: &str = r#"
    order_id, order_number, user_id, customer_name, customer_phone,
    customer_email, shipping_address, pincode, subtotal, discount,
    coupon_code, total, payment_method, payment_status,
    gateway_order_id, gateway_payment_id, status, delivery_agent_id,
    delivery_status, created_at, updated_at
"#;

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        info!("🔍 Fetching orders with status: {:?}", req.status);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(format!("%{}%", req.search.trim()))
        };

        let status = req.status.map(|s| s.as_str().to_string());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::TEXT IS NULL OR order_number ILIKE $1 OR customer_name ILIKE $1)
              AND ($2::TEXT IS NULL OR status = $2)
            "#,
        )
        .bind(&search_pattern)
        .bind(&status)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE ($1::TEXT IS NULL OR order_number ILIKE $1 OR customer_name ILIKE $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&search_pattern)
        .bind(&status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((orders, total))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let status = req.status.map(|s| s.as_str().to_string());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            "#,
        )
        .bind(user_id)
        .bind(&status)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(user_id)
        .bind(&status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE order_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(order)
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE gateway_order_id = $1
            "#
        ))
        .bind(gateway_order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(order)
    }

    async fn find_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT order_item_id, order_id, product_id, product_name, image_url,
                   unit_price, quantity, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(items)
    }

    async fn find_history(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderStatusHistory>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let history = sqlx::query_as::<_, OrderStatusHistory>(
            r#"
            SELECT history_id, order_id, status, notes, changed_by, created_at
            FROM order_status_history
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(history)
    }
}
