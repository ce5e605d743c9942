use crate::{
    abstract_trait::{NewOrder, OrderCommandRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::{DeliveryStatus, Order, OrderStatus, PaymentMethod, PaymentStatus},
    utils::generate_random_string,
};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use super::query::ORDER_COLUMNS;

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn insert_history(
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        status: &str,
        notes: Option<&str>,
        changed_by: Option<Uuid>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO order_status_history (order_id, status, notes, changed_by, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            "#,
        )
        .bind(order_id)
        .bind(status)
        .bind(notes)
        .bind(changed_by)
        .execute(&mut **tx)
        .await
        .map_err(RepositoryError::from)?;

        Ok(())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order_number = format!("ORD-{}", generate_random_string(10).to_uppercase());
        let status = if order.payment_status == PaymentStatus::Paid.as_str() {
            OrderStatus::Confirmed
        } else {
            OrderStatus::Pending
        };

        let created = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders
                (order_number, user_id, customer_name, customer_phone, customer_email,
                 shipping_address, pincode, subtotal, discount, coupon_code, total,
                 payment_method, payment_status, gateway_order_id, gateway_payment_id,
                 status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, current_timestamp, current_timestamp)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order_number)
        .bind(order.user_id)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(&order.customer_email)
        .bind(&order.shipping_address)
        .bind(&order.pincode)
        .bind(order.subtotal)
        .bind(order.discount)
        .bind(&order.coupon_code)
        .bind(order.total)
        .bind(&order.payment_method)
        .bind(&order.payment_status)
        .bind(&order.gateway_order_id)
        .bind(&order.gateway_payment_id)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order {}: {:?}", order_number, e);
            RepositoryError::from(e)
        })?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items
                    (order_id, product_id, product_name, image_url, unit_price,
                     quantity, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, current_timestamp)
                "#,
            )
            .bind(created.order_id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(&item.image_url)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            // Guarded decrement so two concurrent checkouts cannot oversell.
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - $2, updated_at = current_timestamp
                WHERE product_id = $1 AND stock >= $2
                "#,
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for {}",
                    item.product_name
                )));
            }
        }

        if let Some(code) = &order.coupon_code {
            let result = sqlx::query(
                r#"
                UPDATE coupons
                SET usage_count = usage_count + 1, updated_at = current_timestamp
                WHERE code = $1
                  AND is_active = TRUE
                  AND (usage_limit IS NULL OR usage_count < usage_limit)
                "#,
            )
            .bind(code)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::Conflict(format!(
                    "coupon {code} is no longer available"
                )));
            }
        }

        Self::insert_history(&mut tx, created.order_id, status.as_str(), None, None).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order {} ({} items, total {})",
            created.order_number,
            order.items.len(),
            created.total
        );
        Ok(created)
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        notes: Option<&str>,
        changed_by: Option<Uuid>,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $3, updated_at = current_timestamp
            WHERE order_id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or_else(|| {
            RepositoryError::Conflict(format!("order is no longer in status {from}"))
        })?;

        Self::insert_history(&mut tx, order_id, to.as_str(), notes, changed_by).await?;

        // Keep the agent's counters in step with terminal outcomes.
        if let Some(agent_id) = order.delivery_agent_id {
            let counter = match to {
                OrderStatus::Delivered => Some("completed_deliveries"),
                OrderStatus::Cancelled => Some("cancelled_deliveries"),
                _ => None,
            };

            if let Some(column) = counter {
                sqlx::query(&format!(
                    r#"
                    UPDATE delivery_agents
                    SET {column} = {column} + 1, updated_at = current_timestamp
                    WHERE agent_id = $1
                    "#
                ))
                .bind(agent_id)
                .execute(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;
            }
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔄 Order {} moved {} -> {}", order.order_number, from, to);
        Ok(order)
    }

    async fn assign_delivery(
        &self,
        order_id: Uuid,
        agent_id: Uuid,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET delivery_agent_id = $2,
                delivery_status = $3,
                updated_at = current_timestamp
            WHERE order_id = $1 AND delivery_agent_id IS NULL
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(agent_id)
        .bind(DeliveryStatus::Assigned.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or_else(|| {
            RepositoryError::Conflict("order already has a delivery agent".to_string())
        })?;

        sqlx::query(
            r#"
            UPDATE delivery_agents
            SET total_deliveries = total_deliveries + 1, updated_at = current_timestamp
            WHERE agent_id = $1
            "#,
        )
        .bind(agent_id)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        Self::insert_history(
            &mut tx,
            order_id,
            order.status.as_str(),
            Some("delivery agent assigned"),
            None,
        )
        .await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🚚 Assigned agent {} to order {}", agent_id, order.order_number);
        Ok(order)
    }

    async fn update_delivery_status(
        &self,
        order_id: Uuid,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET delivery_status = $3, updated_at = current_timestamp
            WHERE order_id = $1 AND delivery_status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or_else(|| {
            RepositoryError::Conflict(format!("delivery is no longer in status {from}"))
        })?;

        let order = match to {
            // A completed delivery completes the order, and collects COD.
            DeliveryStatus::Delivered => {
                let mark_paid = PaymentMethod::from_str(&order.payment_method)
                    .map(|m| m == PaymentMethod::Cod)
                    .unwrap_or(false)
                    && order.payment_status == PaymentStatus::Pending.as_str();

                // Guarded on the out_for_delivery stage: an order the back
                // office already closed is neither re-stamped nor re-counted.
                let closed = sqlx::query_as::<_, Order>(&format!(
                    r#"
                    UPDATE orders
                    SET status = $2,
                        payment_status = CASE WHEN $3 THEN 'paid' ELSE payment_status END,
                        updated_at = current_timestamp
                    WHERE order_id = $1 AND status = $4
                    RETURNING {ORDER_COLUMNS}
                    "#
                ))
                .bind(order_id)
                .bind(OrderStatus::Delivered.as_str())
                .bind(mark_paid)
                .bind(OrderStatus::OutForDelivery.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

                match closed {
                    Some(updated) => {
                        Self::insert_history(
                            &mut tx,
                            order_id,
                            OrderStatus::Delivered.as_str(),
                            Some("delivered by agent"),
                            None,
                        )
                        .await?;

                        if let Some(agent_id) = updated.delivery_agent_id {
                            sqlx::query(
                                r#"
                                UPDATE delivery_agents
                                SET completed_deliveries = completed_deliveries + 1,
                                    updated_at = current_timestamp
                                WHERE agent_id = $1
                                "#,
                            )
                            .bind(agent_id)
                            .execute(&mut *tx)
                            .await
                            .map_err(RepositoryError::from)?;
                        }

                        updated
                    }
                    // Already delivered on the order side; the courier report
                    // may still record the COD collection.
                    None if mark_paid => sqlx::query_as::<_, Order>(&format!(
                        r#"
                        UPDATE orders
                        SET payment_status = 'paid', updated_at = current_timestamp
                        WHERE order_id = $1
                        RETURNING {ORDER_COLUMNS}
                        "#
                    ))
                    .bind(order_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(RepositoryError::from)?,
                    None => order,
                }
            }
            DeliveryStatus::OutForDelivery => {
                // Mirror the courier milestone onto the order lifecycle when it
                // has not advanced past it already.
                let mirrored = sqlx::query_as::<_, Order>(&format!(
                    r#"
                    UPDATE orders
                    SET status = $3, updated_at = current_timestamp
                    WHERE order_id = $1 AND status = $2
                    RETURNING {ORDER_COLUMNS}
                    "#
                ))
                .bind(order_id)
                .bind(OrderStatus::Shipped.as_str())
                .bind(OrderStatus::OutForDelivery.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

                if mirrored.is_some() {
                    Self::insert_history(
                        &mut tx,
                        order_id,
                        OrderStatus::OutForDelivery.as_str(),
                        None,
                        None,
                    )
                    .await?;
                }

                mirrored.unwrap_or(order)
            }
            _ => order,
        };

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "🚚 Delivery for order {} moved {} -> {}",
            order.order_number, from, to
        );
        Ok(order)
    }
}
