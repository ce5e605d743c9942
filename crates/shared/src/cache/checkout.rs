use crate::{
    abstract_trait::{NewOrder, NewOrderItem},
    domain::requests::CheckoutSource,
};
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// How long a customer has to complete payment before the snapshot lapses and
/// checkout must be restarted.
pub const CHECKOUT_TTL_MINUTES: i64 = 30;

/// Everything resolved server-side at "pay now" time: priced items, the
/// shipping address, and the evaluated discount. Persisted until the gateway
/// callback arrives so the order is created from this snapshot, never from
/// client-supplied amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub user_id: uuid::Uuid,
    pub source: CheckoutSource,
    pub items: Vec<NewOrderItem>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub shipping_address: String,
    pub pincode: String,
    pub subtotal: i64,
    pub discount: i64,
    pub coupon_code: Option<String>,
    pub total: i64,
}

impl CheckoutSession {
    pub fn into_new_order(self, gateway_order_id: String, gateway_payment_id: String) -> NewOrder {
        NewOrder {
            user_id: self.user_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            shipping_address: self.shipping_address,
            pincode: self.pincode,
            subtotal: self.subtotal,
            discount: self.discount,
            coupon_code: self.coupon_code,
            total: self.total,
            payment_method: "razorpay".to_string(),
            payment_status: "paid".to_string(),
            gateway_order_id: Some(gateway_order_id),
            gateway_payment_id: Some(gateway_payment_id),
            items: self.items,
        }
    }
}

pub type DynCheckoutSessionStore = Arc<dyn CheckoutSessionStoreTrait + Send + Sync>;

#[async_trait::async_trait]
pub trait CheckoutSessionStoreTrait {
    async fn store(&self, gateway_order_id: &str, session: &CheckoutSession) -> bool;
    /// Fetches and deletes in one step so a session can only be redeemed once.
    async fn take(&self, gateway_order_id: &str) -> Option<CheckoutSession>;
}

#[derive(Clone)]
pub struct CheckoutStore {
    redis_pool: Arc<Pool>,
}

impl CheckoutStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    fn key(gateway_order_id: &str) -> String {
        format!("checkout:{gateway_order_id}")
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl CheckoutSessionStoreTrait for CheckoutStore {
    async fn store(&self, gateway_order_id: &str, session: &CheckoutSession) -> bool {
        let json_data = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize checkout session: {:?}", e);
                return false;
            }
        };

        let key = Self::key(gateway_order_id);
        let ttl = Duration::minutes(CHECKOUT_TTL_MINUTES);

        if let Some(mut conn) = self.get_conn().await {
            let result: redis::RedisResult<()> = redis::pipe()
                .cmd("SET")
                .arg(&key)
                .arg(&json_data)
                .ignore()
                .cmd("EXPIRE")
                .arg(&key)
                .arg(ttl.num_seconds() as usize)
                .query_async(&mut conn)
                .await;

            match result {
                Ok(_) => {
                    debug!("Checkout session stored for {}", gateway_order_id);
                    true
                }
                Err(e) => {
                    error!("Failed to store checkout session: {:?}", e);
                    false
                }
            }
        } else {
            false
        }
    }

    async fn take(&self, gateway_order_id: &str) -> Option<CheckoutSession> {
        let mut conn = self.get_conn().await?;
        let key = Self::key(gateway_order_id);

        // Single GETDEL keeps redeem-once true even when two verification
        // callbacks race on the same gateway order.
        let result: redis::RedisResult<Option<String>> =
            redis::cmd("GETDEL").arg(&key).query_async(&mut conn).await;

        match result {
            Ok(Some(data)) => match serde_json::from_str::<CheckoutSession>(&data) {
                Ok(session) => Some(session),
                Err(e) => {
                    error!("Failed to deserialize checkout session: {:?}", e);
                    None
                }
            },
            Ok(None) => {
                debug!("Checkout session not found for {}", gateway_order_id);
                None
            }
            Err(e) => {
                error!("Redis error taking checkout {}: {:?}", gateway_order_id, e);
                None
            }
        }
    }
}
