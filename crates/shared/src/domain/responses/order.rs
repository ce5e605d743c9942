use crate::model::{Order, OrderItem, OrderStatusHistory};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub image_url: Option<String>,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            product_id: value.product_id,
            product_name: value.product_name,
            image_url: value.image_url,
            unit_price: value.unit_price,
            quantity: value.quantity,
            line_total: value.unit_price * value.quantity as i64,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub shipping_address: String,
    pub pincode: String,
    pub subtotal: i64,
    pub discount: i64,
    pub coupon_code: Option<String>,
    pub total: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub gateway_order_id: Option<String>,
    pub status: String,
    pub delivery_agent_id: Option<Uuid>,
    pub delivery_status: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl OrderResponse {
    pub fn from_order(order: Order, items: Vec<OrderItem>) -> Self {
        OrderResponse {
            id: order.order_id,
            order_number: order.order_number,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_email: order.customer_email,
            shipping_address: order.shipping_address,
            pincode: order.pincode,
            subtotal: order.subtotal,
            discount: order.discount,
            coupon_code: order.coupon_code,
            total: order.total,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            gateway_order_id: order.gateway_order_id,
            status: order.status,
            delivery_agent_id: order.delivery_agent_id,
            delivery_status: order.delivery_status,
            items: items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: order.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse::from_order(value, Vec::new())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderStatusHistoryResponse {
    pub id: Uuid,
    pub status: String,
    pub notes: Option<String>,
    pub changed_by: Option<Uuid>,
    pub created_at: Option<String>,
}

impl From<OrderStatusHistory> for OrderStatusHistoryResponse {
    fn from(value: OrderStatusHistory) -> Self {
        OrderStatusHistoryResponse {
            id: value.history_id,
            status: value.status,
            notes: value.notes,
            changed_by: value.changed_by,
            created_at: value.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
