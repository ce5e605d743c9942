use crate::{
    domain::{
        requests::{
            AssignDeliveryRequest, FindAllOrders, UpdateDeliveryStatusRequest,
            UpdateOrderStatusRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, OrderResponse, OrderStatusHistoryResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{DeliveryStatus, Order, OrderItem, OrderStatus, OrderStatusHistory},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

/// Everything the order command repository needs to persist an order and its
/// item snapshots in one transaction. Built by the checkout service from
/// server-side prices, never from client-supplied amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub image_url: Option<String>,
    pub unit_price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: Uuid,
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
    pub gateway_payment_id: Option<String>,
    pub items: Vec<NewOrderItem>,
}

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_user(
        &self,
        user_id: Uuid,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError>;
    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, RepositoryError>;
    async fn find_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, RepositoryError>;
    async fn find_history(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderStatusHistory>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Persists order, item snapshots, stock decrements, coupon usage and the
    /// initial history row atomically.
    async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// Guarded status write: only succeeds while the row still holds `from`.
    async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        notes: Option<&str>,
        changed_by: Option<Uuid>,
    ) -> Result<Order, RepositoryError>;

    async fn assign_delivery(
        &self,
        order_id: Uuid,
        agent_id: Uuid,
    ) -> Result<Order, RepositoryError>;

    async fn update_delivery_status(
        &self,
        order_id: Uuid,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> Result<Order, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_user(
        &self,
        user_id: Uuid,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        order_id: Uuid,
        requester: Uuid,
        is_admin: bool,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
        requester: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_history(
        &self,
        order_id: Uuid,
        requester: Uuid,
        is_admin: bool,
    ) -> Result<ApiResponse<Vec<OrderStatusHistoryResponse>>, ServiceError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn update_status(
        &self,
        order_id: Uuid,
        req: &UpdateOrderStatusRequest,
        changed_by: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn assign_delivery(
        &self,
        order_id: Uuid,
        req: &AssignDeliveryRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_delivery_status(
        &self,
        order_id: Uuid,
        req: &UpdateDeliveryStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
