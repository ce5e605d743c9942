use crate::{
    domain::{
        requests::{CreateGatewayOrderRequest, PlaceCodOrderRequest, VerifyPaymentRequest},
        responses::{ApiResponse, GatewayOrderResponse, OrderResponse, PaymentConfigResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;
pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

/// A gateway-side order: the provider object representing an intended charge,
/// created before the customer completes payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGatewayTrait {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError>;

    /// Checks the callback signature over `"{order_id}|{payment_id}"`.
    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> bool;
}

#[async_trait]
pub trait CheckoutServiceTrait {
    async fn payment_config(&self) -> Result<ApiResponse<PaymentConfigResponse>, ServiceError>;
    async fn create_gateway_order(
        &self,
        user_id: Uuid,
        req: &CreateGatewayOrderRequest,
    ) -> Result<ApiResponse<GatewayOrderResponse>, ServiceError>;
    async fn verify_payment(
        &self,
        user_id: Uuid,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn place_cod_order(
        &self,
        user_id: Uuid,
        req: &PlaceCodOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
