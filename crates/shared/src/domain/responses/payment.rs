use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentConfigResponse {
    pub key_id: String,
    pub currency: String,
    pub mock_mode: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct GatewayOrderResponse {
    pub gateway_order_id: String,
    /// Amount the gateway will charge, in paise.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}
