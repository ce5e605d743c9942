use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::requests::address::CreateAddressRequest;

/// Which staging area feeds the checkout: the server-side cart, or a single
/// item checked out directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutSource {
    Cart,
    BuyNow,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BuyNowItem {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGatewayOrderRequest {
    pub source: CheckoutSource,

    #[validate(nested)]
    pub buy_now: Option<BuyNowItem>,

    pub coupon_code: Option<String>,

    /// A saved address to ship to; mutually exclusive with `address`.
    pub address_id: Option<Uuid>,

    /// Inline new address for the one-off / first-order path.
    #[validate(nested)]
    pub address: Option<CreateAddressRequest>,

    /// Persist the inline address to the user's address book.
    #[serde(default)]
    pub save_address: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlaceCodOrderRequest {
    pub source: CheckoutSource,

    #[validate(nested)]
    pub buy_now: Option<BuyNowItem>,

    pub coupon_code: Option<String>,

    pub address_id: Option<Uuid>,

    #[validate(nested)]
    pub address: Option<CreateAddressRequest>,

    #[serde(default)]
    pub save_address: bool,

    /// The client-side confirmation prompt result; COD orders are only
    /// accepted once the user has confirmed.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Gateway order id is required"))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1, message = "Gateway payment id is required"))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1, message = "Gateway signature is required"))]
    pub razorpay_signature: String,
}
