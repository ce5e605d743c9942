use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::DiscountType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllCoupons {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApplyCouponRequest {
    #[validate(length(min = 1, message = "Coupon code is required"))]
    #[schema(example = "LIMINARA20")]
    pub code: String,

    /// Current order subtotal in paise.
    #[validate(range(min = 1, message = "Subtotal must be positive"))]
    #[schema(example = 249900)]
    pub subtotal: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCouponRequest {
    #[validate(length(min = 3, message = "Coupon code must be at least 3 characters"))]
    #[schema(example = "LIMINARA20")]
    pub code: String,

    pub discount_type: DiscountType,

    /// Percentage (1-100) or flat amount in paise depending on type.
    #[validate(range(min = 1, message = "Discount value must be positive"))]
    #[schema(example = 20)]
    pub value: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum order cannot be negative"))]
    pub min_order: i64,

    #[validate(range(min = 1, message = "Discount cap must be positive"))]
    pub max_discount: Option<i64>,

    #[validate(range(min = 1, message = "Usage limit must be positive"))]
    pub usage_limit: Option<i32>,

    pub valid_from: Option<DateTime<Utc>>,

    pub valid_until: Option<DateTime<Utc>>,
}
