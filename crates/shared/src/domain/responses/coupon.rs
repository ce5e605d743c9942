use crate::model::Coupon;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub value: i64,
    pub min_order: i64,
    pub max_discount: Option<i64>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub valid_from: String,
    pub valid_until: Option<String>,
    pub is_active: bool,
}

impl From<Coupon> for CouponResponse {
    fn from(value: Coupon) -> Self {
        CouponResponse {
            id: value.coupon_id,
            code: value.code,
            discount_type: value.discount_type,
            value: value.value,
            min_order: value.min_order,
            max_discount: value.max_discount,
            usage_limit: value.usage_limit,
            usage_count: value.usage_count,
            valid_from: value.valid_from.to_rfc3339(),
            valid_until: value.valid_until.map(|dt| dt.to_rfc3339()),
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AppliedCouponResponse {
    pub code: String,
    pub discount: i64,
    pub total: i64,
}
