use crate::{
    abstract_trait::{CouponServiceTrait, DynCouponCommandRepository, DynCouponQueryRepository},
    domain::{
        requests::{ApplyCouponRequest, CreateCouponRequest, FindAllCoupons},
        responses::{
            ApiResponse, ApiResponsePagination, AppliedCouponResponse, CouponResponse, Pagination,
        },
    },
    errors::ServiceError,
    model::{Coupon, DiscountType},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Computes the discount a coupon grants on a subtotal, in paise, after every
/// eligibility gate has passed. Percentage discounts floor toward zero and
/// respect the cap; flat discounts never exceed the subtotal.
pub fn evaluate_coupon(
    coupon: &Coupon,
    subtotal: i64,
    now: DateTime<Utc>,
) -> Result<i64, ServiceError> {
    if !coupon.is_active {
        return Err(ServiceError::StateConflict(
            "coupon is no longer active".to_string(),
        ));
    }

    if coupon.valid_from > now {
        return Err(ServiceError::StateConflict(
            "coupon is not yet valid".to_string(),
        ));
    }

    if let Some(until) = coupon.valid_until
        && until < now
    {
        return Err(ServiceError::StateConflict("coupon has expired".to_string()));
    }

    if let Some(limit) = coupon.usage_limit
        && coupon.usage_count >= limit
    {
        return Err(ServiceError::StateConflict(
            "coupon usage limit reached".to_string(),
        ));
    }

    if subtotal < coupon.min_order {
        return Err(ServiceError::StateConflict(format!(
            "order must be at least {} paise to use this coupon",
            coupon.min_order
        )));
    }

    let discount_type = DiscountType::from_str(&coupon.discount_type)
        .map_err(ServiceError::Internal)?;

    let discount = match discount_type {
        DiscountType::Flat => coupon.value.min(subtotal),
        DiscountType::Percentage => {
            let raw = subtotal * coupon.value / 100;
            match coupon.max_discount {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
    };

    Ok(discount.min(subtotal))
}

pub struct CouponService {
    query: DynCouponQueryRepository,
    command: DynCouponCommandRepository,
}

impl CouponService {
    pub fn new(query: DynCouponQueryRepository, command: DynCouponCommandRepository) -> Self {
        Self { query, command }
    }

    pub(crate) async fn resolve_discount(
        &self,
        code: &str,
        subtotal: i64,
    ) -> Result<(String, i64), ServiceError> {
        let normalized = code.trim().to_uppercase();

        let coupon = self
            .query
            .find_by_code(&normalized)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("coupon {normalized} not found")))?;

        let discount = evaluate_coupon(&coupon, subtotal, Utc::now())?;

        Ok((coupon.code, discount))
    }
}

#[async_trait]
impl CouponServiceTrait for CouponService {
    async fn apply(
        &self,
        req: &ApplyCouponRequest,
    ) -> Result<ApiResponse<AppliedCouponResponse>, ServiceError> {
        let (code, discount) = self.resolve_discount(&req.code, req.subtotal).await?;

        info!("🎟️ Coupon {} grants {} off {}", code, discount, req.subtotal);

        Ok(ApiResponse::success(
            "Coupon applied",
            AppliedCouponResponse {
                code,
                discount,
                total: req.subtotal - discount,
            },
        ))
    }

    async fn find_all(
        &self,
        req: &FindAllCoupons,
    ) -> Result<ApiResponsePagination<Vec<CouponResponse>>, ServiceError> {
        let (coupons, total) = self.query.find_all(req).await?;

        let data: Vec<CouponResponse> = coupons.into_iter().map(Into::into).collect();

        Ok(ApiResponsePagination::success(
            "Coupons retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn create_coupon(
        &self,
        req: &CreateCouponRequest,
    ) -> Result<ApiResponse<CouponResponse>, ServiceError> {
        if req.discount_type == DiscountType::Percentage && req.value > 100 {
            return Err(ServiceError::Validation(vec![
                "Percentage discount cannot exceed 100".to_string(),
            ]));
        }

        let coupon = self.command.create_coupon(req).await?;

        Ok(ApiResponse::success("Coupon created", coupon.into()))
    }

    async fn deactivate_coupon(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<CouponResponse>, ServiceError> {
        let coupon = self.command.deactivate_coupon(id).await?;

        info!("🎟️ Coupon {} deactivated", coupon.code);
        Ok(ApiResponse::success("Coupon deactivated", coupon.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(discount_type: &str, value: i64) -> Coupon {
        Coupon {
            coupon_id: Uuid::new_v4(),
            code: "LIMINARA20".into(),
            discount_type: discount_type.into(),
            value,
            min_order: 0,
            max_discount: None,
            usage_limit: None,
            usage_count: 0,
            valid_from: Utc::now() - Duration::days(1),
            valid_until: Some(Utc::now() + Duration::days(30)),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn twenty_percent_off_a_2499_rupee_order() {
        let c = coupon("percentage", 20);
        // ₹2499.00 = 249900 paise; 20% = ₹499.80
        assert_eq!(evaluate_coupon(&c, 249_900, Utc::now()).unwrap(), 49_980);
    }

    #[test]
    fn percentage_discount_is_capped() {
        let mut c = coupon("percentage", 20);
        c.max_discount = Some(30_000);

        assert_eq!(evaluate_coupon(&c, 249_900, Utc::now()).unwrap(), 30_000);
    }

    #[test]
    fn flat_discount_never_exceeds_subtotal() {
        let c = coupon("flat", 50_000);

        assert_eq!(evaluate_coupon(&c, 20_000, Utc::now()).unwrap(), 20_000);
        assert_eq!(evaluate_coupon(&c, 100_000, Utc::now()).unwrap(), 50_000);
    }

    #[test]
    fn expired_coupon_is_rejected() {
        let mut c = coupon("percentage", 20);
        c.valid_until = Some(Utc::now() - Duration::hours(1));

        assert!(matches!(
            evaluate_coupon(&c, 249_900, Utc::now()),
            Err(ServiceError::StateConflict(_))
        ));
    }

    #[test]
    fn not_yet_valid_coupon_is_rejected() {
        let mut c = coupon("percentage", 20);
        c.valid_from = Utc::now() + Duration::days(1);

        assert!(evaluate_coupon(&c, 249_900, Utc::now()).is_err());
    }

    #[test]
    fn usage_limit_is_enforced() {
        let mut c = coupon("percentage", 20);
        c.usage_limit = Some(100);
        c.usage_count = 100;

        assert!(evaluate_coupon(&c, 249_900, Utc::now()).is_err());
    }

    #[test]
    fn minimum_order_is_enforced() {
        let mut c = coupon("percentage", 20);
        c.min_order = 100_000;

        assert!(evaluate_coupon(&c, 99_999, Utc::now()).is_err());
        assert!(evaluate_coupon(&c, 100_000, Utc::now()).is_ok());
    }

    #[test]
    fn inactive_coupon_is_rejected() {
        let mut c = coupon("flat", 10_000);
        c.is_active = false;

        assert!(evaluate_coupon(&c, 249_900, Utc::now()).is_err());
    }
}
