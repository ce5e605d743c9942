use crate::{
    domain::{
        requests::{ApplyCouponRequest, CreateCouponRequest, FindAllCoupons},
        responses::{ApiResponse, ApiResponsePagination, AppliedCouponResponse, CouponResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Coupon,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCouponQueryRepository = Arc<dyn CouponQueryRepositoryTrait + Send + Sync>;
pub type DynCouponCommandRepository = Arc<dyn CouponCommandRepositoryTrait + Send + Sync>;
pub type DynCouponService = Arc<dyn CouponServiceTrait + Send + Sync>;

#[async_trait]
pub trait CouponQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllCoupons) -> Result<(Vec<Coupon>, i64), RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError>;
}

#[async_trait]
pub trait CouponCommandRepositoryTrait {
    async fn create_coupon(&self, req: &CreateCouponRequest) -> Result<Coupon, RepositoryError>;
    async fn deactivate_coupon(&self, id: Uuid) -> Result<Coupon, RepositoryError>;
}

#[async_trait]
pub trait CouponServiceTrait {
    async fn apply(
        &self,
        req: &ApplyCouponRequest,
    ) -> Result<ApiResponse<AppliedCouponResponse>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllCoupons,
    ) -> Result<ApiResponsePagination<Vec<CouponResponse>>, ServiceError>;
    async fn create_coupon(
        &self,
        req: &CreateCouponRequest,
    ) -> Result<ApiResponse<CouponResponse>, ServiceError>;
    async fn deactivate_coupon(&self, id: Uuid)
    -> Result<ApiResponse<CouponResponse>, ServiceError>;
}
