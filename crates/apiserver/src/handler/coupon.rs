use crate::middleware::{
    jwt::{auth_middleware, ensure_admin},
    validate::SimpleValidatedJson,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::DynCouponService,
    config::Claims,
    domain::{
        requests::{ApplyCouponRequest, CreateCouponRequest, FindAllCoupons},
        responses::{
            ApiResponse, ApiResponsePagination, AppliedCouponResponse, CouponResponse,
        },
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/coupons/apply",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon accepted, discount computed", body = ApiResponse<AppliedCouponResponse>),
        (status = 404, description = "Unknown coupon code"),
        (status = 409, description = "Coupon not applicable")
    )
)]
pub async fn apply_coupon(
    Extension(service): Extension<DynCouponService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ApplyCouponRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.apply(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/coupons",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    params(FindAllCoupons),
    responses(
        (status = 200, description = "Coupon page", body = ApiResponsePagination<Vec<CouponResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_coupons(
    Extension(service): Extension<DynCouponService>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<FindAllCoupons>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/coupons",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    request_body = CreateCouponRequest,
    responses(
        (status = 200, description = "Coupon created", body = ApiResponse<CouponResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_coupon(
    Extension(service): Extension<DynCouponService>,
    Extension(claims): Extension<Claims>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCouponRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.create_coupon(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/coupons/{id}",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon deactivated", body = ApiResponse<CouponResponse>),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn deactivate_coupon(
    Extension(service): Extension<DynCouponService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.deactivate_coupon(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn coupon_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/coupons/apply", post(apply_coupon))
        .route("/api/admin/coupons", get(get_coupons).post(create_coupon))
        .route("/api/admin/coupons/{id}", delete(deactivate_coupon))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.coupon_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
