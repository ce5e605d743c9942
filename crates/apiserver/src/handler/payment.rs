use crate::middleware::{jwt::auth_middleware, validate::SimpleValidatedJson};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::DynCheckoutService,
    domain::{
        requests::{CreateGatewayOrderRequest, VerifyPaymentRequest},
        responses::{ApiResponse, GatewayOrderResponse, OrderResponse, PaymentConfigResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/payment/config",
    tag = "Payment",
    responses(
        (status = 200, description = "Public gateway configuration", body = ApiResponse<PaymentConfigResponse>)
    )
)]
pub async fn get_payment_config(
    Extension(service): Extension<DynCheckoutService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.payment_config().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/create-razorpay-order",
    tag = "Payment",
    security(("bearer_auth" = [])),
    request_body = CreateGatewayOrderRequest,
    responses(
        (status = 200, description = "Gateway order created, amount in paise", body = ApiResponse<GatewayOrderResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Cart empty or stock changed"),
        (status = 503, description = "Payment gateway unavailable")
    )
)]
pub async fn create_razorpay_order(
    Extension(service): Extension<DynCheckoutService>,
    Extension(user_id): Extension<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateGatewayOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_gateway_order(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/verify-razorpay-payment",
    tag = "Payment",
    security(("bearer_auth" = [])),
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, order created", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Signature mismatch"),
        (status = 404, description = "Checkout session not found or expired")
    )
)]
pub async fn verify_razorpay_payment(
    Extension(service): Extension<DynCheckoutService>,
    Extension(user_id): Extension<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.verify_payment(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/payment/config", get(get_payment_config))
        .layer(Extension(app_state.di_container.checkout_service.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/create-razorpay-order", post(create_razorpay_order))
        .route("/api/verify-razorpay-payment", post(verify_razorpay_payment))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.checkout_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
