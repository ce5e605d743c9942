use crate::middleware::{
    jwt::{auth_middleware, ensure_admin, ensure_delivery_staff},
    validate::SimpleValidatedJson,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::{DynCheckoutService, DynOrderCommandService, DynOrderQueryService},
    config::{Claims, ROLE_ADMIN},
    domain::{
        requests::{
            AssignDeliveryRequest, FindAllOrders, PlaceCodOrderRequest,
            UpdateDeliveryStatusRequest, UpdateOrderStatusRequest,
        },
        responses::{
            ApiResponse, ApiResponsePagination, OrderResponse, OrderStatusHistoryResponse,
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
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = PlaceCodOrderRequest,
    responses(
        (status = 200, description = "Cash-on-delivery order placed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error or unconfirmed COD"),
        (status = 409, description = "Cart empty or stock changed")
    )
)]
pub async fn place_cod_order(
    Extension(service): Extension<DynCheckoutService>,
    Extension(user_id): Extension<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<PlaceCodOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.place_cod_order(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "The caller's orders, newest first", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user_id): Extension<Uuid>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with item snapshots", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let is_admin = claims.role == ROLE_ADMIN;
    let response = service.find_by_id(id, claims.sub, is_admin).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/history",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Status trail, oldest first", body = ApiResponse<Vec<OrderStatusHistoryResponse>>),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order_history(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let is_admin = claims.role == ROLE_ADMIN;
    let response = service.find_history(id, claims.sub, is_admin).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/by-gateway/{gateway_order_id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("gateway_order_id" = String, Path, description = "Gateway order id returned at checkout")),
    responses(
        (status = 200, description = "Order materialized from this gateway order", body = ApiResponse<OrderResponse>),
        (status = 404, description = "No order yet for this gateway order")
    )
)]
pub async fn get_order_by_gateway(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user_id): Extension<Uuid>,
    Path(gateway_order_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .find_by_gateway_order_id(&gateway_order_id, user_id)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "All orders, filterable by status", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order moved to the requested status", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.update_status(id, &body, claims.sub).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/assign-delivery",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = AssignDeliveryRequest,
    responses(
        (status = 200, description = "Agent assigned to order", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order or agent not found"),
        (status = 409, description = "Order not ready or agent unavailable")
    )
)]
pub async fn assign_delivery(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<AssignDeliveryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.assign_delivery(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/delivery-status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateDeliveryStatusRequest,
    responses(
        (status = 200, description = "Delivery progress recorded", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "No assignment or transition not allowed")
    )
)]
pub async fn update_delivery_status(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateDeliveryStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_delivery_staff(&claims)?;

    let response = service.update_delivery_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", post(place_cod_order).get(get_my_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/history", get(get_order_history))
        .route(
            "/api/orders/by-gateway/{gateway_order_id}",
            get(get_order_by_gateway),
        )
        .route("/api/admin/orders", get(get_orders))
        .route("/api/admin/orders/{id}/status", put(update_order_status))
        .route(
            "/api/admin/orders/{id}/assign-delivery",
            put(assign_delivery),
        )
        .route(
            "/api/admin/orders/{id}/delivery-status",
            put(update_delivery_status),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.checkout_service.clone()))
        .layer(Extension(app_state.di_container.order_query_service.clone()))
        .layer(Extension(app_state.di_container.order_command_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
