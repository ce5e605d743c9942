use crate::middleware::{jwt::auth_middleware, validate::SimpleValidatedJson};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::DynCartService,
    domain::{
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added, cart returned", body = ApiResponse<CartResponse>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product unavailable or insufficient stock")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(user_id): Extension<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("product_id" = Uuid, Path, description = "Product id of the cart line")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated, cart returned", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart line not found"),
        (status = 409, description = "Insufficient stock")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(user_id): Extension<Uuid>,
    Path(product_id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.set_quantity(user_id, product_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("product_id" = Uuid, Path, description = "Product id of the cart line")),
    responses(
        (status = 200, description = "Item removed, cart returned", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart line not found")
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(user_id): Extension<Uuid>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_item(user_id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart emptied"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.clear(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/cart",
            get(get_cart).post(add_cart_item).delete(clear_cart),
        )
        .route(
            "/api/cart/{product_id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
