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
    abstract_trait::DynAddressService,
    domain::{
        requests::{CreateAddressRequest, UpdateAddressRequest},
        responses::{AddressResponse, ApiResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/user/addresses",
    tag = "Address",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address book, default first", body = ApiResponse<Vec<AddressResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_addresses(
    Extension(service): Extension<DynAddressService>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/user/addresses",
    tag = "Address",
    security(("bearer_auth" = [])),
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address saved", body = ApiResponse<AddressResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_address(
    Extension(service): Extension<DynAddressService>,
    Extension(user_id): Extension<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateAddressRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_address(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/user/addresses/{id}",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<AddressResponse>),
        (status = 404, description = "Address not found")
    )
)]
pub async fn update_address(
    Extension(service): Extension<DynAddressService>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateAddressRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.address_id = Some(id);
    let response = service.update_address(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/user/addresses/{id}",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address removed"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn delete_address(
    Extension(service): Extension<DynAddressService>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_address(user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn address_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/user/addresses", get(get_addresses).post(create_address))
        .route(
            "/api/user/addresses/{id}",
            put(update_address).delete(delete_address),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.address_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
