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
    routing::{get, put},
};
use shared::{
    abstract_trait::DynDeliveryAgentService,
    config::Claims,
    domain::{
        requests::{CreateDeliveryAgentRequest, FindAllAgents, UpdateDeliveryAgentRequest},
        responses::{ApiResponse, ApiResponsePagination, DeliveryAgentResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/admin/delivery-agents",
    tag = "Delivery",
    security(("bearer_auth" = [])),
    params(FindAllAgents),
    responses(
        (status = 200, description = "Agent roster page", body = ApiResponsePagination<Vec<DeliveryAgentResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_agents(
    Extension(service): Extension<DynDeliveryAgentService>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<FindAllAgents>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/delivery-agents/{id}",
    tag = "Delivery",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Delivery agent id")),
    responses(
        (status = 200, description = "Agent detail", body = ApiResponse<DeliveryAgentResponse>),
        (status = 404, description = "Agent not found")
    )
)]
pub async fn get_agent(
    Extension(service): Extension<DynDeliveryAgentService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/delivery-agents",
    tag = "Delivery",
    security(("bearer_auth" = [])),
    request_body = CreateDeliveryAgentRequest,
    responses(
        (status = 200, description = "Agent registered", body = ApiResponse<DeliveryAgentResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_agent(
    Extension(service): Extension<DynDeliveryAgentService>,
    Extension(claims): Extension<Claims>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateDeliveryAgentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.create_agent(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/delivery-agents/{id}",
    tag = "Delivery",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Delivery agent id")),
    request_body = UpdateDeliveryAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = ApiResponse<DeliveryAgentResponse>),
        (status = 404, description = "Agent not found")
    )
)]
pub async fn update_agent(
    Extension(service): Extension<DynDeliveryAgentService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateDeliveryAgentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    body.agent_id = Some(id);
    let response = service.update_agent(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/delivery-agents/{id}",
    tag = "Delivery",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Delivery agent id")),
    responses(
        (status = 200, description = "Agent removed"),
        (status = 404, description = "Agent not found"),
        (status = 409, description = "Agent has an active order")
    )
)]
pub async fn delete_agent(
    Extension(service): Extension<DynDeliveryAgentService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_admin(&claims)?;

    let response = service.delete_agent(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn delivery_agent_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/admin/delivery-agents",
            get(get_agents).post(create_agent),
        )
        .route(
            "/api/admin/delivery-agents/{id}",
            get(get_agent).put(update_agent).delete(delete_agent),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(
            app_state.di_container.delivery_agent_service.clone(),
        ))
        .layer(Extension(app_state.jwt_config.clone()))
}
