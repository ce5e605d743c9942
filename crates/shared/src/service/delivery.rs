use crate::{
    abstract_trait::{
        DeliveryAgentServiceTrait, DynDeliveryAgentCommandRepository,
        DynDeliveryAgentQueryRepository,
    },
    domain::{
        requests::{CreateDeliveryAgentRequest, FindAllAgents, UpdateDeliveryAgentRequest},
        responses::{ApiResponse, ApiResponsePagination, DeliveryAgentResponse, Pagination},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

pub struct DeliveryAgentService {
    query: DynDeliveryAgentQueryRepository,
    command: DynDeliveryAgentCommandRepository,
}

impl DeliveryAgentService {
    pub fn new(
        query: DynDeliveryAgentQueryRepository,
        command: DynDeliveryAgentCommandRepository,
    ) -> Self {
        Self { query, command }
    }
}

#[async_trait]
impl DeliveryAgentServiceTrait for DeliveryAgentService {
    async fn find_all(
        &self,
        req: &FindAllAgents,
    ) -> Result<ApiResponsePagination<Vec<DeliveryAgentResponse>>, ServiceError> {
        let (agents, total) = self.query.find_all(req).await?;

        let data: Vec<DeliveryAgentResponse> = agents.into_iter().map(Into::into).collect();

        Ok(ApiResponsePagination::success(
            "Delivery agents retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError> {
        let agent = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("delivery agent {id} not found")))?;

        Ok(ApiResponse::success("Delivery agent retrieved", agent.into()))
    }

    async fn create_agent(
        &self,
        req: &CreateDeliveryAgentRequest,
    ) -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError> {
        let agent = self.command.create_agent(req).await?;

        info!("🚚 Delivery agent {} registered", agent.name);
        Ok(ApiResponse::success("Delivery agent created", agent.into()))
    }

    async fn update_agent(
        &self,
        req: &UpdateDeliveryAgentRequest,
    ) -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError> {
        let agent = self.command.update_agent(req).await?;

        Ok(ApiResponse::success("Delivery agent updated", agent.into()))
    }

    async fn delete_agent(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        // An agent holding an undelivered order cannot disappear from the
        // roster mid-route.
        if self.query.has_active_assignment(id).await? {
            return Err(ServiceError::StateConflict(
                "delivery agent has an active order".to_string(),
            ));
        }

        self.command.delete_agent(id).await?;

        Ok(ApiResponse::success("Delivery agent deleted", ()))
    }
}
