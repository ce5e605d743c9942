use crate::{
    domain::{
        requests::{CreateDeliveryAgentRequest, FindAllAgents, UpdateDeliveryAgentRequest},
        responses::{ApiResponse, ApiResponsePagination, DeliveryAgentResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::DeliveryAgent,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynDeliveryAgentQueryRepository = Arc<dyn DeliveryAgentQueryRepositoryTrait + Send + Sync>;
pub type DynDeliveryAgentCommandRepository =
    Arc<dyn DeliveryAgentCommandRepositoryTrait + Send + Sync>;
pub type DynDeliveryAgentService = Arc<dyn DeliveryAgentServiceTrait + Send + Sync>;

#[async_trait]
pub trait DeliveryAgentQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllAgents,
    ) -> Result<(Vec<DeliveryAgent>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryAgent>, RepositoryError>;
    /// An agent can hold at most one order that is not yet delivered or
    /// cancelled.
    async fn has_active_assignment(&self, agent_id: Uuid) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait DeliveryAgentCommandRepositoryTrait {
    async fn create_agent(
        &self,
        req: &CreateDeliveryAgentRequest,
    ) -> Result<DeliveryAgent, RepositoryError>;
    async fn update_agent(
        &self,
        req: &UpdateDeliveryAgentRequest,
    ) -> Result<DeliveryAgent, RepositoryError>;
    async fn delete_agent(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait DeliveryAgentServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllAgents,
    ) -> Result<ApiResponsePagination<Vec<DeliveryAgentResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid)
    -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError>;
    async fn create_agent(
        &self,
        req: &CreateDeliveryAgentRequest,
    ) -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError>;
    async fn update_agent(
        &self,
        req: &UpdateDeliveryAgentRequest,
    ) -> Result<ApiResponse<DeliveryAgentResponse>, ServiceError>;
    async fn delete_agent(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
}
