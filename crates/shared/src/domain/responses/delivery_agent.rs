use crate::model::DeliveryAgent;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct DeliveryAgentResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub vehicle_number: Option<String>,
    pub is_active: bool,
    pub total_deliveries: i32,
    pub completed_deliveries: i32,
    pub cancelled_deliveries: i32,
    pub rating: f64,
}

impl From<DeliveryAgent> for DeliveryAgentResponse {
    fn from(value: DeliveryAgent) -> Self {
        DeliveryAgentResponse {
            id: value.agent_id,
            name: value.name,
            phone: value.phone,
            vehicle_number: value.vehicle_number,
            is_active: value.is_active,
            total_deliveries: value.total_deliveries,
            completed_deliveries: value.completed_deliveries,
            cancelled_deliveries: value.cancelled_deliveries,
            rating: value.rating,
        }
    }
}
