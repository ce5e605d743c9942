use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::requests::address::validate_phone;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllAgents {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryAgentRequest {
    pub user_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Agent name is required"))]
    pub name: String,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    pub vehicle_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDeliveryAgentRequest {
    #[serde(skip_deserializing)]
    pub agent_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Agent name is required"))]
    pub name: String,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    pub vehicle_number: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
}

fn default_active() -> bool {
    true
}
