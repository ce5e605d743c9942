use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeliveryAgent {
    pub agent_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub phone: String,
    pub vehicle_number: Option<String>,
    pub is_active: bool,
    pub total_deliveries: i32,
    pub completed_deliveries: i32,
    pub cancelled_deliveries: i32,
    pub rating: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
