use crate::model::UserAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AddressResponse {
    pub id: Uuid,
    pub label: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

impl From<UserAddress> for AddressResponse {
    fn from(value: UserAddress) -> Self {
        AddressResponse {
            id: value.address_id,
            label: value.label,
            recipient_name: value.recipient_name,
            phone: value.phone,
            line1: value.line1,
            line2: value.line2,
            city: value.city,
            state: value.state,
            pincode: value.pincode,
            is_default: value.is_default,
        }
    }
}
