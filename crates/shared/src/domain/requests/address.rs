use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("pincode").with_message("Pincode must be exactly 6 digits".into()))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits >= 10 {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Phone must have at least 10 digits".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    #[schema(example = "Home")]
    pub label: Option<String>,

    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub recipient_name: String,

    #[validate(custom(function = validate_phone))]
    #[schema(example = "9876543210")]
    pub phone: String,

    #[validate(length(min = 1, message = "Address line is required"))]
    pub line1: String,

    pub line2: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(custom(function = validate_pincode))]
    #[schema(example = "682001")]
    pub pincode: String,

    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressRequest {
    #[serde(skip_deserializing)]
    pub address_id: Option<Uuid>,

    pub label: Option<String>,

    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub recipient_name: String,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    #[validate(length(min = 1, message = "Address line is required"))]
    pub line1: String,

    pub line2: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(custom(function = validate_pincode))]
    pub pincode: String,

    #[serde(default)]
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> CreateAddressRequest {
        CreateAddressRequest {
            label: Some("Home".into()),
            recipient_name: "Asha Nair".into(),
            phone: "9876543210".into(),
            line1: "14 Marine Drive".into(),
            line2: None,
            city: "Kochi".into(),
            state: "Kerala".into(),
            pincode: "682001".into(),
            is_default: false,
        }
    }

    #[test]
    fn accepts_well_formed_address() {
        assert!(valid_address().validate().is_ok());
    }

    #[test]
    fn pincode_must_be_exactly_six_digits() {
        for bad in ["68200", "6820011", "68200a", ""] {
            let mut req = valid_address();
            req.pincode = bad.into();
            assert!(req.validate().is_err(), "pincode '{bad}' should fail");
        }
    }

    #[test]
    fn phone_needs_ten_digits() {
        let mut req = valid_address();
        req.phone = "98765".into();
        assert!(req.validate().is_err());

        // separators are fine as long as ten digits remain
        req.phone = "+91 98765-43210".into();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_city_is_rejected() {
        let mut req = valid_address();
        req.city = String::new();
        assert!(req.validate().is_err());
    }
}
