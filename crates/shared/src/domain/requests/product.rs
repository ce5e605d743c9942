use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub category: Option<String>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Hydrating Night Cream")]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "skincare")]
    pub category: String,

    pub subcategory: Option<String>,

    /// List price in paise.
    #[validate(range(min = 1, message = "Price must be positive"))]
    #[schema(example = 249900)]
    pub price: i64,

    #[validate(range(min = 1, message = "Deal price must be positive"))]
    pub deal_price: Option<i64>,

    #[serde(default)]
    pub is_deal: bool,

    pub deal_expires_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(url(message = "Invalid URL format"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip_deserializing)]
    pub product_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub subcategory: Option<String>,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    #[validate(range(min = 1, message = "Deal price must be positive"))]
    pub deal_price: Option<i64>,

    #[serde(default)]
    pub is_deal: bool,

    pub deal_expires_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(url(message = "Invalid URL format"))]
    pub image_url: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
