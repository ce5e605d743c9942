use crate::model::Product;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: i64,
    pub deal_price: Option<i64>,
    pub is_deal: bool,
    pub deal_expires_at: Option<String>,
    /// The price the customer actually pays right now, in paise.
    pub effective_price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let effective_price = value.effective_price(Utc::now());

        ProductResponse {
            id: value.product_id,
            name: value.name,
            description: value.description,
            category: value.category,
            subcategory: value.subcategory,
            price: value.price,
            deal_price: value.deal_price,
            is_deal: value.is_deal,
            deal_expires_at: value.deal_expires_at.map(|dt| dt.to_rfc3339()),
            effective_price,
            stock: value.stock,
            image_url: value.image_url,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: value.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponseDeleteAt {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Product> for ProductResponseDeleteAt {
    fn from(value: Product) -> Self {
        ProductResponseDeleteAt {
            id: value.product_id,
            name: value.name,
            category: value.category,
            price: value.price,
            stock: value.stock,
            created_at: value.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: value.updated_at.map(|dt| dt.to_rfc3339()),
            deleted_at: value.deleted_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
