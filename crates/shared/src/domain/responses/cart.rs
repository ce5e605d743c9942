use crate::model::CartLine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub image_url: Option<String>,
    pub quantity: i32,
    /// Unit price resolved when the item entered the cart, in paise.
    pub unit_price: i64,
    pub line_total: i64,
    pub in_stock: bool,
}

impl From<CartLine> for CartItemResponse {
    fn from(value: CartLine) -> Self {
        CartItemResponse {
            id: value.cart_item_id,
            product_id: value.product_id,
            product_name: value.product_name,
            image_url: value.image_url,
            quantity: value.quantity,
            unit_price: value.unit_price,
            line_total: value.unit_price * value.quantity as i64,
            in_stock: value.is_active && value.stock >= value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: i64,
}

impl CartResponse {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let items: Vec<CartItemResponse> = lines.into_iter().map(Into::into).collect();
        let subtotal = items.iter().map(|i| i.line_total).sum();

        CartResponse { items, subtotal }
    }
}
