use crate::{
    domain::{
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{CartItem, CartLine},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RepositoryError>;
    async fn upsert_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: i64,
    ) -> Result<CartItem, RepositoryError>;
    async fn set_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;
    async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), RepositoryError>;
    async fn clear(&self, user_id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, user_id: Uuid) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_item(
        &self,
        user_id: Uuid,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn set_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn clear(&self, user_id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
}
