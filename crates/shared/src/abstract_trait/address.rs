use crate::{
    domain::{
        requests::{CreateAddressRequest, UpdateAddressRequest},
        responses::{AddressResponse, ApiResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::UserAddress,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynAddressRepository = Arc<dyn AddressRepositoryTrait + Send + Sync>;
pub type DynAddressService = Arc<dyn AddressServiceTrait + Send + Sync>;

#[async_trait]
pub trait AddressRepositoryTrait {
    async fn find_all(&self, user_id: Uuid) -> Result<Vec<UserAddress>, RepositoryError>;
    async fn find_by_id(
        &self,
        address_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<UserAddress>, RepositoryError>;
    async fn find_default(&self, user_id: Uuid) -> Result<Option<UserAddress>, RepositoryError>;
    async fn create_address(
        &self,
        user_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<UserAddress, RepositoryError>;
    async fn update_address(
        &self,
        user_id: Uuid,
        req: &UpdateAddressRequest,
    ) -> Result<UserAddress, RepositoryError>;
    async fn delete_address(&self, address_id: Uuid, user_id: Uuid)
    -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait AddressServiceTrait {
    async fn find_all(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<AddressResponse>>, ServiceError>;
    async fn create_address(
        &self,
        user_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn update_address(
        &self,
        user_id: Uuid,
        req: &UpdateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn delete_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
