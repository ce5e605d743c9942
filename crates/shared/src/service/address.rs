use crate::{
    abstract_trait::{AddressServiceTrait, DynAddressRepository},
    domain::{
        requests::{CreateAddressRequest, UpdateAddressRequest},
        responses::{AddressResponse, ApiResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use uuid::Uuid;

pub struct AddressService {
    address_repository: DynAddressRepository,
}

impl AddressService {
    pub fn new(address_repository: DynAddressRepository) -> Self {
        Self { address_repository }
    }
}

#[async_trait]
impl AddressServiceTrait for AddressService {
    async fn find_all(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<AddressResponse>>, ServiceError> {
        let addresses = self.address_repository.find_all(user_id).await?;

        Ok(ApiResponse::success(
            "Addresses retrieved",
            addresses.into_iter().map(Into::into).collect(),
        ))
    }

    async fn create_address(
        &self,
        user_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let existing = self.address_repository.find_all(user_id).await?;

        // First address becomes the default even if the client didn't ask.
        let mut req = req.clone();
        if existing.is_empty() {
            req.is_default = true;
        }

        let address = self.address_repository.create_address(user_id, &req).await?;

        Ok(ApiResponse::success("Address saved", address.into()))
    }

    async fn update_address(
        &self,
        user_id: Uuid,
        req: &UpdateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let address = self.address_repository.update_address(user_id, req).await?;

        Ok(ApiResponse::success("Address updated", address.into()))
    }

    async fn delete_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<ApiResponse<()>, ServiceError> {
        self.address_repository
            .delete_address(address_id, user_id)
            .await?;

        Ok(ApiResponse::success("Address deleted", ()))
    }
}
