use crate::{
    abstract_trait::{CartServiceTrait, DynCartRepository, DynProductQueryRepository},
    domain::{
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub struct CartService {
    cart_repository: DynCartRepository,
    product_query: DynProductQueryRepository,
}

impl CartService {
    pub fn new(cart_repository: DynCartRepository, product_query: DynProductQueryRepository) -> Self {
        Self {
            cart_repository,
            product_query,
        }
    }

    async fn cart_response(&self, user_id: Uuid) -> Result<CartResponse, ServiceError> {
        let lines = self.cart_repository.find_lines(user_id).await?;
        Ok(CartResponse::from_lines(lines))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, user_id: Uuid) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let cart = self.cart_response(user_id).await?;
        Ok(ApiResponse::success("Cart retrieved", cart))
    }

    async fn add_item(
        &self,
        user_id: Uuid,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {} not found", req.product_id)))?;

        if !product.is_active {
            return Err(ServiceError::StateConflict(
                "product is not available".to_string(),
            ));
        }

        if product.stock < req.quantity {
            return Err(ServiceError::StateConflict(format!(
                "only {} left in stock",
                product.stock
            )));
        }

        // The price is locked at add time and carried through to checkout.
        let unit_price = product.effective_price(Utc::now());

        self.cart_repository
            .upsert_item(user_id, req.product_id, req.quantity, unit_price)
            .await?;

        info!("🛒 User {} added product {} x{}", user_id, req.product_id, req.quantity);

        let cart = self.cart_response(user_id).await?;
        Ok(ApiResponse::success("Item added to cart", cart))
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let product = self
            .product_query
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {product_id} not found")))?;

        if !product.is_active {
            return Err(ServiceError::StateConflict(
                "product is not available".to_string(),
            ));
        }

        if product.stock < req.quantity {
            return Err(ServiceError::StateConflict(format!(
                "only {} left in stock",
                product.stock
            )));
        }

        self.cart_repository
            .set_quantity(user_id, product_id, req.quantity)
            .await?;

        let cart = self.cart_response(user_id).await?;
        Ok(ApiResponse::success("Cart updated", cart))
    }

    async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        self.cart_repository.remove_item(user_id, product_id).await?;

        let cart = self.cart_response(user_id).await?;
        Ok(ApiResponse::success("Item removed from cart", cart))
    }

    async fn clear(&self, user_id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        self.cart_repository.clear(user_id).await?;
        Ok(ApiResponse::success("Cart cleared", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{CartRepositoryTrait, ProductQueryRepositoryTrait},
        domain::requests::FindAllProducts,
        errors::RepositoryError,
        model::{CartItem, CartLine, Product},
    };
    use std::sync::{Arc, Mutex};

    struct OneProduct {
        product: Product,
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for OneProduct {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            Ok((vec![self.product.clone()], 1))
        }

        async fn find_trashed(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
            Ok(Some(self.product.clone()).filter(|p| p.product_id == id))
        }
    }

    #[derive(Default)]
    struct RecordingCart {
        writes: Mutex<u32>,
    }

    fn cart_item(user_id: Uuid, product_id: Uuid, quantity: i32, unit_price: i64) -> CartItem {
        CartItem {
            cart_item_id: Uuid::new_v4(),
            user_id,
            product_id,
            quantity,
            unit_price,
            created_at: None,
            updated_at: None,
        }
    }

    #[async_trait]
    impl CartRepositoryTrait for RecordingCart {
        async fn find_lines(&self, _user_id: Uuid) -> Result<Vec<CartLine>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn upsert_item(
            &self,
            user_id: Uuid,
            product_id: Uuid,
            quantity: i32,
            unit_price: i64,
        ) -> Result<CartItem, RepositoryError> {
            *self.writes.lock().unwrap() += 1;
            Ok(cart_item(user_id, product_id, quantity, unit_price))
        }

        async fn set_quantity(
            &self,
            user_id: Uuid,
            product_id: Uuid,
            quantity: i32,
        ) -> Result<CartItem, RepositoryError> {
            *self.writes.lock().unwrap() += 1;
            Ok(cart_item(user_id, product_id, quantity, 0))
        }

        async fn remove_item(
            &self,
            _user_id: Uuid,
            _product_id: Uuid,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn clear(&self, _user_id: Uuid) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn product(is_active: bool, stock: i32) -> Product {
        Product {
            product_id: Uuid::new_v4(),
            name: "Vitamin C Serum".into(),
            description: None,
            category: "skincare".into(),
            subcategory: None,
            price: 249_900,
            deal_price: None,
            is_deal: false,
            deal_expires_at: None,
            stock,
            image_url: None,
            is_active,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn service_over(product: Product) -> (CartService, Arc<RecordingCart>) {
        let cart = Arc::new(RecordingCart::default());
        let service = CartService::new(cart.clone(), Arc::new(OneProduct { product }));
        (service, cart)
    }

    #[tokio::test]
    async fn retired_product_cannot_be_requantified() {
        let product = product(false, 10);
        let product_id = product.product_id;
        let (service, cart) = service_over(product);

        let req = UpdateCartItemRequest { quantity: 2 };

        assert!(matches!(
            service.set_quantity(Uuid::new_v4(), product_id, &req).await,
            Err(ServiceError::StateConflict(_))
        ));
        assert_eq!(*cart.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn quantity_is_capped_by_stock() {
        let product = product(true, 3);
        let product_id = product.product_id;
        let (service, cart) = service_over(product);

        let req = UpdateCartItemRequest { quantity: 5 };

        assert!(matches!(
            service.set_quantity(Uuid::new_v4(), product_id, &req).await,
            Err(ServiceError::StateConflict(_))
        ));
        assert_eq!(*cart.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn quantity_update_within_stock_lands() {
        let product = product(true, 10);
        let product_id = product.product_id;
        let (service, cart) = service_over(product);

        let req = UpdateCartItemRequest { quantity: 4 };

        assert!(
            service
                .set_quantity(Uuid::new_v4(), product_id, &req)
                .await
                .is_ok()
        );
        assert_eq!(*cart.writes.lock().unwrap(), 1);
    }
}
