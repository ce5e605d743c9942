use crate::{
    abstract_trait::{
        CheckoutServiceTrait, DynAddressRepository, DynCartRepository, DynCouponQueryRepository,
        DynOrderCommandRepository, DynPaymentGateway, DynProductQueryRepository,
        DynUserRepository, NewOrder, NewOrderItem,
    },
    cache::{CheckoutSession, DynCheckoutSessionStore},
    config::PaymentConfig,
    domain::{
        requests::{
            CheckoutSource, CreateAddressRequest, CreateGatewayOrderRequest, PlaceCodOrderRequest,
            VerifyPaymentRequest,
        },
        responses::{ApiResponse, GatewayOrderResponse, OrderResponse, PaymentConfigResponse},
    },
    errors::ServiceError,
    model::{PaymentMethod, PaymentStatus},
    service::coupon::evaluate_coupon,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Shipping destination resolved for one checkout, flattened to the snapshot
/// fields stored on the order.
struct ResolvedAddress {
    recipient_name: String,
    phone: String,
    shipping_address: String,
    pincode: String,
}

pub struct CheckoutService {
    product_query: DynProductQueryRepository,
    cart_repository: DynCartRepository,
    coupon_query: DynCouponQueryRepository,
    address_repository: DynAddressRepository,
    user_repository: DynUserRepository,
    order_command: DynOrderCommandRepository,
    gateway: DynPaymentGateway,
    sessions: DynCheckoutSessionStore,
    config: PaymentConfig,
}

impl CheckoutService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product_query: DynProductQueryRepository,
        cart_repository: DynCartRepository,
        coupon_query: DynCouponQueryRepository,
        address_repository: DynAddressRepository,
        user_repository: DynUserRepository,
        order_command: DynOrderCommandRepository,
        gateway: DynPaymentGateway,
        sessions: DynCheckoutSessionStore,
        config: PaymentConfig,
    ) -> Self {
        Self {
            product_query,
            cart_repository,
            coupon_query,
            address_repository,
            user_repository,
            order_command,
            gateway,
            sessions,
            config,
        }
    }

    /// Prices the order server-side: loads the items from the chosen source,
    /// checks availability, and returns the line snapshots plus subtotal.
    async fn resolve_items(
        &self,
        user_id: Uuid,
        source: CheckoutSource,
        buy_now: Option<&crate::domain::requests::BuyNowItem>,
    ) -> Result<(Vec<NewOrderItem>, i64), ServiceError> {
        let items = match source {
            CheckoutSource::Cart => {
                let lines = self.cart_repository.find_lines(user_id).await?;

                if lines.is_empty() {
                    return Err(ServiceError::Validation(vec!["Cart is empty".to_string()]));
                }

                for line in &lines {
                    if !line.is_active {
                        return Err(ServiceError::StateConflict(format!(
                            "{} is no longer available",
                            line.product_name
                        )));
                    }
                    if line.stock < line.quantity {
                        return Err(ServiceError::StateConflict(format!(
                            "only {} of {} left in stock",
                            line.stock, line.product_name
                        )));
                    }
                }

                lines
                    .into_iter()
                    .map(|line| NewOrderItem {
                        product_id: line.product_id,
                        product_name: line.product_name,
                        image_url: line.image_url,
                        unit_price: line.unit_price,
                        quantity: line.quantity,
                    })
                    .collect()
            }
            CheckoutSource::BuyNow => {
                let item = buy_now.ok_or_else(|| {
                    ServiceError::Validation(vec![
                        "buy_now item is required for this source".to_string(),
                    ])
                })?;

                let product = self
                    .product_query
                    .find_by_id(item.product_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("product {} not found", item.product_id))
                    })?;

                if !product.is_active {
                    return Err(ServiceError::StateConflict(
                        "product is not available".to_string(),
                    ));
                }
                if product.stock < item.quantity {
                    return Err(ServiceError::StateConflict(format!(
                        "only {} left in stock",
                        product.stock
                    )));
                }

                vec![NewOrderItem {
                    product_id: product.product_id,
                    unit_price: product.effective_price(Utc::now()),
                    product_name: product.name,
                    image_url: product.image_url,
                    quantity: item.quantity,
                }]
            }
        };

        let subtotal = items
            .iter()
            .map(|i| i.unit_price * i.quantity as i64)
            .sum();

        Ok((items, subtotal))
    }

    async fn resolve_address(
        &self,
        user_id: Uuid,
        address_id: Option<Uuid>,
        inline: Option<&CreateAddressRequest>,
        save_address: bool,
    ) -> Result<ResolvedAddress, ServiceError> {
        let stored = match (address_id, inline) {
            (Some(id), _) => Some(
                self.address_repository
                    .find_by_id(id, user_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("address {id} not found")))?,
            ),
            (None, Some(req)) => {
                req.validate()
                    .map_err(|e| ServiceError::Validation(vec![e.to_string()]))?;

                if save_address {
                    Some(self.address_repository.create_address(user_id, req).await?)
                } else {
                    return Ok(ResolvedAddress {
                        recipient_name: req.recipient_name.clone(),
                        phone: req.phone.clone(),
                        shipping_address: format_address_lines(
                            &req.line1,
                            req.line2.as_deref(),
                            &req.city,
                            &req.state,
                        ),
                        pincode: req.pincode.clone(),
                    });
                }
            }
            (None, None) => self.address_repository.find_default(user_id).await?,
        };

        let address = stored.ok_or_else(|| {
            ServiceError::Validation(vec!["A shipping address is required".to_string()])
        })?;

        Ok(ResolvedAddress {
            recipient_name: address.recipient_name,
            phone: address.phone,
            shipping_address: format_address_lines(
                &address.line1,
                address.line2.as_deref(),
                &address.city,
                &address.state,
            ),
            pincode: address.pincode,
        })
    }

    async fn resolve_discount(
        &self,
        coupon_code: Option<&str>,
        subtotal: i64,
    ) -> Result<(Option<String>, i64), ServiceError> {
        let Some(code) = coupon_code else {
            return Ok((None, 0));
        };

        let normalized = code.trim().to_uppercase();

        let coupon = self
            .coupon_query
            .find_by_code(&normalized)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("coupon {normalized} not found")))?;

        let discount = evaluate_coupon(&coupon, subtotal, Utc::now())?;

        Ok((Some(coupon.code), discount))
    }

    /// Assembles the full priced snapshot that both payment paths share.
    #[allow(clippy::too_many_arguments)]
    async fn build_session(
        &self,
        user_id: Uuid,
        source: CheckoutSource,
        buy_now: Option<&crate::domain::requests::BuyNowItem>,
        coupon_code: Option<&str>,
        address_id: Option<Uuid>,
        inline_address: Option<&CreateAddressRequest>,
        save_address: bool,
    ) -> Result<CheckoutSession, ServiceError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id} not found")))?;

        let (items, subtotal) = self.resolve_items(user_id, source, buy_now).await?;
        let address = self
            .resolve_address(user_id, address_id, inline_address, save_address)
            .await?;
        let (coupon_code, discount) = self.resolve_discount(coupon_code, subtotal).await?;

        Ok(CheckoutSession {
            user_id,
            source,
            items,
            customer_name: address.recipient_name,
            customer_phone: address.phone,
            customer_email: Some(user.email),
            shipping_address: address.shipping_address,
            pincode: address.pincode,
            subtotal,
            discount,
            coupon_code,
            total: subtotal - discount,
        })
    }

    async fn finish_order(
        &self,
        session_source: CheckoutSource,
        user_id: Uuid,
        new_order: &NewOrder,
    ) -> Result<OrderResponse, ServiceError> {
        let order = self.order_command.create_order(new_order).await?;

        // Buy-now checkouts never touch the cart.
        if session_source == CheckoutSource::Cart {
            self.cart_repository.clear(user_id).await?;
        }

        Ok(OrderResponse::from_order(order, Vec::new()))
    }
}

fn format_address_lines(line1: &str, line2: Option<&str>, city: &str, state: &str) -> String {
    match line2 {
        Some(l2) if !l2.trim().is_empty() => format!("{line1}, {l2}, {city}, {state}"),
        _ => format!("{line1}, {city}, {state}"),
    }
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn payment_config(&self) -> Result<ApiResponse<PaymentConfigResponse>, ServiceError> {
        Ok(ApiResponse::success(
            "Payment configuration",
            PaymentConfigResponse {
                key_id: self.config.key_id.clone(),
                currency: self.config.currency.clone(),
                mock_mode: self.config.mock_mode,
            },
        ))
    }

    async fn create_gateway_order(
        &self,
        user_id: Uuid,
        req: &CreateGatewayOrderRequest,
    ) -> Result<ApiResponse<GatewayOrderResponse>, ServiceError> {
        let session = self
            .build_session(
                user_id,
                req.source,
                req.buy_now.as_ref(),
                req.coupon_code.as_deref(),
                req.address_id,
                req.address.as_ref(),
                req.save_address,
            )
            .await?;

        let receipt = format!("rcpt_{}", Uuid::new_v4().simple());
        let gateway_order = self
            .gateway
            .create_order(session.total, &self.config.currency, &receipt)
            .await?;

        if !self.sessions.store(&gateway_order.id, &session).await {
            return Err(ServiceError::Internal(
                "failed to persist checkout session".to_string(),
            ));
        }

        info!(
            "💳 Checkout for user {} awaiting payment on {}",
            user_id, gateway_order.id
        );

        Ok(ApiResponse::success(
            "Gateway order created",
            GatewayOrderResponse {
                gateway_order_id: gateway_order.id,
                amount: gateway_order.amount,
                currency: gateway_order.currency,
                key_id: self.config.key_id.clone(),
            },
        ))
    }

    async fn verify_payment(
        &self,
        user_id: Uuid,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        if !self.gateway.verify_signature(
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        ) {
            warn!(
                "🚫 Signature rejected for gateway order {}",
                req.razorpay_order_id
            );
            return Err(ServiceError::Forbidden(
                "payment signature verification failed".to_string(),
            ));
        }

        let session = self
            .sessions
            .take(&req.razorpay_order_id)
            .await
            .ok_or_else(|| {
                ServiceError::NotFound("checkout session not found or expired".to_string())
            })?;

        if session.user_id != user_id {
            // Put the snapshot back so the rightful owner can still redeem it.
            self.sessions.store(&req.razorpay_order_id, &session).await;
            warn!(
                "🚫 Gateway order {} presented by the wrong user",
                req.razorpay_order_id
            );
            return Err(ServiceError::Forbidden(
                "checkout session belongs to another user".to_string(),
            ));
        }

        let source = session.source;
        let new_order = session.into_new_order(
            req.razorpay_order_id.clone(),
            req.razorpay_payment_id.clone(),
        );

        let response = self.finish_order(source, user_id, &new_order).await?;

        info!("✅ Payment verified, order {} created", response.order_number);
        Ok(ApiResponse::success("Payment verified", response))
    }

    async fn place_cod_order(
        &self,
        user_id: Uuid,
        req: &PlaceCodOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        if !req.confirmed {
            return Err(ServiceError::Validation(vec![
                "Cash-on-delivery orders must be confirmed".to_string(),
            ]));
        }

        let session = self
            .build_session(
                user_id,
                req.source,
                req.buy_now.as_ref(),
                req.coupon_code.as_deref(),
                req.address_id,
                req.address.as_ref(),
                req.save_address,
            )
            .await?;

        let new_order = NewOrder {
            user_id,
            customer_name: session.customer_name.clone(),
            customer_phone: session.customer_phone.clone(),
            customer_email: session.customer_email.clone(),
            shipping_address: session.shipping_address.clone(),
            pincode: session.pincode.clone(),
            subtotal: session.subtotal,
            discount: session.discount,
            coupon_code: session.coupon_code.clone(),
            total: session.total,
            payment_method: PaymentMethod::Cod.as_str().to_string(),
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            gateway_order_id: None,
            gateway_payment_id: None,
            items: session.items.clone(),
        };

        let response = self.finish_order(session.source, user_id, &new_order).await?;

        info!("📦 COD order {} placed", response.order_number);
        Ok(ApiResponse::success("Order placed", response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            AddressRepositoryTrait, CartRepositoryTrait, CouponQueryRepositoryTrait,
            OrderCommandRepositoryTrait, ProductQueryRepositoryTrait, UserRepositoryTrait,
        },
        cache::CheckoutSessionStoreTrait,
        domain::requests::{
            BuyNowItem, FindAllCoupons, FindAllProducts, RegisterRequest, UpdateAddressRequest,
        },
        errors::RepositoryError,
        gateway::{MockGateway, sign_payment},
        model::{
            CartItem, CartLine, Coupon, DeliveryStatus, Order, OrderStatus, Product, User,
            UserAddress,
        },
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct FakeProducts {
        products: HashMap<Uuid, Product>,
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for FakeProducts {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            Ok((self.products.values().cloned().collect(), 0))
        }

        async fn find_trashed(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
            Ok(self.products.get(&id).cloned())
        }
    }

    #[derive(Default)]
    struct FakeCart {
        lines: Mutex<Vec<CartLine>>,
    }

    #[async_trait]
    impl CartRepositoryTrait for FakeCart {
        async fn find_lines(&self, _user_id: Uuid) -> Result<Vec<CartLine>, RepositoryError> {
            Ok(self.lines.lock().unwrap().clone())
        }

        async fn upsert_item(
            &self,
            _user_id: Uuid,
            _product_id: Uuid,
            _quantity: i32,
            _unit_price: i64,
        ) -> Result<CartItem, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn set_quantity(
            &self,
            _user_id: Uuid,
            _product_id: Uuid,
            _quantity: i32,
        ) -> Result<CartItem, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn remove_item(
            &self,
            _user_id: Uuid,
            _product_id: Uuid,
        ) -> Result<(), RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn clear(&self, _user_id: Uuid) -> Result<(), RepositoryError> {
            self.lines.lock().unwrap().clear();
            Ok(())
        }
    }

    struct FakeCoupons {
        coupons: Vec<Coupon>,
    }

    #[async_trait]
    impl CouponQueryRepositoryTrait for FakeCoupons {
        async fn find_all(
            &self,
            _req: &FindAllCoupons,
        ) -> Result<(Vec<Coupon>, i64), RepositoryError> {
            Ok((self.coupons.clone(), self.coupons.len() as i64))
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
            Ok(self.coupons.iter().find(|c| c.code == code).cloned())
        }
    }

    struct FakeAddresses {
        default: Option<UserAddress>,
    }

    #[async_trait]
    impl AddressRepositoryTrait for FakeAddresses {
        async fn find_all(&self, _user_id: Uuid) -> Result<Vec<UserAddress>, RepositoryError> {
            Ok(self.default.clone().into_iter().collect())
        }

        async fn find_by_id(
            &self,
            address_id: Uuid,
            _user_id: Uuid,
        ) -> Result<Option<UserAddress>, RepositoryError> {
            Ok(self
                .default
                .clone()
                .filter(|a| a.address_id == address_id))
        }

        async fn find_default(
            &self,
            _user_id: Uuid,
        ) -> Result<Option<UserAddress>, RepositoryError> {
            Ok(self.default.clone())
        }

        async fn create_address(
            &self,
            _user_id: Uuid,
            _req: &CreateAddressRequest,
        ) -> Result<UserAddress, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn update_address(
            &self,
            _user_id: Uuid,
            _req: &UpdateAddressRequest,
        ) -> Result<UserAddress, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn delete_address(
            &self,
            _address_id: Uuid,
            _user_id: Uuid,
        ) -> Result<(), RepositoryError> {
            unimplemented!("not exercised")
        }
    }

    struct FakeUsers {
        user: User,
    }

    #[async_trait]
    impl UserRepositoryTrait for FakeUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
            Ok(Some(self.user.clone()).filter(|u| u.user_id == id))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(Some(self.user.clone()).filter(|u| u.email == email))
        }

        async fn create_user(
            &self,
            _req: &RegisterRequest,
            _password_hash: &str,
        ) -> Result<User, RepositoryError> {
            unimplemented!("not exercised")
        }
    }

    #[derive(Default)]
    struct FakeOrderCommand {
        created: Mutex<Vec<NewOrder>>,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeOrderCommand {
        async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
            self.created.lock().unwrap().push(order.clone());

            Ok(Order {
                order_id: Uuid::new_v4(),
                order_number: "ORD-TEST000001".into(),
                user_id: order.user_id,
                customer_name: order.customer_name.clone(),
                customer_phone: order.customer_phone.clone(),
                customer_email: order.customer_email.clone(),
                shipping_address: order.shipping_address.clone(),
                pincode: order.pincode.clone(),
                subtotal: order.subtotal,
                discount: order.discount,
                coupon_code: order.coupon_code.clone(),
                total: order.total,
                payment_method: order.payment_method.clone(),
                payment_status: order.payment_status.clone(),
                gateway_order_id: order.gateway_order_id.clone(),
                gateway_payment_id: order.gateway_payment_id.clone(),
                status: if order.payment_status == "paid" {
                    "confirmed".into()
                } else {
                    "pending".into()
                },
                delivery_agent_id: None,
                delivery_status: None,
                created_at: None,
                updated_at: None,
            })
        }

        async fn update_status(
            &self,
            _order_id: Uuid,
            _from: OrderStatus,
            _to: OrderStatus,
            _notes: Option<&str>,
            _changed_by: Option<Uuid>,
        ) -> Result<Order, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn assign_delivery(
            &self,
            _order_id: Uuid,
            _agent_id: Uuid,
        ) -> Result<Order, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn update_delivery_status(
            &self,
            _order_id: Uuid,
            _from: DeliveryStatus,
            _to: DeliveryStatus,
        ) -> Result<Order, RepositoryError> {
            unimplemented!("not exercised")
        }
    }

    #[derive(Default)]
    struct MemorySessions {
        map: Mutex<HashMap<String, CheckoutSession>>,
    }

    #[async_trait]
    impl CheckoutSessionStoreTrait for MemorySessions {
        async fn store(&self, gateway_order_id: &str, session: &CheckoutSession) -> bool {
            self.map
                .lock()
                .unwrap()
                .insert(gateway_order_id.to_string(), session.clone());
            true
        }

        async fn take(&self, gateway_order_id: &str) -> Option<CheckoutSession> {
            self.map.lock().unwrap().remove(gateway_order_id)
        }
    }

    fn product(id: Uuid, price: i64, stock: i32) -> Product {
        Product {
            product_id: id,
            name: "Vitamin C Serum".into(),
            description: None,
            category: "skincare".into(),
            subcategory: None,
            price,
            deal_price: None,
            is_deal: false,
            deal_expires_at: None,
            stock,
            image_url: None,
            is_active: true,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn address() -> UserAddress {
        UserAddress {
            address_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            label: Some("Home".into()),
            recipient_name: "Asha Nair".into(),
            phone: "9876543210".into(),
            line1: "14 Marine Drive".into(),
            line2: None,
            city: "Kochi".into(),
            state: "Kerala".into(),
            pincode: "682001".into(),
            is_default: true,
            created_at: None,
            updated_at: None,
        }
    }

    struct Harness {
        service: CheckoutService,
        user_id: Uuid,
        product_id: Uuid,
        orders: Arc<FakeOrderCommand>,
        cart: Arc<FakeCart>,
    }

    fn harness(cart_lines: Vec<CartLine>, coupons: Vec<Coupon>) -> Harness {
        harness_with(cart_lines, coupons, Some(address()))
    }

    fn harness_with(
        cart_lines: Vec<CartLine>,
        coupons: Vec<Coupon>,
        default_address: Option<UserAddress>,
    ) -> Harness {
        let user_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();

        let user = User {
            user_id,
            name: "Asha Nair".into(),
            email: "asha@example.com".into(),
            password: "hash".into(),
            role: "customer".into(),
            phone: Some("9876543210".into()),
            created_at: None,
            updated_at: None,
        };

        let mut products = HashMap::new();
        products.insert(product_id, product(product_id, 249_900, 10));

        let cart = Arc::new(FakeCart {
            lines: Mutex::new(cart_lines),
        });
        let orders = Arc::new(FakeOrderCommand::default());

        let config = PaymentConfig {
            key_id: "rzp_test_mock".into(),
            key_secret: "mock_secret".into(),
            currency: "INR".into(),
            mock_mode: true,
            api_base: "https://api.razorpay.com".into(),
        };

        let service = CheckoutService::new(
            Arc::new(FakeProducts { products }),
            cart.clone(),
            Arc::new(FakeCoupons { coupons }),
            Arc::new(FakeAddresses {
                default: default_address,
            }),
            Arc::new(FakeUsers { user }),
            orders.clone(),
            Arc::new(MockGateway::new("mock_secret".into())),
            Arc::new(MemorySessions::default()),
            config,
        );

        Harness {
            service,
            user_id,
            product_id,
            orders,
            cart,
        }
    }

    fn buy_now_request(product_id: Uuid) -> CreateGatewayOrderRequest {
        CreateGatewayOrderRequest {
            source: CheckoutSource::BuyNow,
            buy_now: Some(BuyNowItem {
                product_id,
                quantity: 1,
            }),
            coupon_code: None,
            address_id: None,
            address: None,
            save_address: false,
        }
    }

    #[tokio::test]
    async fn cod_requires_confirmation() {
        let h = harness(Vec::new(), Vec::new());

        let req = PlaceCodOrderRequest {
            source: CheckoutSource::BuyNow,
            buy_now: Some(BuyNowItem {
                product_id: h.product_id,
                quantity: 1,
            }),
            coupon_code: None,
            address_id: None,
            address: None,
            save_address: false,
            confirmed: false,
        };

        assert!(matches!(
            h.service.place_cod_order(h.user_id, &req).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn confirmed_cod_order_is_pending_payment() {
        let h = harness(Vec::new(), Vec::new());

        let req = PlaceCodOrderRequest {
            source: CheckoutSource::BuyNow,
            buy_now: Some(BuyNowItem {
                product_id: h.product_id,
                quantity: 2,
            }),
            coupon_code: None,
            address_id: None,
            address: None,
            save_address: false,
            confirmed: true,
        };

        let response = h.service.place_cod_order(h.user_id, &req).await.unwrap();

        assert_eq!(response.data.payment_method, "cod");
        assert_eq!(response.data.payment_status, "pending");
        assert_eq!(response.data.total, 499_800);
        assert_eq!(h.orders.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_round_trip_creates_the_order() {
        let h = harness(Vec::new(), Vec::new());

        let created = h
            .service
            .create_gateway_order(h.user_id, &buy_now_request(h.product_id))
            .await
            .unwrap();

        let gateway_order_id = created.data.gateway_order_id.clone();
        assert_eq!(created.data.amount, 249_900);

        let verify = VerifyPaymentRequest {
            razorpay_order_id: gateway_order_id.clone(),
            razorpay_payment_id: "pay_123".into(),
            razorpay_signature: sign_payment("mock_secret", &gateway_order_id, "pay_123"),
        };

        let order = h.service.verify_payment(h.user_id, &verify).await.unwrap();

        assert_eq!(order.data.payment_status, "paid");
        assert_eq!(order.data.gateway_order_id, Some(gateway_order_id));
        assert_eq!(h.orders.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_and_session_survives() {
        let h = harness(Vec::new(), Vec::new());

        let created = h
            .service
            .create_gateway_order(h.user_id, &buy_now_request(h.product_id))
            .await
            .unwrap();

        let gateway_order_id = created.data.gateway_order_id.clone();

        let verify = VerifyPaymentRequest {
            razorpay_order_id: gateway_order_id.clone(),
            razorpay_payment_id: "pay_123".into(),
            razorpay_signature: "deadbeef".into(),
        };

        assert!(matches!(
            h.service.verify_payment(h.user_id, &verify).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(h.orders.created.lock().unwrap().is_empty());

        // A correct signature still redeems the untouched session.
        let verify = VerifyPaymentRequest {
            razorpay_order_id: gateway_order_id.clone(),
            razorpay_payment_id: "pay_123".into(),
            razorpay_signature: sign_payment("mock_secret", &gateway_order_id, "pay_123"),
        };
        assert!(h.service.verify_payment(h.user_id, &verify).await.is_ok());
    }

    #[tokio::test]
    async fn session_cannot_be_redeemed_twice() {
        let h = harness(Vec::new(), Vec::new());

        let created = h
            .service
            .create_gateway_order(h.user_id, &buy_now_request(h.product_id))
            .await
            .unwrap();

        let gateway_order_id = created.data.gateway_order_id.clone();
        let verify = VerifyPaymentRequest {
            razorpay_order_id: gateway_order_id.clone(),
            razorpay_payment_id: "pay_123".into(),
            razorpay_signature: sign_payment("mock_secret", &gateway_order_id, "pay_123"),
        };

        assert!(h.service.verify_payment(h.user_id, &verify).await.is_ok());
        assert!(matches!(
            h.service.verify_payment(h.user_id, &verify).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn another_users_attempt_does_not_burn_the_session() {
        let h = harness(Vec::new(), Vec::new());

        let created = h
            .service
            .create_gateway_order(h.user_id, &buy_now_request(h.product_id))
            .await
            .unwrap();

        let gateway_order_id = created.data.gateway_order_id.clone();
        let verify = VerifyPaymentRequest {
            razorpay_order_id: gateway_order_id.clone(),
            razorpay_payment_id: "pay_123".into(),
            razorpay_signature: sign_payment("mock_secret", &gateway_order_id, "pay_123"),
        };

        assert!(matches!(
            h.service.verify_payment(Uuid::new_v4(), &verify).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(h.orders.created.lock().unwrap().is_empty());

        // The owner can still redeem the snapshot afterwards.
        assert!(h.service.verify_payment(h.user_id, &verify).await.is_ok());
        assert_eq!(h.orders.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cart_checkout_applies_coupon_and_clears_cart() {
        let product_id = Uuid::new_v4();
        let line = CartLine {
            cart_item_id: Uuid::new_v4(),
            product_id,
            quantity: 1,
            unit_price: 249_900,
            product_name: "Night Cream".into(),
            image_url: None,
            stock: 5,
            is_active: true,
        };

        let coupon = Coupon {
            coupon_id: Uuid::new_v4(),
            code: "LIMINARA20".into(),
            discount_type: "percentage".into(),
            value: 20,
            min_order: 0,
            max_discount: None,
            usage_limit: None,
            usage_count: 0,
            valid_from: Utc::now() - chrono::Duration::days(1),
            valid_until: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        };

        let h = harness(vec![line], vec![coupon]);

        let req = PlaceCodOrderRequest {
            source: CheckoutSource::Cart,
            buy_now: None,
            coupon_code: Some("liminara20".into()),
            address_id: None,
            address: None,
            save_address: false,
            confirmed: true,
        };

        let response = h.service.place_cod_order(h.user_id, &req).await.unwrap();

        assert_eq!(response.data.subtotal, 249_900);
        assert_eq!(response.data.discount, 49_980);
        assert_eq!(response.data.total, 199_920);
        assert_eq!(response.data.coupon_code, Some("LIMINARA20".into()));
        assert!(h.cart.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() {
        let h = harness(Vec::new(), Vec::new());

        let req = PlaceCodOrderRequest {
            source: CheckoutSource::Cart,
            buy_now: None,
            coupon_code: None,
            address_id: None,
            address: None,
            save_address: false,
            confirmed: true,
        };

        assert!(matches!(
            h.service.place_cod_order(h.user_id, &req).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn cod_without_a_shipping_address_creates_nothing() {
        let h = harness_with(Vec::new(), Vec::new(), None);

        let req = PlaceCodOrderRequest {
            source: CheckoutSource::BuyNow,
            buy_now: Some(BuyNowItem {
                product_id: h.product_id,
                quantity: 1,
            }),
            coupon_code: None,
            address_id: None,
            address: None,
            save_address: false,
            confirmed: true,
        };

        assert!(matches!(
            h.service.place_cod_order(h.user_id, &req).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(h.orders.created.lock().unwrap().is_empty());
    }
}
