use crate::{
    abstract_trait::{
        DynAddressRepository, DynAddressService, DynAuthService, DynCartRepository,
        DynCartService, DynCheckoutService, DynCouponService, DynDeliveryAgentService, DynHashing,
        DynJwtService, DynOrderCommandService, DynOrderQueryService, DynProductCommandService,
        DynProductQueryService, DynUserRepository,
    },
    cache::{CacheStore, CheckoutStore, DynCheckoutSessionStore},
    config::{ConnectionPool, PaymentConfig, RedisClient},
    gateway,
    repository::{
        AddressRepository, CartRepository, CouponRepository, DeliveryAgentRepository,
        OrderRepository, ProductRepository, UserRepository,
    },
    service::{
        AddressService, AuthService, CartService, CheckoutService, CouponService,
        DeliveryAgentService, OrderCommandService, OrderQueryService, ProductCommandService,
        ProductQueryService,
    },
};
use std::{fmt, sync::Arc};

/// Wires repositories into services once at startup; handlers only ever see
/// the `Dyn*` service handles.
#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_query_service: DynProductQueryService,
    pub product_command_service: DynProductCommandService,
    pub cart_service: DynCartService,
    pub coupon_service: DynCouponService,
    pub address_service: DynAddressService,
    pub checkout_service: DynCheckoutService,
    pub order_query_service: DynOrderQueryService,
    pub order_command_service: DynOrderCommandService,
    pub delivery_agent_service: DynDeliveryAgentService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub redis: RedisClient,
    pub payment: PaymentConfig,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
            redis,
            payment,
        } = deps;

        let cache = CacheStore::new(redis.pool.clone());
        let sessions =
            Arc::new(CheckoutStore::new(redis.pool.clone())) as DynCheckoutSessionStore;

        let user_repository: DynUserRepository = Arc::new(UserRepository::new(pool.clone()));
        let product_repository = ProductRepository::new(pool.clone());
        let cart_repository: DynCartRepository = Arc::new(CartRepository::new(pool.clone()));
        let coupon_repository = CouponRepository::new(pool.clone());
        let address_repository: DynAddressRepository =
            Arc::new(AddressRepository::new(pool.clone()));
        let order_repository = OrderRepository::new(pool.clone());
        let agent_repository = DeliveryAgentRepository::new(pool.clone());

        let gateway = gateway::build_gateway(&payment);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            hash,
            jwt_config,
        )) as DynAuthService;

        let product_query_service = Arc::new(ProductQueryService::new(
            product_repository.query.clone(),
            cache.clone(),
        )) as DynProductQueryService;

        let product_command_service = Arc::new(ProductCommandService::new(
            product_repository.command.clone(),
            cache.clone(),
        )) as DynProductCommandService;

        let cart_service = Arc::new(CartService::new(
            Arc::clone(&cart_repository),
            product_repository.query.clone(),
        )) as DynCartService;

        let coupon_service = Arc::new(CouponService::new(
            coupon_repository.query.clone(),
            coupon_repository.command.clone(),
        )) as DynCouponService;

        let address_service =
            Arc::new(AddressService::new(Arc::clone(&address_repository))) as DynAddressService;

        let checkout_service = Arc::new(CheckoutService::new(
            product_repository.query.clone(),
            Arc::clone(&cart_repository),
            coupon_repository.query.clone(),
            Arc::clone(&address_repository),
            Arc::clone(&user_repository),
            order_repository.command.clone(),
            gateway,
            sessions,
            payment,
        )) as DynCheckoutService;

        let order_query_service =
            Arc::new(OrderQueryService::new(order_repository.query.clone()))
                as DynOrderQueryService;

        let order_command_service = Arc::new(OrderCommandService::new(
            order_repository.query.clone(),
            order_repository.command.clone(),
            agent_repository.query.clone(),
        )) as DynOrderCommandService;

        let delivery_agent_service = Arc::new(DeliveryAgentService::new(
            agent_repository.query.clone(),
            agent_repository.command.clone(),
        )) as DynDeliveryAgentService;

        Self {
            auth_service,
            product_query_service,
            product_command_service,
            cart_service,
            coupon_service,
            address_service,
            checkout_service,
            order_query_service,
            order_command_service,
            delivery_agent_service,
        }
    }
}
