mod address;
mod auth;
mod cart;
mod coupon;
mod delivery_agent;
mod hashing;
mod jwt;
mod order;
mod payment;
mod product;
mod user;

pub use self::address::{AddressRepositoryTrait, AddressServiceTrait, DynAddressRepository,
    DynAddressService};
pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::cart::{CartRepositoryTrait, CartServiceTrait, DynCartRepository, DynCartService};
pub use self::coupon::{
    CouponCommandRepositoryTrait, CouponQueryRepositoryTrait, CouponServiceTrait,
    DynCouponCommandRepository, DynCouponQueryRepository, DynCouponService,
};
pub use self::delivery_agent::{
    DeliveryAgentCommandRepositoryTrait, DeliveryAgentQueryRepositoryTrait,
    DeliveryAgentServiceTrait, DynDeliveryAgentCommandRepository, DynDeliveryAgentQueryRepository,
    DynDeliveryAgentService,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, NewOrder, NewOrderItem, OrderCommandRepositoryTrait,
    OrderCommandServiceTrait, OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::payment::{CheckoutServiceTrait, DynCheckoutService, DynPaymentGateway,
    GatewayOrder, PaymentGatewayTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::user::{DynUserRepository, UserRepositoryTrait};
