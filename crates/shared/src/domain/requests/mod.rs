mod address;
mod auth;
mod cart;
mod checkout;
mod coupon;
mod delivery_agent;
mod order;
mod product;

pub use self::address::{CreateAddressRequest, UpdateAddressRequest};
pub use self::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use self::cart::{AddCartItemRequest, UpdateCartItemRequest};
pub use self::checkout::{
    BuyNowItem, CheckoutSource, CreateGatewayOrderRequest, PlaceCodOrderRequest,
    VerifyPaymentRequest,
};
pub use self::coupon::{ApplyCouponRequest, CreateCouponRequest, FindAllCoupons};
pub use self::delivery_agent::{
    CreateDeliveryAgentRequest, FindAllAgents, UpdateDeliveryAgentRequest,
};
pub use self::order::{
    AssignDeliveryRequest, FindAllOrders, UpdateDeliveryStatusRequest, UpdateOrderStatusRequest,
};
pub use self::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest};
