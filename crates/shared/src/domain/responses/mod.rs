mod address;
mod api;
mod cart;
mod coupon;
mod delivery_agent;
mod order;
mod payment;
mod product;
mod token;
mod user;

pub use self::address::AddressResponse;
pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
pub use self::cart::{CartItemResponse, CartResponse};
pub use self::coupon::{AppliedCouponResponse, CouponResponse};
pub use self::delivery_agent::DeliveryAgentResponse;
pub use self::order::{OrderItemResponse, OrderResponse, OrderStatusHistoryResponse};
pub use self::payment::{GatewayOrderResponse, PaymentConfigResponse};
pub use self::product::{ProductResponse, ProductResponseDeleteAt};
pub use self::token::TokenResponse;
pub use self::user::UserResponse;
