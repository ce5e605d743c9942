mod address;
mod auth;
mod cart;
mod checkout;
mod coupon;
mod delivery;
mod order;
mod product;

pub use self::address::AddressService;
pub use self::auth::AuthService;
pub use self::cart::CartService;
pub use self::checkout::CheckoutService;
pub use self::coupon::CouponService;
pub use self::delivery::DeliveryAgentService;
pub use self::order::{OrderCommandService, OrderQueryService};
pub use self::product::{ProductCommandService, ProductQueryService};
