mod address;
mod cart;
mod coupon;
mod delivery_agent;
mod order;
mod product;
mod user;

pub use self::address::AddressRepository;
pub use self::cart::CartRepository;
pub use self::coupon::CouponRepository;
pub use self::delivery_agent::DeliveryAgentRepository;
pub use self::order::OrderRepository;
pub use self::product::ProductRepository;
pub use self::user::UserRepository;
