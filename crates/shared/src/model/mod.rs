mod address;
mod cart;
mod coupon;
mod delivery_agent;
mod order;
mod product;
mod status;
mod user;

pub use self::address::UserAddress;
pub use self::cart::{CartItem, CartLine};
pub use self::coupon::Coupon;
pub use self::delivery_agent::DeliveryAgent;
pub use self::order::{Order, OrderItem, OrderStatusHistory};
pub use self::product::Product;
pub use self::status::{DeliveryStatus, DiscountType, OrderStatus, PaymentMethod, PaymentStatus};
pub use self::user::User;
