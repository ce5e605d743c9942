mod app;
mod database;
mod hashing;
mod jwt;
mod redis;

pub use self::app::{Config, PaymentConfig};
pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig, ROLE_ADMIN, ROLE_CUSTOMER, ROLE_DELIVERY_AGENT};
pub use self::redis::{RedisClient, RedisConfig};
