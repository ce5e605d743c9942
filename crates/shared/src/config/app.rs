use anyhow::{Context, Result, anyhow};

use crate::config::redis::RedisConfig;

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
    pub mock_mode: bool,
    pub api_base: String,
}

impl PaymentConfig {
    pub fn init() -> Result<Self> {
        let mock_mode = std::env::var("PAYMENT_MOCK_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        // Real keys are only mandatory when the gateway is live.
        let key_id = match std::env::var("RAZORPAY_KEY_ID") {
            Ok(v) => v,
            Err(_) if mock_mode => "rzp_test_mock".to_string(),
            Err(_) => return Err(anyhow!("Missing environment variable: RAZORPAY_KEY_ID")),
        };

        let key_secret = match std::env::var("RAZORPAY_KEY_SECRET") {
            Ok(v) => v,
            Err(_) if mock_mode => "mock_secret".to_string(),
            Err(_) => return Err(anyhow!("Missing environment variable: RAZORPAY_KEY_SECRET")),
        };

        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string());

        let api_base = std::env::var("RAZORPAY_API_BASE")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string());

        Ok(Self {
            key_id,
            key_secret,
            currency,
            mock_mode,
            api_base,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub redis: RedisConfig,
    pub payment: PaymentConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32 integer")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let redis_host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let redis_port = std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let redis_db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let redis_password = std::env::var("REDIS_PASSWORD").ok();

        let redis = RedisConfig::new(redis_host, redis_port, redis_db, redis_password);

        let payment = PaymentConfig::init().context("failed payment config")?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            run_migrations,
            port,
            redis,
            payment,
        })
    }
}
