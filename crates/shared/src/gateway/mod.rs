mod mock;
mod razorpay;
mod signature;

use crate::{abstract_trait::DynPaymentGateway, config::PaymentConfig};
use std::sync::Arc;

pub use self::mock::MockGateway;
pub use self::razorpay::RazorpayGateway;
pub use self::signature::sign_payment;

/// Picks the live gateway or the in-process mock based on configuration.
pub fn build_gateway(config: &PaymentConfig) -> DynPaymentGateway {
    if config.mock_mode {
        Arc::new(MockGateway::new(config.key_secret.clone()))
    } else {
        Arc::new(RazorpayGateway::new(config.clone()))
    }
}
