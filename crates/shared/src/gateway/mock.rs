use crate::{
    abstract_trait::{GatewayOrder, PaymentGatewayTrait},
    errors::ServiceError,
    utils::generate_random_string,
};
use async_trait::async_trait;
use tracing::info;

use super::signature::verify_payment_signature;

/// In-process stand-in for the live gateway. Issues locally generated order
/// ids and validates signatures with the same HMAC scheme, so end-to-end
/// checkout flows run without network access. Test clients can produce a
/// valid signature by signing with the configured secret.
pub struct MockGateway {
    key_secret: String,
}

impl MockGateway {
    pub fn new(key_secret: String) -> Self {
        Self { key_secret }
    }
}

#[async_trait]
impl PaymentGatewayTrait for MockGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, ServiceError> {
        let id = format!("order_mock_{}", generate_random_string(14));

        info!("💳 Mock gateway order {} for {} {}", id, amount, currency);

        Ok(GatewayOrder {
            id,
            amount,
            currency: currency.to_string(),
        })
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_payment_signature(
            &self.key_secret,
            gateway_order_id,
            gateway_payment_id,
            signature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::sign_payment;

    #[tokio::test]
    async fn mock_orders_get_unique_ids() {
        let gateway = MockGateway::new("mock_secret".to_string());

        let a = gateway.create_order(1000, "INR", "r1").await.unwrap();
        let b = gateway.create_order(1000, "INR", "r2").await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("order_mock_"));
        assert_eq!(a.amount, 1000);
    }

    #[tokio::test]
    async fn mock_accepts_signatures_made_with_its_secret() {
        let gateway = MockGateway::new("mock_secret".to_string());
        let order = gateway.create_order(50000, "INR", "r1").await.unwrap();

        let sig = sign_payment("mock_secret", &order.id, "pay_123");
        assert!(gateway.verify_signature(&order.id, "pay_123", &sig));
        assert!(!gateway.verify_signature(&order.id, "pay_456", &sig));
    }
}
