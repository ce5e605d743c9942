use crate::{
    abstract_trait::{GatewayOrder, PaymentGatewayTrait},
    config::PaymentConfig,
    errors::ServiceError,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::signature::verify_payment_signature;

#[derive(Debug, Deserialize)]
struct RazorpayOrderBody {
    id: String,
    amount: i64,
    currency: String,
}

/// Live Razorpay client. Orders are created server-side with the key pair;
/// the browser checkout then charges against the returned order id.
pub struct RazorpayGateway {
    config: PaymentConfig,
    client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGatewayTrait for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError> {
        let url = format!("{}/v1/orders", self.config.api_base);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| {
                error!("❌ Razorpay order request failed: {:?}", e);
                ServiceError::Gateway("payment gateway unreachable".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("❌ Razorpay order rejected ({}): {}", status, body);
            return Err(ServiceError::Gateway(
                "payment gateway rejected the order".to_string(),
            ));
        }

        let body: RazorpayOrderBody = response.json().await.map_err(|e| {
            error!("❌ Malformed Razorpay order response: {:?}", e);
            ServiceError::Gateway("malformed payment gateway response".to_string())
        })?;

        info!("💳 Gateway order {} created for {} {}", body.id, body.amount, body.currency);

        Ok(GatewayOrder {
            id: body.id,
            amount: body.amount,
            currency: body.currency,
        })
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_payment_signature(
            &self.config.key_secret,
            gateway_order_id,
            gateway_payment_id,
            signature,
        )
    }
}
