use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 over `"{order_id}|{payment_id}"`, the scheme the
/// gateway uses to authenticate its payment callbacks.
pub fn sign_payment(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let payload = format!("{gateway_order_id}|{gateway_payment_id}");

    // HMAC accepts keys of any length, so construction cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length");
    mac.update(payload.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison of a presented signature against the expected one.
pub fn verify_payment_signature(
    secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    presented: &str,
) -> bool {
    let payload = format!("{gateway_order_id}|{gateway_payment_id}");

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload.as_bytes());

    let Ok(raw) = hex::decode(presented) else {
        return false;
    };

    mac.verify_slice(&raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let sig = sign_payment("mock_secret", "order_abc", "pay_xyz");
        assert!(verify_payment_signature(
            "mock_secret",
            "order_abc",
            "pay_xyz",
            &sig
        ));
    }

    #[test]
    fn rejects_tampered_payment_id() {
        let sig = sign_payment("mock_secret", "order_abc", "pay_xyz");
        assert!(!verify_payment_signature(
            "mock_secret",
            "order_abc",
            "pay_other",
            &sig
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let sig = sign_payment("mock_secret", "order_abc", "pay_xyz");
        assert!(!verify_payment_signature(
            "other_secret",
            "order_abc",
            "pay_xyz",
            &sig
        ));
    }

    #[test]
    fn rejects_non_hex_signature() {
        assert!(!verify_payment_signature(
            "mock_secret",
            "order_abc",
            "pay_xyz",
            "not-hex!"
        ));
    }
}
