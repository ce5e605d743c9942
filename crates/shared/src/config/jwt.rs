use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role claim values issued at login and checked by the route guards.
pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DELIVERY_AGENT: &str = "delivery_agent";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

impl Claims {
    pub fn new(sub: Uuid, role: String, exp: usize, iat: usize, token_type: String) -> Self {
        Claims {
            sub,
            role,
            exp,
            iat,
            token_type,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(
        &self,
        user_id: Uuid,
        role: &str,
        token_type: &str,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = match token_type {
            "access" => (now + Duration::minutes(60)).timestamp() as usize,
            "refresh" => (now + Duration::days(7)).timestamp() as usize,
            _ => return Err(ServiceError::InvalidTokenType),
        };

        let claims = Claims::new(user_id, role.to_string(), exp, iat, token_type.to_string());

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_type: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(ServiceError::Jwt)?;

        let current_time = Utc::now().timestamp() as usize;

        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        if token_data.claims.token_type != expected_type {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::JwtServiceTrait;

    #[test]
    fn access_token_roundtrip_keeps_subject_and_role() {
        let jwt = JwtConfig::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = jwt.generate_token(user_id, "admin", "access").unwrap();
        let claims = jwt.verify_token(&token, "access").unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn refresh_token_rejected_as_access() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt
            .generate_token(Uuid::new_v4(), "customer", "refresh")
            .unwrap();

        assert!(matches!(
            jwt.verify_token(&token, "access"),
            Err(ServiceError::InvalidTokenType)
        ));
    }

    #[test]
    fn unknown_token_type_rejected() {
        let jwt = JwtConfig::new("test-secret");
        assert!(matches!(
            jwt.generate_token(Uuid::new_v4(), "customer", "session"),
            Err(ServiceError::InvalidTokenType)
        ));
    }
}
