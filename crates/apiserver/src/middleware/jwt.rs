use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    config::{Claims, ROLE_ADMIN, ROLE_DELIVERY_AGENT},
    errors::{ErrorResponse, HttpError},
};

/// Resolves the access token from the `token` cookie or the `Authorization`
/// header, then stores the verified claims and the user id in the request
/// extensions for downstream handlers.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let token = match token {
        Some(token) => token,
        None => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "You are not logged in, please provide token".to_string(),
                }),
            ));
        }
    };

    let claims = match jwt.verify_token(&token, "access") {
        Ok(claims) => claims,
        Err(_) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "Invalid token".to_string(),
                }),
            ));
        }
    };

    req.extensions_mut().insert(claims.sub);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub fn ensure_admin(claims: &Claims) -> Result<(), HttpError> {
    if claims.role == ROLE_ADMIN {
        Ok(())
    } else {
        Err(HttpError::Forbidden(
            "Access denied. Required role: admin".to_string(),
        ))
    }
}

/// Delivery progress may be reported by back-office staff or by the agent's
/// own account.
pub fn ensure_delivery_staff(claims: &Claims) -> Result<(), HttpError> {
    if claims.role == ROLE_ADMIN || claims.role == ROLE_DELIVERY_AGENT {
        Ok(())
    } else {
        Err(HttpError::Forbidden(
            "Access denied. Required role: admin or delivery_agent".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::ROLE_CUSTOMER;
    use uuid::Uuid;

    fn claims(role: &str) -> Claims {
        Claims::new(Uuid::new_v4(), role.to_string(), 0, 0, "access".to_string())
    }

    #[test]
    fn admin_gate_rejects_other_roles() {
        assert!(ensure_admin(&claims(ROLE_ADMIN)).is_ok());
        assert!(ensure_admin(&claims(ROLE_DELIVERY_AGENT)).is_err());
        assert!(ensure_admin(&claims(ROLE_CUSTOMER)).is_err());
    }

    #[test]
    fn delivery_updates_open_to_admins_and_agents() {
        assert!(ensure_delivery_staff(&claims(ROLE_ADMIN)).is_ok());
        assert!(ensure_delivery_staff(&claims(ROLE_DELIVERY_AGENT)).is_ok());
        assert!(ensure_delivery_staff(&claims(ROLE_CUSTOMER)).is_err());
    }
}
