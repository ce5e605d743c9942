use crate::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynJwtService, DynUserRepository},
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct AuthService {
    user_repository: DynUserRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
}

impl AuthService {
    pub fn new(user_repository: DynUserRepository, hashing: DynHashing, jwt: DynJwtService) -> Self {
        Self {
            user_repository,
            hashing,
            jwt,
        }
    }

    fn issue_tokens(&self, user_id: Uuid, role: &str) -> Result<TokenResponse, ServiceError> {
        let access_token = self.jwt.generate_token(user_id, role, "access")?;
        let refresh_token = self.jwt.generate_token(user_id, role, "refresh")?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 Registering user: {}", req.email);

        if self
            .user_repository
            .find_by_email(&req.email)
            .await?
            .is_some()
        {
            return Err(ServiceError::StateConflict(
                "email is already registered".to_string(),
            ));
        }

        let password_hash = self.hashing.hash_password(&req.password).await?;
        let user = self.user_repository.create_user(req, &password_hash).await?;

        info!("✅ Registered user {}", user.user_id);
        Ok(ApiResponse::success("User registered", user.into()))
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let user = self
            .user_repository
            .find_by_email(&req.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if let Err(e) = self
            .hashing
            .compare_password(&user.password, &req.password)
            .await
        {
            error!("🔐 Failed login attempt for {}", req.email);
            return Err(match e {
                ServiceError::Bcrypt(inner) => ServiceError::Bcrypt(inner),
                _ => ServiceError::InvalidCredentials,
            });
        }

        let tokens = self.issue_tokens(user.user_id, &user.role)?;

        info!("🔓 User {} logged in", user.user_id);
        Ok(ApiResponse::success("Login successful", tokens))
    }

    async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let claims = self.jwt.verify_token(refresh_token, "refresh")?;

        // The user may have been deleted or demoted since the token was cut.
        let user = self
            .user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        let tokens = self.issue_tokens(user.user_id, &user.role)?;

        Ok(ApiResponse::success("Token refreshed", tokens))
    }

    async fn me(&self, user_id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id} not found")))?;

        Ok(ApiResponse::success("User profile", user.into()))
    }
}
