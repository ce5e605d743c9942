use crate::{
    abstract_trait::UserRepositoryTrait,
    config::{ConnectionPool, ROLE_CUSTOMER},
    domain::requests::RegisterRequest,
    errors::RepositoryError,
    model::User,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, role, phone, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, role, phone, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(user)
    }

    async fn create_user(
        &self,
        req: &RegisterRequest,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING user_id, name, email, password, role, phone, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(password_hash)
        .bind(ROLE_CUSTOMER)
        .bind(&req.phone)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {:?}", req.email, err);
            match err {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    RepositoryError::AlreadyExists(format!("email {} is taken", req.email))
                }
                other => RepositoryError::from(other),
            }
        })?;

        info!("✅ Created user {}", user.user_id);
        Ok(user)
    }
}
