use crate::{
    abstract_trait::AddressRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateAddressRequest, UpdateAddressRequest},
    errors::RepositoryError,
    model::UserAddress,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const ADDRESS_COLUMNS: &str = r#"
    address_id, user_id, label, recipient_name, phone, line1, line2,
    city, state, pincode, is_default, created_at, updated_at
"#;

#[derive(Clone)]
pub struct AddressRepository {
    db: ConnectionPool,
}

impl AddressRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepositoryTrait for AddressRepository {
    async fn find_all(&self, user_id: Uuid) -> Result<Vec<UserAddress>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let addresses = sqlx::query_as::<_, UserAddress>(&format!(
            r#"
            SELECT {ADDRESS_COLUMNS}
            FROM user_addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(addresses)
    }

    async fn find_by_id(
        &self,
        address_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<UserAddress>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let address = sqlx::query_as::<_, UserAddress>(&format!(
            r#"
            SELECT {ADDRESS_COLUMNS}
            FROM user_addresses
            WHERE address_id = $1 AND user_id = $2
            "#
        ))
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(address)
    }

    async fn find_default(&self, user_id: Uuid) -> Result<Option<UserAddress>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let address = sqlx::query_as::<_, UserAddress>(&format!(
            r#"
            SELECT {ADDRESS_COLUMNS}
            FROM user_addresses
            WHERE user_id = $1 AND is_default = TRUE
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(address)
    }

    async fn create_address(
        &self,
        user_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<UserAddress, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // At most one default per user.
        if req.is_default {
            sqlx::query(
                r#"
                UPDATE user_addresses
                SET is_default = FALSE, updated_at = current_timestamp
                WHERE user_id = $1 AND is_default = TRUE
                "#,
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        }

        let address = sqlx::query_as::<_, UserAddress>(&format!(
            r#"
            INSERT INTO user_addresses
                (user_id, label, recipient_name, phone, line1, line2, city, state,
                 pincode, is_default, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    current_timestamp, current_timestamp)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&req.label)
        .bind(&req.recipient_name)
        .bind(&req.phone)
        .bind(&req.line1)
        .bind(&req.line2)
        .bind(&req.city)
        .bind(&req.state)
        .bind(&req.pincode)
        .bind(req.is_default)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create address for user {}: {:?}", user_id, err);
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("✅ Created address {} for user {}", address.address_id, user_id);
        Ok(address)
    }

    async fn update_address(
        &self,
        user_id: Uuid,
        req: &UpdateAddressRequest,
    ) -> Result<UserAddress, RepositoryError> {
        let id = req
            .address_id
            .ok_or_else(|| RepositoryError::Custom("missing address id".into()))?;

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        if req.is_default {
            sqlx::query(
                r#"
                UPDATE user_addresses
                SET is_default = FALSE, updated_at = current_timestamp
                WHERE user_id = $1 AND is_default = TRUE AND address_id <> $2
                "#,
            )
            .bind(user_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        }

        let address = sqlx::query_as::<_, UserAddress>(&format!(
            r#"
            UPDATE user_addresses
            SET label = $3,
                recipient_name = $4,
                phone = $5,
                line1 = $6,
                line2 = $7,
                city = $8,
                state = $9,
                pincode = $10,
                is_default = $11,
                updated_at = current_timestamp
            WHERE address_id = $1 AND user_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(&req.label)
        .bind(&req.recipient_name)
        .bind(&req.phone)
        .bind(&req.line1)
        .bind(&req.line2)
        .bind(&req.city)
        .bind(&req.state)
        .bind(&req.pincode)
        .bind(req.is_default)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)?;

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(address)
    }

    async fn delete_address(
        &self,
        address_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM user_addresses WHERE address_id = $1 AND user_id = $2
            "#,
        )
        .bind(address_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
