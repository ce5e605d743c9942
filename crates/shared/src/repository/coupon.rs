use crate::{
    abstract_trait::{
        CouponCommandRepositoryTrait, CouponQueryRepositoryTrait, DynCouponCommandRepository,
        DynCouponQueryRepository,
    },
    config::ConnectionPool,
    domain::requests::{CreateCouponRequest, FindAllCoupons},
    errors::RepositoryError,
    model::Coupon,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const COUPON_COLUMNS: &str = r#"
    coupon_id, code, discount_type, value, min_order, max_discount,
    usage_limit, usage_count, valid_from, valid_until, is_active,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct CouponQueryRepository {
    db: ConnectionPool,
}

impl CouponQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CouponQueryRepositoryTrait for CouponQueryRepository {
    async fn find_all(&self, req: &FindAllCoupons) -> Result<(Vec<Coupon>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(format!("%{}%", req.search.trim()))
        };

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM coupons
            WHERE ($1::TEXT IS NULL OR code ILIKE $1)
            "#,
        )
        .bind(&search_pattern)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            r#"
            SELECT {COUPON_COLUMNS}
            FROM coupons
            WHERE ($1::TEXT IS NULL OR code ILIKE $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok((coupons, total))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            r#"
            SELECT {COUPON_COLUMNS}
            FROM coupons
            WHERE code = $1
            "#
        ))
        .bind(code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(coupon)
    }
}

pub struct CouponCommandRepository {
    db: ConnectionPool,
}

impl CouponCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CouponCommandRepositoryTrait for CouponCommandRepository {
    async fn create_coupon(&self, req: &CreateCouponRequest) -> Result<Coupon, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let code = req.code.trim().to_uppercase();
        let valid_from = req.valid_from.unwrap_or_else(Utc::now);

        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            r#"
            INSERT INTO coupons
                (code, discount_type, value, min_order, max_discount, usage_limit,
                 usage_count, valid_from, valid_until, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, TRUE,
                    current_timestamp, current_timestamp)
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(&code)
        .bind(req.discount_type.as_str())
        .bind(req.value)
        .bind(req.min_order)
        .bind(req.max_discount)
        .bind(req.usage_limit)
        .bind(valid_from)
        .bind(req.valid_until)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create coupon {}: {:?}", code, err);
            match err {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    RepositoryError::AlreadyExists(format!("coupon {code} already exists"))
                }
                other => RepositoryError::from(other),
            }
        })?;

        info!("✅ Created coupon {}", coupon.code);
        Ok(coupon)
    }

    async fn deactivate_coupon(&self, id: Uuid) -> Result<Coupon, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Coupon>(&format!(
            r#"
            UPDATE coupons
            SET is_active = FALSE, updated_at = current_timestamp
            WHERE coupon_id = $1
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Clone)]
pub struct CouponRepository {
    pub query: DynCouponQueryRepository,
    pub command: DynCouponCommandRepository,
}

impl CouponRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(CouponQueryRepository::new(pool.clone())) as DynCouponQueryRepository;

        let command =
            Arc::new(CouponCommandRepository::new(pool.clone())) as DynCouponCommandRepository;

        Self { query, command }
    }
}
