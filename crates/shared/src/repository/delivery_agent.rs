use crate::{
    abstract_trait::{
        DeliveryAgentCommandRepositoryTrait, DeliveryAgentQueryRepositoryTrait,
        DynDeliveryAgentCommandRepository, DynDeliveryAgentQueryRepository,
    },
    config::ConnectionPool,
    domain::requests::{CreateDeliveryAgentRequest, FindAllAgents, UpdateDeliveryAgentRequest},
    errors::RepositoryError,
    model::DeliveryAgent,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const AGENT_COLUMNS: &str = r#"
    agent_id, user_id, name, phone, vehicle_number, is_active,
    total_deliveries, completed_deliveries, cancelled_deliveries,
    rating, created_at, updated_at
"#;

#[derive(Clone)]
pub struct DeliveryAgentQueryRepository {
    db: ConnectionPool,
}

impl DeliveryAgentQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeliveryAgentQueryRepositoryTrait for DeliveryAgentQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllAgents,
    ) -> Result<(Vec<DeliveryAgent>, i64), RepositoryError> {
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
            SELECT COUNT(*)
            FROM delivery_agents
            WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR phone ILIKE $1)
            "#,
        )
        .bind(&search_pattern)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        let agents = sqlx::query_as::<_, DeliveryAgent>(&format!(
            r#"
            SELECT {AGENT_COLUMNS}
            FROM delivery_agents
            WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR phone ILIKE $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch delivery agents: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((agents, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryAgent>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let agent = sqlx::query_as::<_, DeliveryAgent>(&format!(
            r#"
            SELECT {AGENT_COLUMNS}
            FROM delivery_agents
            WHERE agent_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(agent)
    }

    async fn has_active_assignment(&self, agent_id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE delivery_agent_id = $1
              AND status NOT IN ('delivered', 'cancelled')
            "#,
        )
        .bind(agent_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(active > 0)
    }
}

pub struct DeliveryAgentCommandRepository {
    db: ConnectionPool,
}

impl DeliveryAgentCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeliveryAgentCommandRepositoryTrait for DeliveryAgentCommandRepository {
    async fn create_agent(
        &self,
        req: &CreateDeliveryAgentRequest,
    ) -> Result<DeliveryAgent, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let agent = sqlx::query_as::<_, DeliveryAgent>(&format!(
            r#"
            INSERT INTO delivery_agents
                (user_id, name, phone, vehicle_number, is_active,
                 total_deliveries, completed_deliveries, cancelled_deliveries,
                 rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, 0, 0, 0, 5.0,
                    current_timestamp, current_timestamp)
            RETURNING {AGENT_COLUMNS}
            "#
        ))
        .bind(req.user_id)
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.vehicle_number)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create delivery agent {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created delivery agent {}", agent.agent_id);
        Ok(agent)
    }

    async fn update_agent(
        &self,
        req: &UpdateDeliveryAgentRequest,
    ) -> Result<DeliveryAgent, RepositoryError> {
        let id = req
            .agent_id
            .ok_or_else(|| RepositoryError::Custom("missing agent id".into()))?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, DeliveryAgent>(&format!(
            r#"
            UPDATE delivery_agents
            SET name = $2,
                phone = $3,
                vehicle_number = $4,
                is_active = $5,
                rating = $6,
                updated_at = current_timestamp
            WHERE agent_id = $1
            RETURNING {AGENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.vehicle_number)
        .bind(req.is_active)
        .bind(req.rating)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete_agent(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM delivery_agents WHERE agent_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct DeliveryAgentRepository {
    pub query: DynDeliveryAgentQueryRepository,
    pub command: DynDeliveryAgentCommandRepository,
}

impl DeliveryAgentRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(DeliveryAgentQueryRepository::new(pool.clone()))
            as DynDeliveryAgentQueryRepository;

        let command = Arc::new(DeliveryAgentCommandRepository::new(pool.clone()))
            as DynDeliveryAgentCommandRepository;

        Self { query, command }
    }
}
