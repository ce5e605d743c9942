use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error};

/// JSON read-through cache with namespace versioning. Keys that embed the
/// namespace version become unreachable the moment the version is bumped, so
/// a whole key family (every page of a listing, say) is dropped with one
/// INCR instead of a key scan. Redis failures degrade to cache misses.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<Pool>,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    fn version_key(namespace: &str) -> String {
        format!("cache:version:{namespace}")
    }

    async fn conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.conn().await?;

        let payload: Option<String> =
            match redis::cmd("GET").arg(key).query_async(&mut conn).await {
                Ok(payload) => payload,
                Err(e) => {
                    error!("Redis GET failed for '{}': {:?}", key, e);
                    return None;
                }
            };

        match serde_json::from_str(&payload?) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Cached payload for '{}' did not deserialize: {:?}", key, e);
                None
            }
        }
    }

    pub async fn put_json<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize,
    {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize payload for '{}': {:?}", key, e);
                return;
            }
        };

        let Some(mut conn) = self.conn().await else {
            return;
        };

        let result: redis::RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(&payload)
            .arg("EX")
            .arg(ttl.num_seconds())
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => debug!("Cached '{}' for {}s", key, ttl.num_seconds()),
            Err(e) => error!("Redis SET failed for '{}': {:?}", key, e),
        }
    }

    pub async fn forget(&self, key: &str) {
        if let Some(mut conn) = self.conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Redis DEL failed for '{}': {:?}", key, e);
        }
    }

    /// Current version of a key namespace; 0 until the first bump.
    pub async fn namespace_version(&self, namespace: &str) -> u64 {
        let Some(mut conn) = self.conn().await else {
            return 0;
        };

        match redis::cmd("GET")
            .arg(Self::version_key(namespace))
            .query_async::<Option<u64>>(&mut conn)
            .await
        {
            Ok(version) => version.unwrap_or(0),
            Err(e) => {
                error!("Redis GET failed for namespace '{}': {:?}", namespace, e);
                0
            }
        }
    }

    /// Retires every key derived from the current version of the namespace.
    pub async fn bump_namespace(&self, namespace: &str) {
        let Some(mut conn) = self.conn().await else {
            return;
        };

        match redis::cmd("INCR")
            .arg(Self::version_key(namespace))
            .query_async::<u64>(&mut conn)
            .await
        {
            Ok(version) => debug!("Namespace '{}' now at v{}", namespace, version),
            Err(e) => error!("Failed to bump namespace '{}': {:?}", namespace, e),
        }
    }
}
