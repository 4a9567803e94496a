//! Database Connection Pool Module
//!
//! Provides PostgreSQL connection pooling via deadpool-postgres and the
//! durable `GoodsRepository` implementation. All queries are scoped by
//! (goods_id, project_id); soft-deleted rows are invisible to plain
//! reads but still occupy their (id, project) slot.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;
use wares_core::{Goods, StoreError};
use wares_storage::GoodsRepository;

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size; callers beyond this wait for a free connection
    pub max_size: usize,
    /// How long a caller waits for a pooled connection
    pub wait_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "wares".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            wait_timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("WARES_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("WARES_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("WARES_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("WARES_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("WARES_DB_PASSWORD").unwrap_or(defaults.password),
            max_size: std::env::var("WARES_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_size),
            wait_timeout: Duration::from_secs(
                std::env::var("WARES_DB_WAIT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.wait_timeout.as_secs()),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> Result<Pool, StoreError> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_cfg = PoolConfig::new(self.max_size);
        pool_cfg.timeouts.wait = Some(self.wait_timeout);
        cfg.pool = Some(pool_cfg);

        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::PoolUnavailable {
                reason: format!("failed to create pool: {e}"),
            })
    }
}

// ============================================================================
// DATABASE CLIENT
// ============================================================================

/// PostgreSQL goods repository over a shared connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

fn query_err(e: tokio_postgres::Error) -> StoreError {
    StoreError::QueryFailed {
        reason: e.to_string(),
    }
}

fn tx_err(e: tokio_postgres::Error) -> StoreError {
    StoreError::TransactionFailed {
        reason: e.to_string(),
    }
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> Result<Self, StoreError> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    async fn get_conn(&self) -> Result<deadpool_postgres::Object, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::PoolUnavailable {
                reason: e.to_string(),
            })
    }

    /// Single connectivity check.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await.map_err(query_err)?;
        Ok(())
    }

    /// Startup connectivity probe: bounded retries with exponential
    /// backoff. Fails with a diagnosable error once attempts are
    /// exhausted rather than spinning forever.
    pub async fn ping_with_backoff(
        &self,
        max_attempts: u32,
        base_delay: Duration,
    ) -> Result<(), StoreError> {
        let mut delay = base_delay;
        let mut last_error = StoreError::PoolUnavailable {
            reason: "no connection attempts made".to_string(),
        };

        for attempt in 1..=max_attempts {
            match self.ping().await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(attempt, max_attempts, error = %e, "database ping failed");
                    last_error = e;
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        Err(StoreError::PoolUnavailable {
            reason: format!("database unreachable after {max_attempts} attempts: {last_error}"),
        })
    }

    fn row_to_goods(row: &tokio_postgres::Row) -> Goods {
        Goods {
            id: row.get("id"),
            project_id: row.get("project_id"),
            name: row.get("name"),
            description: row.get("description"),
            priority: row.get("priority"),
            removed: row.get("removed"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl GoodsRepository for DbClient {
    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError> {
        if project_id <= 0 {
            return Ok(false);
        }

        let conn = self.get_conn().await?;
        let row = conn
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)",
                &[&project_id],
            )
            .await
            .map_err(query_err)?;
        Ok(row.get(0))
    }

    async fn create(&self, project_id: i64, name: &str) -> Result<Goods, StoreError> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_one(
                "INSERT INTO goods (project_id, name) VALUES ($1, $2) \
                 RETURNING id, project_id, name, description, priority, removed, created_at",
                &[&project_id, &name],
            )
            .await
            .map_err(query_err)?;
        Ok(Self::row_to_goods(&row))
    }

    async fn get_by_id(&self, project_id: i64, goods_id: i64) -> Result<Goods, StoreError> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_opt(
                "SELECT id, project_id, name, description, priority, removed, created_at \
                 FROM goods WHERE id = $1 AND project_id = $2 AND removed = false",
                &[&goods_id, &project_id],
            )
            .await
            .map_err(query_err)?;
        row.map(|r| Self::row_to_goods(&r)).ok_or(StoreError::NotFound {
            project_id,
            goods_id,
        })
    }

    async fn update(
        &self,
        project_id: i64,
        goods_id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Goods, StoreError> {
        let mut conn = self.get_conn().await?;
        let tx = conn.transaction().await.map_err(tx_err)?;

        // Blocking exclusive row lock: concurrent updaters on the same
        // (id, project) serialize here instead of failing. A missing row
        // locks nothing; the zero-row UPDATE below catches that case.
        tx.execute(
            "SELECT 1 FROM goods WHERE id = $1 AND project_id = $2 FOR UPDATE",
            &[&goods_id, &project_id],
        )
        .await
        .map_err(tx_err)?;

        let row = tx
            .query_opt(
                "UPDATE goods SET \
                     name = COALESCE($1, name), \
                     description = COALESCE($2, description) \
                 WHERE id = $3 AND project_id = $4 \
                 RETURNING id, project_id, name, description, priority, removed, created_at",
                &[&name, &description, &goods_id, &project_id],
            )
            .await
            .map_err(tx_err)?;

        // The transaction rolls back on drop, so the early returns here
        // and any cancellation mid-flight leave no partial state.
        let Some(row) = row else {
            return Err(StoreError::NotFound {
                project_id,
                goods_id,
            });
        };
        let updated = Self::row_to_goods(&row);

        tx.commit().await.map_err(tx_err)?;
        Ok(updated)
    }

    async fn delete(&self, project_id: i64, goods_id: i64) -> Result<(), StoreError> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_opt(
                "UPDATE goods SET removed = true \
                 WHERE id = $1 AND project_id = $2 AND removed = false \
                 RETURNING id",
                &[&goods_id, &project_id],
            )
            .await
            .map_err(query_err)?;
        match row {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                project_id,
                goods_id,
            }),
        }
    }
}
