//! Storage seam for goods rows.
//!
//! `GoodsRepository` is the durable-store contract. The PostgreSQL
//! implementation lives in `wares-api`; `MemoryGoodsRepository` mirrors
//! its semantics for tests and demos, including soft-delete filtering
//! and per-row update serialization.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use wares_core::{Goods, StoreError};

/// Durable store operations for the goods table.
///
/// Implementations must enforce project scoping inside the store:
/// every row query is keyed by (goods_id, project_id).
#[async_trait]
pub trait GoodsRepository: Send + Sync {
    /// Whether the project exists. Non-positive ids short-circuit to
    /// false without touching the store.
    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError>;

    /// Insert a row with a store-assigned id, priority and timestamp.
    async fn create(&self, project_id: i64, name: &str) -> Result<Goods, StoreError>;

    /// Fetch the non-removed row matching (goods_id, project_id).
    /// Soft-deleted rows are invisible here.
    async fn get_by_id(&self, project_id: i64, goods_id: i64) -> Result<Goods, StoreError>;

    /// Merge the provided fields into the row under an exclusive row
    /// lock. Absent fields are left unchanged; concurrent updates on
    /// the same row serialize rather than fail.
    async fn update(
        &self,
        project_id: i64,
        goods_id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Goods, StoreError>;

    /// Soft-delete the row. An already-removed row and a row that never
    /// existed are indistinguishable: both are `StoreError::NotFound`.
    async fn delete(&self, project_id: i64, goods_id: i64) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Inner {
    rows: RwLock<HashMap<(i64, i64), Goods>>,
    projects: RwLock<HashSet<i64>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
    writes: AtomicUsize,
    row_locks: Mutex<HashMap<(i64, i64), Arc<Mutex<()>>>>,
}

/// In-memory goods repository used by tests and demos.
///
/// Row reads are counted so cache tests can assert when the store was
/// actually hit; mutations are counted separately. Updates take a
/// per-row async mutex, emulating the blocking row lock of the
/// PostgreSQL implementation.
#[derive(Default, Clone)]
pub struct MemoryGoodsRepository {
    inner: Arc<Inner>,
}

impl MemoryGoodsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project id so `project_exists` reports it.
    pub fn add_project(&self, project_id: i64) {
        self.inner
            .projects
            .write()
            .expect("projects lock poisoned")
            .insert(project_id);
    }

    /// Number of `get_by_id` round-trips served so far.
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    /// Number of mutating operations (create/update/delete) served.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Raw row access bypassing the removed filter and the counters.
    pub fn raw_row(&self, project_id: i64, goods_id: i64) -> Option<Goods> {
        self.inner
            .rows
            .read()
            .expect("rows lock poisoned")
            .get(&(project_id, goods_id))
            .cloned()
    }

    async fn row_lock(&self, project_id: i64, goods_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.inner.row_locks.lock().await;
        locks
            .entry((project_id, goods_id))
            .or_default()
            .clone()
    }
}

#[async_trait]
impl GoodsRepository for MemoryGoodsRepository {
    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError> {
        if project_id <= 0 {
            return Ok(false);
        }
        Ok(self
            .inner
            .projects
            .read()
            .map_err(|_| StoreError::QueryFailed {
                reason: "projects lock poisoned".to_string(),
            })?
            .contains(&project_id))
    }

    async fn create(&self, project_id: i64, name: &str) -> Result<Goods, StoreError> {
        if !self.project_exists(project_id).await? {
            // Matches the foreign-key rejection of the real store.
            return Err(StoreError::QueryFailed {
                reason: format!("insert violates project foreign key ({project_id})"),
            });
        }

        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let goods = Goods {
            id,
            project_id,
            name: name.to_string(),
            description: None,
            priority: 0,
            removed: false,
            created_at: Utc::now(),
        };
        self.inner
            .rows
            .write()
            .map_err(|_| StoreError::QueryFailed {
                reason: "rows lock poisoned".to_string(),
            })?
            .insert((project_id, id), goods.clone());
        Ok(goods)
    }

    async fn get_by_id(&self, project_id: i64, goods_id: i64) -> Result<Goods, StoreError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        self.inner
            .rows
            .read()
            .map_err(|_| StoreError::QueryFailed {
                reason: "rows lock poisoned".to_string(),
            })?
            .get(&(project_id, goods_id))
            .filter(|row| !row.removed)
            .cloned()
            .ok_or(StoreError::NotFound {
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
        let lock = self.row_lock(project_id, goods_id).await;
        let _guard = lock.lock().await;

        let current = self
            .inner
            .rows
            .read()
            .map_err(|_| StoreError::TransactionFailed {
                reason: "rows lock poisoned".to_string(),
            })?
            .get(&(project_id, goods_id))
            .cloned();

        let Some(mut row) = current else {
            return Err(StoreError::NotFound {
                project_id,
                goods_id,
            });
        };

        // Widen the read-merge-write window so a broken lock would
        // actually interleave under the concurrency tests.
        tokio::task::yield_now().await;

        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(description) = description {
            row.description = Some(description.to_string());
        }

        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        self.inner
            .rows
            .write()
            .map_err(|_| StoreError::TransactionFailed {
                reason: "rows lock poisoned".to_string(),
            })?
            .insert((project_id, goods_id), row.clone());
        Ok(row)
    }

    async fn delete(&self, project_id: i64, goods_id: i64) -> Result<(), StoreError> {
        let mut rows = self
            .inner
            .rows
            .write()
            .map_err(|_| StoreError::QueryFailed {
                reason: "rows lock poisoned".to_string(),
            })?;
        match rows.get_mut(&(project_id, goods_id)) {
            Some(row) if !row.removed => {
                row.removed = true;
                self.inner.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                project_id,
                goods_id,
            }),
        }
    }
}
