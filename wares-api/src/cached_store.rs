//! Cache-aside data access for the goods catalog.
//!
//! [`CachedStore`] composes a durable repository with a TTL'd cache.
//! Reads go through the cache; creates, updates and deletes go straight
//! to the store and leave cached entries alone, so a stale entry can
//! outlive an update or a delete for up to the TTL.

use std::sync::Arc;
use std::time::Duration;

use wares_core::{CreateGoods, Goods, GoodsError, GoodsResult, UpdateGoods};
use wares_storage::{CacheBackend, GoodsCacheKey, GoodsRepository};

/// Fixed lifetime of a cache entry.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

/// Data-access layer composing the durable store with a read cache.
pub struct CachedStore<R, C> {
    store: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> Clone for CachedStore<R, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<R, C> CachedStore<R, C>
where
    R: GoodsRepository,
    C: CacheBackend,
{
    pub fn new(store: Arc<R>, cache: Arc<C>) -> Self {
        Self { store, cache }
    }

    /// The underlying repository, for direct-store reads.
    pub fn store(&self) -> &R {
        &self.store
    }

    /// Fetch one goods row.
    ///
    /// Identifier shape is checked before any I/O. A cache hit is
    /// returned verbatim, including entries whose row has since been
    /// soft-deleted; only the store query filters on `removed`.
    /// Staleness is bounded by [`CACHE_TTL`].
    pub async fn get_by_id(&self, project_id: i64, goods_id: i64) -> GoodsResult<Goods> {
        if project_id <= 0 {
            return Err(GoodsError::InvalidProjectId);
        }
        if goods_id <= 0 {
            return Err(GoodsError::InvalidGoodsId);
        }

        let key = GoodsCacheKey::new(project_id, goods_id).encode();

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Goods>(&raw) {
                Ok(goods) => return Ok(goods),
                Err(e) => {
                    tracing::debug!(%key, error = %e, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(%key, error = %e, "cache lookup failed, falling back to store");
            }
        }

        let goods = self.store.get_by_id(project_id, goods_id).await?;

        // Best effort, no synchronous retry: a failed write only costs
        // the next read a store round-trip. Failed reads are never
        // cached.
        match serde_json::to_string(&goods) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, &raw, CACHE_TTL).await {
                    tracing::debug!(%key, error = %e, "cache write failed");
                }
            }
            Err(e) => {
                tracing::debug!(%key, error = %e, "cache serialization failed");
            }
        }

        Ok(goods)
    }

    /// Create a goods row in an existing project.
    ///
    /// Validates the payload, trims the name, and requires the project
    /// to exist before any write. The cache is not populated.
    pub async fn create(&self, project_id: i64, input: &CreateGoods) -> GoodsResult<Goods> {
        input.validate()?;

        if !self.store.project_exists(project_id).await? {
            return Err(GoodsError::ProjectNotExist);
        }

        Ok(self.store.create(project_id, input.name.trim()).await?)
    }

    /// Merge name/description changes into a row.
    ///
    /// Other payload fields are not client-writable and are ignored.
    /// Absent fields leave the stored value unchanged; a
    /// present-but-empty description still overwrites. The cache entry,
    /// if any, is not invalidated.
    pub async fn update(
        &self,
        project_id: i64,
        goods_id: i64,
        input: &UpdateGoods,
    ) -> GoodsResult<Goods> {
        input.validate()?;

        let name = input.name.as_deref().map(str::trim);
        let description = input.description.as_deref().map(str::trim);

        Ok(self
            .store
            .update(project_id, goods_id, name, description)
            .await?)
    }

    /// Soft-delete a row. The cache entry, if any, is left to expire.
    pub async fn delete(&self, project_id: i64, goods_id: i64) -> GoodsResult<()> {
        Ok(self.store.delete(project_id, goods_id).await?)
    }

    /// Whether the project exists.
    pub async fn project_exists(&self, project_id: i64) -> GoodsResult<bool> {
        Ok(self.store.project_exists(project_id).await?)
    }
}
