//! Data-access tests for `CachedStore` over the in-memory repository
//! and cache backend. These pin down the catalog's consistency
//! contract: cache-aside reads, soft-delete visibility, update
//! serialization, and the error translation at the boundary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wares_api::{CachedStore, CACHE_TTL};
use wares_core::{CacheError, CreateGoods, GoodsError, UpdateGoods};
use wares_storage::{
    CacheBackend, GoodsCacheKey, GoodsRepository, MemoryCacheBackend, MemoryGoodsRepository,
};

type TestStore = CachedStore<MemoryGoodsRepository, MemoryCacheBackend>;

fn setup() -> (MemoryGoodsRepository, MemoryCacheBackend, TestStore) {
    let repo = MemoryGoodsRepository::new();
    repo.add_project(1);
    let cache = MemoryCacheBackend::new();
    let store = CachedStore::new(Arc::new(repo.clone()), Arc::new(cache.clone()));
    (repo, cache, store)
}

fn create_req(name: &str) -> CreateGoods {
    CreateGoods {
        name: name.to_string(),
    }
}

// ============================================================================
// READ PATH
// ============================================================================

#[tokio::test]
async fn test_get_absent_row_returns_not_found() {
    let (_repo, _cache, store) = setup();
    let err = store.get_by_id(1, 42).await.unwrap_err();
    assert_eq!(err, GoodsError::NotFound);
}

#[tokio::test]
async fn test_invalid_identifiers_rejected_before_io() {
    let (repo, _cache, store) = setup();

    assert_eq!(
        store.get_by_id(0, 1).await.unwrap_err(),
        GoodsError::InvalidProjectId
    );
    assert_eq!(
        store.get_by_id(-3, 1).await.unwrap_err(),
        GoodsError::InvalidProjectId
    );
    assert_eq!(
        store.get_by_id(1, 0).await.unwrap_err(),
        GoodsError::InvalidGoodsId
    );

    // Neither the cache nor the store was touched.
    assert_eq!(repo.read_count(), 0);
}

#[tokio::test]
async fn test_second_get_within_ttl_skips_store_round_trip() {
    let (repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    let first = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(repo.read_count(), 1);

    let second = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(repo.read_count(), 1, "second get must be served from cache");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_expired_entry_falls_back_to_store() {
    let (repo, cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();
    let key = GoodsCacheKey::new(1, goods.id).encode();

    store.get_by_id(1, goods.id).await.unwrap();
    cache.evict(&key);

    store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(repo.read_count(), 2);
}

#[tokio::test]
async fn test_undecodable_cache_entry_falls_back_to_store() {
    let (repo, cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();
    let key = GoodsCacheKey::new(1, goods.id).encode();

    cache.set(&key, "not json", CACHE_TTL).await.unwrap();

    let fetched = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(fetched.name, "Widget");
    assert_eq!(repo.read_count(), 1);
}

#[tokio::test]
async fn test_cache_entry_round_trips_all_fields() {
    let (_repo, cache, store) = setup();
    let created = store.create(1, &create_req("Widget")).await.unwrap();

    let from_store = store.get_by_id(1, created.id).await.unwrap();

    // The raw cached value decodes back to the exact row.
    let key = GoodsCacheKey::new(1, created.id).encode();
    let raw = cache.get(&key).await.unwrap().expect("entry was populated");
    let decoded: wares_core::Goods = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded, from_store);
}

/// A backend whose writes always fail; reads always miss.
struct WriteFailingCache;

#[async_trait]
impl CacheBackend for WriteFailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::OperationFailed {
            reason: "write refused".to_string(),
        })
    }
}

#[tokio::test]
async fn test_cache_write_failure_does_not_fail_read() {
    let repo = MemoryGoodsRepository::new();
    repo.add_project(1);
    let store = CachedStore::new(Arc::new(repo.clone()), Arc::new(WriteFailingCache));

    let goods = store.create(1, &create_req("Widget")).await.unwrap();
    let fetched = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(fetched.name, "Widget");
}

/// A backend whose lookups always error out.
struct LookupFailingCache;

#[async_trait]
impl CacheBackend for LookupFailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_cache_lookup_failure_degrades_to_store() {
    let repo = MemoryGoodsRepository::new();
    repo.add_project(1);
    let store = CachedStore::new(Arc::new(repo.clone()), Arc::new(LookupFailingCache));

    let goods = store.create(1, &create_req("Widget")).await.unwrap();
    let fetched = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(fetched.name, "Widget");
    assert_eq!(repo.read_count(), 1);
}

// ============================================================================
// CREATE
// ============================================================================

#[tokio::test]
async fn test_create_trims_name_and_sets_defaults() {
    let (_repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("  Widget  ")).await.unwrap();

    assert_eq!(goods.name, "Widget");
    assert!(!goods.removed);
    assert_eq!(goods.project_id, 1);
    assert_eq!(goods.description, None);
}

#[tokio::test]
async fn test_create_missing_project_performs_no_store_write() {
    let (repo, _cache, store) = setup();
    let err = store.create(7, &create_req("Widget")).await.unwrap_err();

    assert_eq!(err, GoodsError::ProjectNotExist);
    assert_eq!(repo.write_count(), 0);
}

#[tokio::test]
async fn test_create_validation_precedes_store_access() {
    let (repo, _cache, store) = setup();

    let blank = store.create(1, &create_req("   ")).await.unwrap_err();
    assert!(matches!(blank, GoodsError::Validation(_)));

    let long = store
        .create(1, &create_req(&"x".repeat(101)))
        .await
        .unwrap_err();
    assert!(matches!(long, GoodsError::Validation(_)));

    assert_eq!(repo.write_count(), 0);
}

#[tokio::test]
async fn test_create_does_not_populate_cache() {
    let (_repo, cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    let key = GoodsCacheKey::new(1, goods.id).encode();
    assert_eq!(cache.get(&key).await.unwrap(), None);
}

// ============================================================================
// UPDATE
// ============================================================================

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let (_repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    let update = UpdateGoods {
        name: Some("Widget2".to_string()),
        ..Default::default()
    };
    let updated = store.update(1, goods.id, &update).await.unwrap();
    assert_eq!(updated.name, "Widget2");
    assert_eq!(updated.description, None);

    let update = UpdateGoods {
        description: Some("  shiny  ".to_string()),
        ..Default::default()
    };
    let updated = store.update(1, goods.id, &update).await.unwrap();
    assert_eq!(updated.name, "Widget2");
    assert_eq!(updated.description.as_deref(), Some("shiny"));
}

#[tokio::test]
async fn test_update_empty_description_still_overwrites() {
    let (_repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    store
        .update(
            1,
            goods.id,
            &UpdateGoods {
                description: Some("initial".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = store
        .update(
            1,
            goods.id,
            &UpdateGoods {
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some(""));
}

#[tokio::test]
async fn test_update_ignores_priority_and_removed() {
    let (_repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    let update = UpdateGoods {
        priority: Some(99),
        removed: Some(true),
        ..Default::default()
    };
    let updated = store.update(1, goods.id, &update).await.unwrap();
    assert_eq!(updated.priority, goods.priority);
    assert!(!updated.removed);
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let (_repo, _cache, store) = setup();
    let update = UpdateGoods {
        name: Some("Widget2".to_string()),
        ..Default::default()
    };
    let err = store.update(1, 42, &update).await.unwrap_err();
    assert_eq!(err, GoodsError::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_updates_never_interleave_merges() {
    let (repo, _cache, store) = setup();

    // Both updates touch one field each; serialized execution in either
    // order leaves both fields set. A lost update would drop one.
    for _ in 0..25 {
        let goods = store.create(1, &create_req("base")).await.unwrap();

        let left = store.clone();
        let right = store.clone();
        let id = goods.id;

        let (a, b) = tokio::join!(
            tokio::spawn(async move {
                left.update(
                    1,
                    id,
                    &UpdateGoods {
                        name: Some("renamed".to_string()),
                        ..Default::default()
                    },
                )
                .await
            }),
            tokio::spawn(async move {
                right
                    .update(
                        1,
                        id,
                        &UpdateGoods {
                            description: Some("described".to_string()),
                            ..Default::default()
                        },
                    )
                    .await
            }),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let row = repo.raw_row(1, id).unwrap();
        assert_eq!(row.name, "renamed");
        assert_eq!(row.description.as_deref(), Some("described"));
    }
}

// ============================================================================
// DELETE & SOFT-DELETE VISIBILITY
// ============================================================================

#[tokio::test]
async fn test_delete_then_direct_store_get_is_not_found() {
    let (repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    store.delete(1, goods.id).await.unwrap();

    // Bypass the cache entirely.
    let err = repo.get_by_id(1, goods.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_on_removed_and_missing_rows_indistinguishable() {
    let (_repo, _cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();

    store.delete(1, goods.id).await.unwrap();
    let twice = store.delete(1, goods.id).await.unwrap_err();
    let missing = store.delete(1, 9999).await.unwrap_err();

    assert_eq!(twice, GoodsError::NotFound);
    assert_eq!(missing, GoodsError::NotFound);
    assert_eq!(twice, missing);
}

#[tokio::test]
async fn test_cache_hit_bypasses_removed_filter_until_expiry() {
    let (_repo, cache, store) = setup();
    let goods = store.create(1, &create_req("Widget")).await.unwrap();
    let key = GoodsCacheKey::new(1, goods.id).encode();

    // Populate the cache, then soft-delete. Delete does not invalidate.
    store.get_by_id(1, goods.id).await.unwrap();
    store.delete(1, goods.id).await.unwrap();

    // Hit path: the stale entry is returned verbatim.
    let stale = store.get_by_id(1, goods.id).await.unwrap();
    assert_eq!(stale.id, goods.id);
    assert!(!stale.removed, "cached copy predates the delete");

    // Miss path: once the entry expires the store filter applies.
    cache.evict(&key);
    let err = store.get_by_id(1, goods.id).await.unwrap_err();
    assert_eq!(err, GoodsError::NotFound);
}

// ============================================================================
// END-TO-END SCENARIO
// ============================================================================

#[tokio::test]
async fn test_full_crud_scenario() {
    let (repo, _cache, store) = setup();

    let created = store.create(1, &create_req(" Widget ")).await.unwrap();
    assert_eq!(created.name, "Widget");
    assert!(!created.removed);

    let updated = store
        .update(
            1,
            created.id,
            &UpdateGoods {
                name: Some("Widget2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Widget2");
    assert_eq!(updated.description, None);

    store.delete(1, created.id).await.unwrap();

    let err = repo.get_by_id(1, created.id).await.unwrap_err();
    assert!(err.is_not_found());
}
