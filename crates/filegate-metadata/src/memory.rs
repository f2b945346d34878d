//! In-memory store and catalog implementations
//!
//! Reference backends holding records and templates in process memory.
//! Suitable for embedding and for tests; both carry failure switches so
//! consumers can exercise backend-error paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use filegate_core::models::{AssetRecord, PermissionTemplate, RequestContext};

use crate::catalog::TemplateCatalog;
use crate::store::{AssetQuery, AssetStore, FindOptions, StoreError, StoreResult};

/// In-memory asset store: collections of records behind an async RwLock.
///
/// Records within a collection are kept in id order, so find results are
/// deterministic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, BTreeMap<String, AssetRecord>>>>,
    fail_inserts: Arc<AtomicBool>,
    fail_queries: Arc<AtomicBool>,
    fail_removes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts fail with a backend error.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent find/find_one calls fail with a backend error.
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent removes fail with a backend error.
    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Number of records in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn insert(&self, collection: &str, record: AssetRecord) -> StoreResult<AssetRecord> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::InsertFailed(
                "Metadata store unavailable".to_string(),
            ));
        }

        let mut collections = self.collections.write().await;
        let records = collections.entry(collection.to_string()).or_default();
        records.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    async fn find(
        &self,
        collection: &str,
        query: &AssetQuery,
        options: &FindOptions,
    ) -> StoreResult<Vec<AssetRecord>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed(
                "Metadata store unavailable".to_string(),
            ));
        }

        let collections = self.collections.read().await;
        let records = collections
            .get(collection)
            .map(|records| {
                records
                    .values()
                    .filter(|record| query.matches(record))
                    .skip(options.skip.unwrap_or(0))
                    .take(options.limit.unwrap_or(usize::MAX))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(records)
    }

    async fn find_one(&self, collection: &str, id: &str) -> StoreResult<Option<AssetRecord>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed(
                "Metadata store unavailable".to_string(),
            ));
        }

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StoreError::RemoveFailed(
                "Metadata store unavailable".to_string(),
            ));
        }

        let mut collections = self.collections.write().await;
        if let Some(records) = collections.get_mut(collection) {
            records.remove(id);
        }

        Ok(())
    }
}

/// In-memory template catalog.
///
/// Counts fetches so consumers can assert that an operation never consulted
/// the catalog.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    templates: Arc<RwLock<HashMap<String, PermissionTemplate>>>,
    fail_fetches: Arc<AtomicBool>,
    fetch_count: Arc<AtomicUsize>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a template.
    pub async fn put(&self, template: PermissionTemplate) {
        let mut templates = self.templates.write().await;
        templates.insert(template.id.clone(), template);
    }

    /// Make subsequent fetches fail with a backend error.
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Number of fetches served (including failed ones).
    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemplateCatalog for MemoryCatalog {
    async fn fetch(
        &self,
        template_id: &str,
        _ctx: &RequestContext,
    ) -> StoreResult<Option<PermissionTemplate>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::BackendError(
                "Template catalog unavailable".to_string(),
            ));
        }

        let templates = self.templates.read().await;
        Ok(templates.get(template_id).cloned())
    }
}
