//! Asset metadata store abstraction
//!
//! This module defines the AssetStore trait that metadata backends must
//! implement. Records are addressed by collection name and record id; the
//! gateway never assumes a particular backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use filegate_core::models::AssetRecord;
use filegate_core::GatewayError;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    #[error("Store backend error: {0}")]
    BackendError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        GatewayError::Store(anyhow::Error::new(err))
    }
}

/// Field-equality filter over serialized asset records.
///
/// A query is a set of `field == value` conditions against the record's
/// document form. Later inserts of the same key overwrite earlier ones, so
/// merging caller filters over scope fields keeps the caller's value on
/// collision. A key absent from the document matches nothing.
#[derive(Debug, Clone, Default)]
pub struct AssetQuery {
    fields: BTreeMap<String, serde_json::Value>,
}

impl AssetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, consuming the query (builder form).
    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a condition in place, overwriting any existing one for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate the query against a record's document form.
    pub fn matches(&self, record: &AssetRecord) -> bool {
        let doc = match serde_json::to_value(record) {
            Ok(doc) => doc,
            Err(_) => return false,
        };

        self.fields
            .iter()
            .all(|(key, value)| doc.get(key) == Some(value))
    }
}

/// Pagination options for find operations. Skip applies before limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

/// Asset metadata store abstraction
///
/// Backends persist asset records as documents inside named collections.
/// All operations are fallible at the transport/backend level only; domain
/// conditions such as "record not found" are expressed through `Option`.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Insert a record and return the authoritative row as stored.
    async fn insert(&self, collection: &str, record: AssetRecord) -> StoreResult<AssetRecord>;

    /// Find all records matching the query, in stable id order.
    async fn find(
        &self,
        collection: &str,
        query: &AssetQuery,
        options: &FindOptions,
    ) -> StoreResult<Vec<AssetRecord>>;

    /// Find a single record by id.
    async fn find_one(&self, collection: &str, id: &str) -> StoreResult<Option<AssetRecord>>;

    /// Remove a record by id. Removing an absent id is not an error.
    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()>;
}
