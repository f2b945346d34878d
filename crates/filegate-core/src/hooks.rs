//! Hook interfaces and registry
//!
//! This module provides the trait seams through which deployments customize
//! the pipelines: directory naming, record transformation, path resolution,
//! and pre-delete checks. Templates and requests carry hook *names*; the
//! registry maps names to implementations at execution time.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{AssetRecord, RequestContext};

/// Produces an extra directory fragment under the base upload directory.
///
/// The returned fragment uses `/` as the separator; each segment is created
/// on disk by the directory resolver. An empty fragment means no extra
/// nesting.
#[async_trait]
pub trait DirectoryNameResolver: Send + Sync {
    /// Get the hook name/identifier
    fn name(&self) -> &str;

    async fn resolve_dir(&self, ctx: &RequestContext) -> Result<String>;
}

/// Rewrites the draft asset record before it is inserted.
///
/// Returning `Ok(None)` keeps the draft unchanged; returning a record
/// replaces the draft wholesale.
#[async_trait]
pub trait AssetTransformHook: Send + Sync {
    /// Get the hook name/identifier
    fn name(&self) -> &str;

    async fn transform(
        &self,
        draft: AssetRecord,
        ctx: &RequestContext,
    ) -> Result<Option<AssetRecord>>;
}

/// Overrides where an asset's bytes are read from on download.
#[async_trait]
pub trait PathResolverHook: Send + Sync {
    /// Get the hook name/identifier
    fn name(&self) -> &str;

    async fn resolve_path(&self, record: &AssetRecord, ctx: &RequestContext) -> Result<PathBuf>;
}

/// Veto point invoked before an asset is removed.
///
/// An error from this hook aborts the removal with nothing deleted.
#[async_trait]
pub trait PreDeleteHook: Send + Sync {
    /// Get the hook name/identifier
    fn name(&self) -> &str;

    async fn before_remove(&self, ctx: &RequestContext) -> Result<()>;
}

/// Registry mapping hook names to implementations.
///
/// Thread-safe and async-compatible using tokio's RwLock. Multiple async
/// tasks can resolve hooks simultaneously without blocking, while
/// registration (typically at startup) is serialized.
#[derive(Clone)]
pub struct HookRegistry {
    dir_resolvers: Arc<RwLock<HashMap<String, Arc<dyn DirectoryNameResolver>>>>,
    transforms: Arc<RwLock<HashMap<String, Arc<dyn AssetTransformHook>>>>,
    path_resolvers: Arc<RwLock<HashMap<String, Arc<dyn PathResolverHook>>>>,
    pre_delete: Arc<RwLock<HashMap<String, Arc<dyn PreDeleteHook>>>>,
}

impl HookRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            dir_resolvers: Arc::new(RwLock::new(HashMap::new())),
            transforms: Arc::new(RwLock::new(HashMap::new())),
            path_resolvers: Arc::new(RwLock::new(HashMap::new())),
            pre_delete: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn register_dir_resolver(&self, hook: Arc<dyn DirectoryNameResolver>) {
        let name = hook.name().to_string();
        self.dir_resolvers.write().await.insert(name, hook);
    }

    pub async fn register_transform(&self, hook: Arc<dyn AssetTransformHook>) {
        let name = hook.name().to_string();
        self.transforms.write().await.insert(name, hook);
    }

    pub async fn register_path_resolver(&self, hook: Arc<dyn PathResolverHook>) {
        let name = hook.name().to_string();
        self.path_resolvers.write().await.insert(name, hook);
    }

    pub async fn register_pre_delete(&self, hook: Arc<dyn PreDeleteHook>) {
        let name = hook.name().to_string();
        self.pre_delete.write().await.insert(name, hook);
    }

    /// Resolve a directory-name hook by name
    pub async fn dir_resolver(&self, name: &str) -> Result<Arc<dyn DirectoryNameResolver>> {
        let hooks = self.dir_resolvers.read().await;

        hooks
            .get(name)
            .cloned()
            .with_context(|| format!("Directory hook '{}' not found", name))
    }

    /// Resolve a transform hook by name
    pub async fn transform(&self, name: &str) -> Result<Arc<dyn AssetTransformHook>> {
        let hooks = self.transforms.read().await;

        hooks
            .get(name)
            .cloned()
            .with_context(|| format!("Transform hook '{}' not found", name))
    }

    /// Resolve a path-resolver hook by name
    pub async fn path_resolver(&self, name: &str) -> Result<Arc<dyn PathResolverHook>> {
        let hooks = self.path_resolvers.read().await;

        hooks
            .get(name)
            .cloned()
            .with_context(|| format!("Path hook '{}' not found", name))
    }

    /// Resolve a pre-delete hook by name
    pub async fn pre_delete(&self, name: &str) -> Result<Arc<dyn PreDeleteHook>> {
        let hooks = self.pre_delete.read().await;

        hooks
            .get(name)
            .cloned()
            .with_context(|| format!("Pre-delete hook '{}' not found", name))
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
