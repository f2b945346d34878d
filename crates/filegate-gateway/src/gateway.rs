//! Gateway assembly and scoped access checks

use std::sync::Arc;

use filegate_core::config::GatewayConfig;
use filegate_core::hooks::HookRegistry;
use filegate_core::models::{AssetRecord, RequestContext, ResponseShape, UploaderConfig};
use filegate_core::{GatewayError, GatewayResult};
use filegate_metadata::{AssetStore, TemplateCatalog};
use filegate_storage::StorageRoot;

/// Access-controlled asset ingestion and retrieval gateway.
///
/// Holds the storage root, the injected metadata backends, and the hook
/// registry. Construction is plain dependency injection; the gateway keeps
/// no mutable state of its own.
pub struct Gateway {
    pub(crate) root: StorageRoot,
    pub(crate) store: Arc<dyn AssetStore>,
    pub(crate) catalog: Arc<dyn TemplateCatalog>,
    pub(crate) hooks: HookRegistry,
    pub(crate) config: GatewayConfig,
}

impl Gateway {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn AssetStore>,
        catalog: Arc<dyn TemplateCatalog>,
        hooks: HookRegistry,
    ) -> Self {
        let root = StorageRoot::new(config.storage_root.clone());
        Gateway {
            root,
            store,
            catalog,
            hooks,
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The hook registry, for registering hooks after construction.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Effective base upload directory for a request.
    pub(crate) fn base_dir<'a>(&'a self, requested: &'a Option<String>) -> &'a str {
        requested.as_deref().unwrap_or(&self.config.upload_dir)
    }

    /// Effective collection for a request.
    pub(crate) fn collection<'a>(&'a self, requested: &'a Option<String>) -> &'a str {
        requested.as_deref().unwrap_or(&self.config.collection)
    }

    /// Effective response shape for a request.
    pub(crate) fn response_shape(&self, requested: &Option<ResponseShape>) -> ResponseShape {
        requested
            .clone()
            .unwrap_or_else(|| self.config.response_shape.clone())
    }

    /// Authorize an action on a record against its template scope.
    ///
    /// Unscoped records skip the catalog entirely and yield `Ok(None)`. For
    /// scoped records the caller's claimed template and uploader must match
    /// the record before the catalog is consulted; the uploader
    /// configuration must then pass the capability check for the action.
    pub(crate) async fn authorize_scoped(
        &self,
        record: &AssetRecord,
        claimed_template: Option<&str>,
        claimed_uploader: Option<&str>,
        check: fn(Option<&UploaderConfig>) -> bool,
        action: &str,
        ctx: &RequestContext,
    ) -> GatewayResult<Option<UploaderConfig>> {
        let (Some(template_id), Some(uploader)) =
            (record.template.as_deref(), record.uploader.as_deref())
        else {
            return Ok(None);
        };

        if claimed_template != Some(template_id) || claimed_uploader != Some(uploader) {
            return Err(GatewayError::BadRequest(
                "Template or uploader does not match the stored asset".to_string(),
            ));
        }

        let template = self.catalog.fetch(template_id, ctx).await?.ok_or_else(|| {
            GatewayError::NotFound(format!("Permission template '{}' not found", template_id))
        })?;

        if template.uploaders.is_empty() {
            return Err(GatewayError::BadConfiguration(format!(
                "Permission template '{}' has no uploaders configured",
                template_id
            )));
        }

        match template.uploader(uploader) {
            Some(config) if check(Some(config)) => Ok(Some(config.clone())),
            _ => Err(GatewayError::PermissionDenied(format!(
                "Uploader '{}' is not allowed to {}",
                uploader, action
            ))),
        }
    }
}
