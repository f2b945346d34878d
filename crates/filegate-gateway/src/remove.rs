//! Remove pipeline
//!
//! Removal order is metadata row first, then the file on disk. A pre-delete
//! hook can veto the whole operation before anything is touched.

use filegate_core::access::can_read;
use filegate_core::{GatewayError, GatewayResult};
use filegate_storage::remove_asset_file;

use crate::gateway::Gateway;
use crate::types::RemoveRequest;

impl Gateway {
    /// Remove an asset's metadata row and its file.
    pub async fn remove(&self, request: RemoveRequest) -> GatewayResult<()> {
        let collection = self.collection(&request.collection);
        let record = self
            .store
            .find_one(collection, &request.item_id)
            .await?
            .ok_or_else(|| {
                GatewayError::NotFound(format!("Item '{}' not found", request.item_id))
            })?;

        let config = self
            .authorize_scoped(
                &record,
                request.template.as_deref(),
                request.uploader.as_deref(),
                can_read,
                "remove",
                &request.context,
            )
            .await?;

        let hook_name = match &config {
            Some(config) => config.remove_file_event.clone(),
            None => request.remove_file_event.clone(),
        };

        if let Some(name) = hook_name {
            let hook = self
                .hooks
                .pre_delete(&name)
                .await
                .map_err(|e| GatewayError::BadConfiguration(e.to_string()))?;
            hook.before_remove(&request.context)
                .await
                .map_err(|e| GatewayError::HookRejected(e.to_string()))?;
        }

        // Removal always targets the default composed path, never a custom
        // path hook.
        let base_dir = self.base_dir(&request.upload_dir);
        let path = self.root.asset_path(base_dir, &record.file_path)?;

        self.store.remove(collection, &request.item_id).await?;

        // The row is gone at this point; a failed unlink leaves the file
        // behind and is reported to the caller.
        remove_asset_file(&path)
            .await
            .map_err(|e| GatewayError::FileDeleteFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            asset_id = %record.id,
            collection = %collection,
            "Asset removed"
        );

        Ok(())
    }
}
