//! Download pipeline
//!
//! Retrieval workflow: look up the record, check the caller's scope claim,
//! enforce the capability gate, resolve the on-disk path, and hand back a
//! byte stream.

use filegate_core::access::can_delete;
use filegate_core::{GatewayError, GatewayResult};
use filegate_storage::open_asset_stream;

use crate::gateway::Gateway;
use crate::types::{AssetDownload, FetchRequest};

impl Gateway {
    /// Fetch an asset as a download stream.
    pub async fn fetch(&self, request: FetchRequest) -> GatewayResult<AssetDownload> {
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
                can_delete,
                "download",
                &request.context,
            )
            .await?;

        // Scoped records take the path hook from the uploader config, the
        // request's hook applies to unscoped records only.
        let handler = match &config {
            Some(config) => config.custom_path_handler.clone(),
            None => request.custom_path_handler.clone(),
        };

        let path = match handler {
            Some(name) => {
                let hook = self
                    .hooks
                    .path_resolver(&name)
                    .await
                    .map_err(|e| GatewayError::BadConfiguration(e.to_string()))?;
                hook.resolve_path(&record, &request.context)
                    .await
                    .map_err(GatewayError::HookFailed)?
            }
            None => {
                let base_dir = self.base_dir(&request.upload_dir);
                self.root.asset_path(base_dir, &record.file_path)?
            }
        };

        tracing::debug!(
            asset_id = %record.id,
            path = %path.display(),
            "Asset download path resolved"
        );

        let stream = open_asset_stream(&path).await?;

        Ok(AssetDownload {
            file_name: record.file_name,
            stream,
        })
    }
}
