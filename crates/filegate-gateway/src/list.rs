//! Asset listing pipeline

use validator::Validate;

use filegate_core::access::{can_delete, can_read};
use filegate_core::{GatewayError, GatewayResult};
use filegate_metadata::AssetQuery;

use crate::gateway::Gateway;
use crate::types::{AssetListing, ListRequest};

impl Gateway {
    /// List the assets ingested under a template/uploader scope.
    ///
    /// Returns `Ok(None)` when the uploader is unknown to the template or
    /// lacks the capability that reveals listings; callers treat that as an
    /// empty answer rather than an error.
    pub async fn list_assets(&self, request: ListRequest) -> GatewayResult<Option<AssetListing>> {
        request.validate()?;

        let template = self
            .catalog
            .fetch(&request.template, &request.context)
            .await?
            .ok_or_else(|| {
                GatewayError::NotFound(format!(
                    "Permission template '{}' not found",
                    request.template
                ))
            })?;

        if template.uploaders.is_empty() {
            return Err(GatewayError::BadConfiguration(format!(
                "Permission template '{}' has no uploaders configured",
                request.template
            )));
        }

        let config = template.uploader(&request.uploader);
        if !can_delete(config) {
            tracing::debug!(
                template = %request.template,
                uploader = %request.uploader,
                "Listing withheld for uploader"
            );
            return Ok(None);
        }
        let remove_forbidden = !can_read(config);

        // Scope fields first; caller filters overwrite on key collision.
        let mut query = AssetQuery::new()
            .field("template", request.template.clone())
            .field("uploader", request.uploader.clone());
        for (key, value) in &request.filters {
            query.insert(key.clone(), value.clone());
        }

        let collection = self.collection(&request.collection);
        let assets = self.store.find(collection, &query, &request.options).await?;

        tracing::debug!(
            template = %request.template,
            uploader = %request.uploader,
            count = assets.len(),
            "Asset listing served"
        );

        Ok(Some(AssetListing {
            assets,
            remove_forbidden,
        }))
    }
}
