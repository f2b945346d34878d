//! Upload-permission enumeration

use std::collections::BTreeMap;

use filegate_core::access::can_upload;
use filegate_core::models::RequestContext;
use filegate_core::{GatewayError, GatewayResult};

use crate::gateway::Gateway;

impl Gateway {
    /// Report, per uploader key, whether the template grants upload.
    ///
    /// A template without uploaders yields an empty mapping.
    pub async fn upload_permissions(
        &self,
        template_id: &str,
        ctx: &RequestContext,
    ) -> GatewayResult<BTreeMap<String, bool>> {
        let template = self.catalog.fetch(template_id, ctx).await?.ok_or_else(|| {
            GatewayError::NotFound(format!("Permission template '{}' not found", template_id))
        })?;

        Ok(template
            .uploaders
            .iter()
            .map(|(key, config)| (key.clone(), can_upload(Some(config))))
            .collect())
    }
}
