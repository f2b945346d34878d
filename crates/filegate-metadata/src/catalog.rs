//! Permission template catalog abstraction

use async_trait::async_trait;

use filegate_core::models::{PermissionTemplate, RequestContext};

use crate::store::StoreResult;

/// Read access to permission templates.
///
/// The catalog is owned by an external system; the caller context is passed
/// through so implementations can apply role-based visibility. `Ok(None)`
/// means the template does not exist for this caller.
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    async fn fetch(
        &self,
        template_id: &str,
        ctx: &RequestContext,
    ) -> StoreResult<Option<PermissionTemplate>>;
}
