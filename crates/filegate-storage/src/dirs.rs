//! Upload directory resolution

use std::io;
use std::path::PathBuf;

use filegate_core::hooks::DirectoryNameResolver;
use filegate_core::models::RequestContext;
use filegate_core::{GatewayError, GatewayResult};

use crate::root::StorageRoot;

/// Directory an upload will be finalized into.
///
/// `relative` always starts with the caller base directory, so it can be
/// persisted and later re-joined under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDir {
    pub absolute: PathBuf,
    pub relative: String,
}

/// Resolve the target directory for an upload.
///
/// Without a hook this is a pure composition: `<root>/<base>` with no
/// filesystem access. With a hook, the hook names a `/`-separated fragment
/// under the base and every missing segment is created one level at a time.
/// The base directory itself is never created here.
pub async fn resolve_upload_dir(
    root: &StorageRoot,
    base_dir: &str,
    hook: Option<(&dyn DirectoryNameResolver, &RequestContext)>,
) -> GatewayResult<ResolvedDir> {
    let base = root.base_path(base_dir)?;

    let Some((resolver, ctx)) = hook else {
        return Ok(ResolvedDir {
            absolute: base,
            relative: base_dir.to_string(),
        });
    };

    let fragment = resolver
        .resolve_dir(ctx)
        .await
        .map_err(GatewayError::HookFailed)?;

    let segments: Vec<&str> = fragment.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|s| *s == "..") {
        return Err(GatewayError::BadRequest(
            "Resolved directory escapes the storage root".to_string(),
        ));
    }

    if segments.is_empty() {
        tracing::debug!(
            resolver = resolver.name(),
            "Directory hook resolved an empty fragment"
        );
        return Ok(ResolvedDir {
            absolute: base,
            relative: base_dir.to_string(),
        });
    }

    let mut dir = base;
    for segment in &segments {
        dir = dir.join(segment);
        match tokio::fs::create_dir(&dir).await {
            Ok(()) => {
                tracing::debug!(path = %dir.display(), "Created upload directory segment");
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                tracing::error!(
                    path = %dir.display(),
                    error = %e,
                    "Failed to create upload directory"
                );
                return Err(GatewayError::Filesystem(e));
            }
        }
    }

    Ok(ResolvedDir {
        absolute: dir,
        relative: format!("{}/{}", base_dir, segments.join("/")),
    })
}
