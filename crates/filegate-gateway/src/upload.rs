//! Upload pipeline
//!
//! Ingestion workflow: validate → authorize → resolve directory → finalize →
//! transform → persist. The rename into the storage tree is the durability
//! point; failures before it discard the staged file, failures after it
//! leave the finalized file in place.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use filegate_core::access::can_upload;
use filegate_core::hooks::AssetTransformHook;
use filegate_core::models::AssetRecord;
use filegate_core::{GatewayError, GatewayResult};
use filegate_storage::{discard_temp_file, finalize_upload, resolve_upload_dir};

use crate::gateway::Gateway;
use crate::types::{UploadRequest, UploadScope};

/// Everything decided before the staged file is moved.
struct UploadPlan {
    draft: AssetRecord,
    dest_path: PathBuf,
    transform: Option<Arc<dyn AssetTransformHook>>,
}

/// Constraints and hook names the upload scope contributes.
struct ScopeSettings {
    accept_types: Vec<String>,
    dir_fragment: String,
    dir_hook: Option<String>,
    transform_hook: Option<String>,
    template_refs: Option<(String, String)>,
}

impl Gateway {
    /// Ingest a staged file as a new asset.
    ///
    /// Returns the inserted record projected through the request's response
    /// shape.
    pub async fn upload(&self, request: UploadRequest) -> GatewayResult<serde_json::Value> {
        request.validate()?;

        let plan = match self.plan_upload(&request).await {
            Ok(plan) => plan,
            Err(e) => {
                discard_temp_file(&request.file.temp_path).await;
                return Err(e);
            }
        };
        let UploadPlan {
            draft,
            dest_path,
            transform,
        } = plan;

        if let Err(e) = finalize_upload(&request.file.temp_path, &dest_path).await {
            discard_temp_file(&request.file.temp_path).await;
            return Err(e);
        }

        // The rename is durable; failures past this point leave the
        // finalized file on disk without a metadata row.
        let record = match transform {
            Some(hook) => match hook.transform(draft.clone(), &request.context).await {
                Ok(Some(replacement)) => replacement,
                Ok(None) => draft,
                Err(e) => return Err(GatewayError::HookFailed(e)),
            },
            None => draft,
        };

        let collection = self.collection(&request.collection);
        let row = self.store.insert(collection, record).await?;

        tracing::info!(
            asset_id = %row.id,
            collection = %collection,
            path = %row.absolute_file_path,
            "Asset upload complete"
        );

        Ok(self.response_shape(&request.response_shape).project(&row))
    }

    /// Authorize the upload and decide where the staged file goes.
    async fn plan_upload(&self, request: &UploadRequest) -> GatewayResult<UploadPlan> {
        let settings = self.scope_settings(request).await?;

        let extension = file_extension(&request.file.name);
        if !is_accepted(&extension, &settings.accept_types) {
            return Err(GatewayError::InvalidType(request.file.name.clone()));
        }

        let caller_base = self.base_dir(&request.upload_dir).to_string();
        let effective_base = format!("{}{}", caller_base, settings.dir_fragment);

        let dir_hook = match &settings.dir_hook {
            Some(name) => Some(
                self.hooks
                    .dir_resolver(name)
                    .await
                    .map_err(|e| GatewayError::BadConfiguration(e.to_string()))?,
            ),
            None => None,
        };
        let transform = match &settings.transform_hook {
            Some(name) => Some(
                self.hooks
                    .transform(name)
                    .await
                    .map_err(|e| GatewayError::BadConfiguration(e.to_string()))?,
            ),
            None => None,
        };

        let resolved = resolve_upload_dir(
            &self.root,
            &effective_base,
            dir_hook.as_deref().map(|hook| (hook, &request.context)),
        )
        .await?;

        let id = request
            .file
            .temp_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                GatewayError::Validation("Staged file path has no usable name".to_string())
            })?
            .to_string();

        let stored_name = format!("{}{}", id, extension);
        let dest_path = resolved.absolute.join(&stored_name);

        let record_dir = strip_base(&resolved.relative, &caller_base);
        let file_path = if record_dir.is_empty() {
            stored_name.clone()
        } else {
            format!("{}/{}", record_dir, stored_name)
        };

        let (template, uploader) = match settings.template_refs {
            Some((template, uploader)) => (Some(template), Some(uploader)),
            None => (None, None),
        };

        let draft = AssetRecord {
            id,
            file_name: request.file.name.clone(),
            extension,
            absolute_file_path: dest_path.display().to_string(),
            file_path,
            template,
            uploader,
            uploaded_at: Utc::now(),
        };

        tracing::debug!(
            asset_id = %draft.id,
            path = %dest_path.display(),
            "Upload destination resolved"
        );

        Ok(UploadPlan {
            draft,
            dest_path,
            transform,
        })
    }

    /// Resolve the scope into accept constraints and hook names.
    ///
    /// Template scope performs the catalog lookup and the upload capability
    /// check; direct scope takes everything from the request.
    async fn scope_settings(&self, request: &UploadRequest) -> GatewayResult<ScopeSettings> {
        match &request.scope {
            UploadScope::Template {
                template_id,
                uploader,
            } => {
                if uploader.is_empty() {
                    return Err(GatewayError::Validation(
                        "Uploader name is required".to_string(),
                    ));
                }

                let template = self
                    .catalog
                    .fetch(template_id, &request.context)
                    .await?
                    .ok_or_else(|| {
                        GatewayError::NotFound(format!(
                            "Permission template '{}' not found",
                            template_id
                        ))
                    })?;

                if template.uploaders.is_empty() {
                    return Err(GatewayError::BadConfiguration(format!(
                        "Permission template '{}' has no uploaders configured",
                        template_id
                    )));
                }

                let config = match template.uploader(uploader) {
                    Some(config) if can_upload(Some(config)) => config.clone(),
                    _ => {
                        return Err(GatewayError::PermissionDenied(format!(
                            "Uploader '{}' is not allowed to upload",
                            uploader
                        )))
                    }
                };

                Ok(ScopeSettings {
                    accept_types: config.accept_types,
                    dir_fragment: config.upload_dir,
                    dir_hook: config.custom_upload,
                    transform_hook: config.upload_file_event,
                    template_refs: Some((template_id.clone(), uploader.clone())),
                })
            }
            UploadScope::Direct {
                accept_types,
                custom_upload,
                upload_file_event,
            } => Ok(ScopeSettings {
                accept_types: accept_types.clone(),
                dir_fragment: String::new(),
                dir_hook: custom_upload.clone(),
                transform_hook: upload_file_event.clone(),
                template_refs: None,
            }),
        }
    }
}

/// Extension of a file name, from the last dot inclusive. No dot means no
/// extension.
fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_string(),
        None => String::new(),
    }
}

/// Whether the extension passes the accept list. An empty list accepts
/// everything; comparison is exact after dropping a leading dot on either
/// side.
fn is_accepted(extension: &str, accept_types: &[String]) -> bool {
    if accept_types.is_empty() {
        return true;
    }

    let ext = extension.strip_prefix('.').unwrap_or(extension);
    accept_types
        .iter()
        .any(|accept| accept.strip_prefix('.').unwrap_or(accept) == ext)
}

/// Drop the caller base prefix from a resolved relative directory, leaving
/// the part that goes into the record's file path.
fn strip_base(relative: &str, base: &str) -> String {
    let rest = relative.strip_prefix(base).unwrap_or(relative);
    rest.trim_start_matches('/').to_string()
}
