//! Gateway request and response types
//!
//! These are the programmatic interfaces of the pipelines. A transport layer
//! maps its own request format onto these structs; absent optional fields
//! fall back to the gateway configuration defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use validator::Validate;

use filegate_core::models::{AssetRecord, RequestContext, ResponseShape};
use filegate_metadata::FindOptions;
use filegate_storage::AssetByteStream;

/// A file staged by the transport, ready for ingestion.
///
/// `temp_path` names the staged bytes on disk; its file name stem becomes
/// the asset id at finalization.
#[derive(Debug, Clone, Validate)]
pub struct UploadedFile {
    #[validate(length(min = 1, message = "File name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "File must not be empty"))]
    pub size: u64,
    pub temp_path: PathBuf,
}

/// Scope under which an upload is authorized.
#[derive(Debug, Clone)]
pub enum UploadScope {
    /// Authorized through an uploader entry of a permission template.
    Template { template_id: String, uploader: String },
    /// Direct ingestion with constraints and hooks named by the request.
    Direct {
        accept_types: Vec<String>,
        custom_upload: Option<String>,
        upload_file_event: Option<String>,
    },
}

/// Upload pipeline request.
#[derive(Debug, Clone, Validate)]
pub struct UploadRequest {
    #[validate(nested)]
    pub file: UploadedFile,
    #[validate(length(min = 1, message = "Upload directory must not be empty"))]
    pub upload_dir: Option<String>,
    #[validate(length(min = 1, message = "Collection must not be empty"))]
    pub collection: Option<String>,
    pub scope: UploadScope,
    pub response_shape: Option<ResponseShape>,
    pub context: RequestContext,
}

/// Download pipeline request.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    pub item_id: String,
    pub template: Option<String>,
    pub uploader: Option<String>,
    pub upload_dir: Option<String>,
    pub collection: Option<String>,
    pub custom_path_handler: Option<String>,
    pub context: RequestContext,
}

/// Remove pipeline request.
#[derive(Debug, Clone, Default)]
pub struct RemoveRequest {
    pub item_id: String,
    pub template: Option<String>,
    pub uploader: Option<String>,
    pub upload_dir: Option<String>,
    pub collection: Option<String>,
    pub remove_file_event: Option<String>,
    pub context: RequestContext,
}

/// Asset listing request.
#[derive(Debug, Clone, Validate)]
pub struct ListRequest {
    #[validate(length(min = 1, message = "Template id must not be empty"))]
    pub template: String,
    #[validate(length(min = 1, message = "Uploader name must not be empty"))]
    pub uploader: String,
    pub collection: Option<String>,
    /// Extra field-equality conditions merged over the scope fields.
    pub filters: BTreeMap<String, serde_json::Value>,
    pub options: FindOptions,
    pub context: RequestContext,
}

/// A downloadable asset: the original file name plus a byte stream.
pub struct AssetDownload {
    pub file_name: String,
    pub stream: AssetByteStream,
}

impl AssetDownload {
    /// Content-Disposition value for attachment delivery.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

/// Result of an asset listing.
#[derive(Debug, Clone)]
pub struct AssetListing {
    pub assets: Vec<AssetRecord>,
    /// Whether the requesting uploader lacks the capability to remove the
    /// listed assets.
    pub remove_forbidden: bool,
}
