//! Test helpers: build a gateway over a temp storage tree with in-memory
//! metadata backends.
//!
//! Run from workspace root: `cargo test -p filegate-gateway` or a single
//! pipeline via `cargo test -p filegate-gateway --test upload_test`.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use filegate_core::config::GatewayConfig;
use filegate_core::hooks::HookRegistry;
use filegate_core::models::{
    AssetRecord, PermissionTemplate, RequestContext, ResponseShape, UploaderConfig,
};
use filegate_gateway::{FetchRequest, Gateway, ListRequest, UploadRequest, UploadScope, UploadedFile};
use filegate_metadata::{FindOptions, MemoryCatalog, MemoryStore};

pub const TEMPLATE_ID: &str = "invoices";
pub const UPLOADER: &str = "scanner";
pub const COLLECTION: &str = "assets";

/// Test gateway over a temp storage tree, with handles to the injected
/// backends for seeding and assertions.
pub struct TestGateway {
    pub gateway: Gateway,
    pub store: MemoryStore,
    pub catalog: MemoryCatalog,
    pub hooks: HookRegistry,
    pub root: TempDir,
}

/// Set up a gateway whose base upload directory `files` already exists.
pub async fn setup_gateway() -> TestGateway {
    let root = tempfile::tempdir().unwrap();
    tokio::fs::create_dir(root.path().join("files"))
        .await
        .unwrap();

    let store = MemoryStore::new();
    let catalog = MemoryCatalog::new();
    let hooks = HookRegistry::new();

    let config = GatewayConfig {
        storage_root: root.path().to_path_buf(),
        upload_dir: "files".to_string(),
        collection: COLLECTION.to_string(),
        response_shape: ResponseShape::IdOnly,
    };

    let gateway = Gateway::new(
        config,
        Arc::new(store.clone()),
        Arc::new(catalog.clone()),
        hooks.clone(),
    );

    TestGateway {
        gateway,
        store,
        catalog,
        hooks,
        root,
    }
}

/// An uploader configuration with the given access string.
pub fn uploader_config(access: &str) -> UploaderConfig {
    UploaderConfig {
        access: access.to_string(),
        ..Default::default()
    }
}

/// Register a template with a single uploader entry.
pub async fn put_single_uploader_template(
    catalog: &MemoryCatalog,
    template_id: &str,
    uploader: &str,
    config: UploaderConfig,
) {
    let mut uploaders = HashMap::new();
    uploaders.insert(uploader.to_string(), config);
    catalog
        .put(PermissionTemplate {
            id: template_id.to_string(),
            uploaders,
        })
        .await;
}

/// Stage upload bytes under a fresh uuid name, the way a transport would.
pub async fn stage_file(root: &TempDir, body: &[u8]) -> (PathBuf, String) {
    let id = Uuid::new_v4().to_string();
    let staging = root.path().join("staging");
    tokio::fs::create_dir_all(&staging).await.unwrap();

    let path = staging.join(&id);
    tokio::fs::write(&path, body).await.unwrap();
    (path, id)
}

/// An upload request with config-defaulted directory, collection, and shape.
pub fn upload_request(temp_path: PathBuf, name: &str, size: u64, scope: UploadScope) -> UploadRequest {
    UploadRequest {
        file: UploadedFile {
            name: name.to_string(),
            size,
            temp_path,
        },
        upload_dir: None,
        collection: None,
        scope,
        response_shape: None,
        context: RequestContext::default(),
    }
}

pub fn template_scope() -> UploadScope {
    UploadScope::Template {
        template_id: TEMPLATE_ID.to_string(),
        uploader: UPLOADER.to_string(),
    }
}

pub fn direct_scope() -> UploadScope {
    UploadScope::Direct {
        accept_types: vec![],
        custom_upload: None,
        upload_file_event: None,
    }
}

/// A fetch request claiming the standard test scope.
pub fn scoped_fetch(item_id: &str) -> FetchRequest {
    FetchRequest {
        item_id: item_id.to_string(),
        template: Some(TEMPLATE_ID.to_string()),
        uploader: Some(UPLOADER.to_string()),
        ..Default::default()
    }
}

/// A listing request for the standard test scope.
pub fn list_request() -> ListRequest {
    ListRequest {
        template: TEMPLATE_ID.to_string(),
        uploader: UPLOADER.to_string(),
        collection: None,
        filters: BTreeMap::new(),
        options: FindOptions::default(),
        context: RequestContext::default(),
    }
}

/// Build a record the way the upload pipeline persists it, directly under
/// the base directory.
pub fn record(root: &TempDir, id: &str, file_name: &str, scope: Option<(&str, &str)>) -> AssetRecord {
    let extension = match file_name.rfind('.') {
        Some(idx) => file_name[idx..].to_string(),
        None => String::new(),
    };
    let file_path = format!("{}{}", id, extension);

    AssetRecord {
        id: id.to_string(),
        file_name: file_name.to_string(),
        extension,
        absolute_file_path: root
            .path()
            .join("files")
            .join(&file_path)
            .display()
            .to_string(),
        file_path,
        template: scope.map(|(template, _)| template.to_string()),
        uploader: scope.map(|(_, uploader)| uploader.to_string()),
        uploaded_at: chrono::Utc::now(),
    }
}

/// Write a record's file under the storage tree.
pub async fn place_file(root: &TempDir, record: &AssetRecord, body: &[u8]) {
    let path = root.path().join("files").join(&record.file_path);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.unwrap();
    }
    tokio::fs::write(&path, body).await.unwrap();
}

/// Drain a download stream into a byte vector.
pub async fn read_stream(download: filegate_gateway::AssetDownload) -> Vec<u8> {
    use futures::StreamExt;

    let mut stream = download.stream;
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk.unwrap());
    }
    body
}
