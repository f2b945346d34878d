//! Download pipeline integration tests.
//!
//! Run with: `cargo test -p filegate-gateway --test download_test`

mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use filegate_core::hooks::PathResolverHook;
use filegate_core::models::{AssetRecord, RequestContext};
use filegate_core::GatewayError;
use filegate_gateway::FetchRequest;
use filegate_metadata::AssetStore;

use helpers::{
    direct_scope, place_file, put_single_uploader_template, read_stream, record, scoped_fetch,
    setup_gateway, stage_file, upload_request, uploader_config, COLLECTION, TEMPLATE_ID, UPLOADER,
};

#[tokio::test]
async fn test_download_round_trip_after_upload() {
    let t = setup_gateway().await;
    let body = b"download me";
    let (temp, id) = stage_file(&t.root, body).await;
    t.gateway
        .upload(upload_request(temp, "notes.txt", body.len() as u64, direct_scope()))
        .await
        .unwrap();

    let download = t
        .gateway
        .fetch(FetchRequest {
            item_id: id,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(download.file_name, "notes.txt");
    assert_eq!(
        download.content_disposition(),
        "attachment; filename=\"notes.txt\""
    );
    assert_eq!(read_stream(download).await, body);
}

#[tokio::test]
async fn test_download_requires_delete_capability() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "scan.pdf", Some((TEMPLATE_ID, UPLOADER)));
    place_file(&t.root, &asset, b"pdf bytes").await;
    t.store.insert(COLLECTION, asset).await.unwrap();

    put_single_uploader_template(&t.catalog, TEMPLATE_ID, UPLOADER, uploader_config("ur")).await;

    let result = t.gateway.fetch(scoped_fetch("a1")).await;
    assert!(matches!(result, Err(GatewayError::PermissionDenied(_))));
}

#[tokio::test]
async fn test_delete_capability_alone_grants_download() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "scan.pdf", Some((TEMPLATE_ID, UPLOADER)));
    place_file(&t.root, &asset, b"pdf bytes").await;
    t.store.insert(COLLECTION, asset).await.unwrap();

    put_single_uploader_template(&t.catalog, TEMPLATE_ID, UPLOADER, uploader_config("d")).await;

    let download = t.gateway.fetch(scoped_fetch("a1")).await.unwrap();
    assert_eq!(read_stream(download).await, b"pdf bytes");
}

#[tokio::test]
async fn test_scope_mismatch_rejected_before_catalog() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "scan.pdf", Some((TEMPLATE_ID, UPLOADER)));
    place_file(&t.root, &asset, b"pdf bytes").await;
    t.store.insert(COLLECTION, asset).await.unwrap();
    put_single_uploader_template(&t.catalog, TEMPLATE_ID, UPLOADER, uploader_config("d")).await;

    let mut request = scoped_fetch("a1");
    request.uploader = Some("intruder".to_string());
    let result = t.gateway.fetch(request).await;
    assert!(matches!(result, Err(GatewayError::BadRequest(_))));

    // Claims omitted entirely are also a mismatch
    let result = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(GatewayError::BadRequest(_))));

    assert_eq!(t.catalog.fetches(), 0);
}

#[tokio::test]
async fn test_unscoped_record_skips_catalog() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "notes.txt", None);
    place_file(&t.root, &asset, b"plain").await;
    t.store.insert(COLLECTION, asset).await.unwrap();

    let download = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(read_stream(download).await, b"plain");
    assert_eq!(t.catalog.fetches(), 0);
}

#[tokio::test]
async fn test_missing_item_not_found() {
    let t = setup_gateway().await;

    let result = t
        .gateway
        .fetch(FetchRequest {
            item_id: "missing".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

#[tokio::test]
async fn test_missing_file_on_disk_not_found() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "notes.txt", None);
    t.store.insert(COLLECTION, asset).await.unwrap();

    let result = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

struct Mirror {
    path: PathBuf,
}

#[async_trait]
impl PathResolverHook for Mirror {
    fn name(&self) -> &str {
        "mirror"
    }

    async fn resolve_path(
        &self,
        _record: &AssetRecord,
        _ctx: &RequestContext,
    ) -> anyhow::Result<PathBuf> {
        Ok(self.path.clone())
    }
}

#[tokio::test]
async fn test_request_path_handler_overrides_location() {
    let t = setup_gateway().await;
    let alt = t.root.path().join("alt.bin");
    tokio::fs::write(&alt, b"alternate").await.unwrap();
    t.hooks
        .register_path_resolver(Arc::new(Mirror { path: alt }))
        .await;

    let asset = record(&t.root, "a1", "notes.txt", None);
    t.store.insert(COLLECTION, asset).await.unwrap();

    let download = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            custom_path_handler: Some("mirror".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(read_stream(download).await, b"alternate");
}

#[tokio::test]
async fn test_scoped_path_handler_comes_from_config() {
    let t = setup_gateway().await;
    let alt = t.root.path().join("alt.bin");
    tokio::fs::write(&alt, b"alternate").await.unwrap();
    t.hooks
        .register_path_resolver(Arc::new(Mirror { path: alt }))
        .await;

    let asset = record(&t.root, "a1", "scan.pdf", Some((TEMPLATE_ID, UPLOADER)));
    t.store.insert(COLLECTION, asset).await.unwrap();

    let mut config = uploader_config("d");
    config.custom_path_handler = Some("mirror".to_string());
    put_single_uploader_template(&t.catalog, TEMPLATE_ID, UPLOADER, config).await;

    // No default-path file exists, so this only succeeds through the hook
    let download = t.gateway.fetch(scoped_fetch("a1")).await.unwrap();
    assert_eq!(read_stream(download).await, b"alternate");
}

#[tokio::test]
async fn test_unregistered_path_handler_bad_configuration() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "notes.txt", None);
    place_file(&t.root, &asset, b"plain").await;
    t.store.insert(COLLECTION, asset).await.unwrap();

    let result = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            custom_path_handler: Some("ghost".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(GatewayError::BadConfiguration(_))));
}

#[tokio::test]
async fn test_store_failure_surfaces() {
    let t = setup_gateway().await;
    t.store.set_fail_queries(true);

    let result = t
        .gateway
        .fetch(FetchRequest {
            item_id: "a1".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(GatewayError::Store(_))));
}

#[tokio::test]
async fn test_scoped_record_with_missing_template_not_found() {
    let t = setup_gateway().await;
    let asset = record(&t.root, "a1", "scan.pdf", Some((TEMPLATE_ID, UPLOADER)));
    place_file(&t.root, &asset, b"pdf bytes").await;
    t.store.insert(COLLECTION, asset).await.unwrap();

    let result = t.gateway.fetch(scoped_fetch("a1")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}
