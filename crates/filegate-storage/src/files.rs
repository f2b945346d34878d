//! Asset file operations

use std::io;
use std::path::Path;
use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::fs;

use filegate_core::{GatewayError, GatewayResult};

/// Byte stream of an asset body, chunked as it is read from disk.
pub type AssetByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

/// Move a fully staged upload into its final location.
///
/// The rename is the commit point of an upload: before it the staged file is
/// disposable, after it the asset exists on disk under its durable path.
pub async fn finalize_upload(temp_path: &Path, dest_path: &Path) -> GatewayResult<()> {
    let start = std::time::Instant::now();

    fs::rename(temp_path, dest_path).await.map_err(|e| {
        tracing::error!(
            from = %temp_path.display(),
            to = %dest_path.display(),
            error = %e,
            "Failed to finalize upload"
        );
        GatewayError::Filesystem(e)
    })?;

    tracing::info!(
        path = %dest_path.display(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Upload finalized"
    );

    Ok(())
}

/// Open an asset file as a chunked byte stream.
///
/// A missing file is a `NotFound`; read errors after the stream is handed
/// out surface as stream items and are logged when they occur.
pub async fn open_asset_stream(path: &Path) -> GatewayResult<AssetByteStream> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(GatewayError::NotFound(format!(
            "File {} does not exist",
            path.display()
        )));
    }

    let file = fs::File::open(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open asset file");
        GatewayError::Filesystem(e)
    })?;

    let path_display = path.display().to_string();
    let stream = tokio_util::io::ReaderStream::new(file).map(move |item| {
        if let Err(e) = &item {
            tracing::error!(
                path = %path_display,
                error = %e,
                "Asset stream read error"
            );
        }
        item
    });

    Ok(Box::pin(stream))
}

/// Unlink an asset file.
///
/// Returns the raw io error so callers decide how a failed unlink ranks
/// against the rest of their pipeline.
pub async fn remove_asset_file(path: &Path) -> Result<(), io::Error> {
    let start = std::time::Instant::now();

    fs::remove_file(path).await?;

    tracing::info!(
        path = %path.display(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Asset file removed"
    );

    Ok(())
}

/// Best-effort removal of a staged temp file after a failed upload.
///
/// A temp file that cannot be deleted is logged and left behind.
pub async fn discard_temp_file(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to discard staged temp file"
        );
    }
}
