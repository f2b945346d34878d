//! Storage root and path composition

use std::path::{Path, PathBuf};

use filegate_core::{GatewayError, GatewayResult};

/// Root directory of the managed storage tree.
///
/// Every on-disk location the gateway touches is composed under this root
/// from validated relative parts; the root itself is held explicitly rather
/// than read from ambient state.
#[derive(Debug, Clone)]
pub struct StorageRoot(PathBuf);

impl StorageRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageRoot(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Compose `<root>/<base>` after validating the base.
    pub fn base_path(&self, base_dir: &str) -> GatewayResult<PathBuf> {
        validate_relative(base_dir)?;
        Ok(self.0.join(base_dir))
    }

    /// Compose `<root>/<base>/<file_path>`, the default on-disk location of
    /// an asset recorded with the given relative file path.
    pub fn asset_path(&self, base_dir: &str, file_path: &str) -> GatewayResult<PathBuf> {
        validate_relative(file_path)?;
        Ok(self.base_path(base_dir)?.join(file_path))
    }
}

/// Validate that a relative path stays inside the storage tree.
///
/// Rejects traversal sequences and absolute paths before any filesystem
/// access happens.
pub fn validate_relative(path: &str) -> GatewayResult<()> {
    if path.contains("..") || path.starts_with('/') {
        return Err(GatewayError::BadRequest(
            "Path escapes the storage root".to_string(),
        ));
    }
    Ok(())
}
