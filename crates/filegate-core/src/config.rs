//! Configuration module
//!
//! Environment-driven settings for the gateway: where the storage tree
//! lives, and the defaults a transport falls back to when a request omits
//! the base directory, collection, or response shape.

use std::env;
use std::path::PathBuf;

use crate::models::ResponseShape;

const DEFAULT_STORAGE_ROOT: &str = "data";
const DEFAULT_UPLOAD_DIR: &str = "files";
const DEFAULT_COLLECTION: &str = "assets";

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Root directory of the managed storage tree.
    pub storage_root: PathBuf,
    /// Default base upload directory, relative to the storage root.
    pub upload_dir: String,
    /// Default metadata collection name.
    pub collection: String,
    /// Default response shape for uploads that do not specify one.
    pub response_shape: ResponseShape,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_root =
            env::var("FILEGATE_STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string());
        let upload_dir =
            env::var("FILEGATE_UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string());
        let collection =
            env::var("FILEGATE_COLLECTION").unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());
        let response_shape = env::var("FILEGATE_RESPONSE_SHAPE")
            .map(|s| ResponseShape::from_value(&serde_json::Value::String(s)))
            .unwrap_or_default();

        let config = GatewayConfig {
            storage_root: PathBuf::from(storage_root),
            upload_dir,
            collection,
            response_shape,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_root.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("FILEGATE_STORAGE_ROOT must not be empty"));
        }

        if self.upload_dir.is_empty() {
            return Err(anyhow::anyhow!("FILEGATE_UPLOAD_DIR must not be empty"));
        }

        if self.upload_dir.starts_with('/') || self.upload_dir.contains("..") {
            return Err(anyhow::anyhow!(
                "FILEGATE_UPLOAD_DIR must be a relative path inside the storage root"
            ));
        }

        if self.collection.is_empty() {
            return Err(anyhow::anyhow!("FILEGATE_COLLECTION must not be empty"));
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            response_shape: ResponseShape::IdOnly,
        }
    }
}
