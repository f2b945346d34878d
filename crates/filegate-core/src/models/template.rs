use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Permission template: maps uploader keys to their per-class configuration.
///
/// Templates are documents owned by an external catalog. A template with no
/// `uploaders` entry deserializes to an empty map rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionTemplate {
    pub id: String,
    #[serde(default)]
    pub uploaders: HashMap<String, UploaderConfig>,
}

impl PermissionTemplate {
    /// Look up the configuration for an uploader key.
    pub fn uploader(&self, key: &str) -> Option<&UploaderConfig> {
        self.uploaders.get(key)
    }
}

/// Per-uploader configuration within a permission template.
///
/// `access` holds capability characters checked by substring containment.
/// `upload_dir` is a fragment appended verbatim to the caller's base upload
/// directory. The four optional fields name hooks resolved through the
/// [`HookRegistry`](crate::hooks::HookRegistry) at execution time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderConfig {
    #[serde(default)]
    pub access: String,
    /// Accepted file extensions without a leading dot. Empty means all types.
    #[serde(default)]
    pub accept_types: Vec<String>,
    #[serde(default)]
    pub upload_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_upload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_file_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_path_handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_file_event: Option<String>,
}

impl UploaderConfig {
    /// Check whether the access string carries a capability character.
    pub fn has_capability(&self, capability: char) -> bool {
        self.access.contains(capability)
    }
}
