use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata record describing one stored asset.
///
/// `file_path` is the durable client-facing reference, relative to the base
/// upload directory the asset was ingested under. `absolute_file_path` is the
/// resolved on-disk location at finalization time. `template` and `uploader`
/// are either both present (asset ingested under a permission template) or
/// both absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    pub file_name: String,
    /// Extension including the leading dot, or empty for dotless names.
    pub extension: String,
    pub absolute_file_path: String,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl AssetRecord {
    /// Whether this asset was ingested under a permission template.
    pub fn is_scoped(&self) -> bool {
        self.template.is_some() && self.uploader.is_some()
    }

    /// The on-disk file name: `<id><extension>`.
    pub fn stored_name(&self) -> String {
        format!("{}{}", self.id, self.extension)
    }
}

/// Caller context threaded through catalog lookups and every hook invocation.
///
/// `role` identifies the caller to the template catalog; `data` carries
/// whatever request payload the transport captured for hooks to inspect.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub role: Option<String>,
    pub data: serde_json::Value,
}

impl RequestContext {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// How an upload response projects the inserted asset record.
///
/// Decoding is tolerant: `"object"` and `"path"` select the fuller shapes,
/// a `{"type": "custom", "value": <field>}` object selects a single field,
/// and anything else (including absence) falls back to the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// The whole record as a JSON document.
    Full,
    /// The record's relative file path.
    PathOnly,
    /// The record's id.
    #[default]
    IdOnly,
    /// A single named field of the serialized record.
    Field(String),
}

impl ResponseShape {
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) if s == "object" => ResponseShape::Full,
            serde_json::Value::String(s) if s == "path" => ResponseShape::PathOnly,
            serde_json::Value::Object(map) => {
                let is_custom = map.get("type").and_then(|t| t.as_str()) == Some("custom");
                match map.get("value").and_then(|v| v.as_str()) {
                    Some(field) if is_custom => ResponseShape::Field(field.to_string()),
                    _ => ResponseShape::IdOnly,
                }
            }
            _ => ResponseShape::IdOnly,
        }
    }

    /// Project a record into the response value for this shape.
    ///
    /// A custom field absent from the serialized record projects to JSON null.
    pub fn project(&self, record: &AssetRecord) -> serde_json::Value {
        match self {
            ResponseShape::Full => {
                serde_json::to_value(record).unwrap_or(serde_json::Value::Null)
            }
            ResponseShape::PathOnly => serde_json::Value::String(record.file_path.clone()),
            ResponseShape::IdOnly => serde_json::Value::String(record.id.clone()),
            ResponseShape::Field(name) => serde_json::to_value(record)
                .ok()
                .and_then(|doc| doc.get(name).cloned())
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(ResponseShape::from_value(&value))
    }
}
