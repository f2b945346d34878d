//! Permission model
//!
//! Capability checks over an uploader's access string. Capabilities are
//! single characters tested by substring containment; an absent uploader
//! configuration grants nothing.

use crate::models::UploaderConfig;

/// Capability character granting upload.
pub const CAP_UPLOAD: char = 'u';
/// Capability character granting read.
pub const CAP_READ: char = 'r';
/// Capability character granting delete.
pub const CAP_DELETE: char = 'd';

/// Whether the uploader may ingest new assets.
pub fn can_upload(config: Option<&UploaderConfig>) -> bool {
    has_capability(config, CAP_UPLOAD)
}

/// Whether the uploader holds the read capability.
pub fn can_read(config: Option<&UploaderConfig>) -> bool {
    has_capability(config, CAP_READ)
}

/// Whether the uploader holds the delete capability.
pub fn can_delete(config: Option<&UploaderConfig>) -> bool {
    has_capability(config, CAP_DELETE)
}

fn has_capability(config: Option<&UploaderConfig>, capability: char) -> bool {
    config.map(|c| c.has_capability(capability)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_access(access: &str) -> UploaderConfig {
        UploaderConfig {
            access: access.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_access_grants_everything() {
        let config = config_with_access("urd");
        assert!(can_upload(Some(&config)));
        assert!(can_read(Some(&config)));
        assert!(can_delete(Some(&config)));
    }

    #[test]
    fn test_empty_access_grants_nothing() {
        let config = config_with_access("");
        assert!(!can_upload(Some(&config)));
        assert!(!can_read(Some(&config)));
        assert!(!can_delete(Some(&config)));
    }

    #[test]
    fn test_absent_config_grants_nothing() {
        assert!(!can_upload(None));
        assert!(!can_read(None));
        assert!(!can_delete(None));
    }

    #[test]
    fn test_capability_position_is_irrelevant() {
        let config = config_with_access("dru");
        assert!(can_upload(Some(&config)));
        assert!(can_read(Some(&config)));
        assert!(can_delete(Some(&config)));
    }

    #[test]
    fn test_duplicate_characters_still_grant() {
        let config = config_with_access("uurr");
        assert!(can_upload(Some(&config)));
        assert!(can_read(Some(&config)));
        assert!(!can_delete(Some(&config)));
    }

    #[test]
    fn test_unrelated_characters_grant_nothing() {
        let config = config_with_access("xyz");
        assert!(!can_upload(Some(&config)));
        assert!(!can_read(Some(&config)));
        assert!(!can_delete(Some(&config)));
    }
}
