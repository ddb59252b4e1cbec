use crate::error::DriveError;
use crate::marker::{MARKER_CONTENT_TYPE, MARKER_NAME};
use crate::sanitize::is_sanitized;
use serde::Deserialize;

/// Tunables of a [`Drive`](crate::Drive).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Entries requested per list call.
    pub page_size: usize,
    /// File name of the directory marker.
    pub marker_name: String,
    /// Content type the marker is uploaded with.
    pub marker_content_type: String,
    /// Whether materialized trees include marker files.
    pub show_markers: bool,
    /// Deepest folder level a recursive traversal descends to, counted from its start.
    pub max_depth: usize,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            marker_name: MARKER_NAME.to_owned(),
            marker_content_type: MARKER_CONTENT_TYPE.to_owned(),
            show_markers: false,
            max_depth: 64,
        }
    }
}

impl DriveConfig {
    pub(crate) fn validate(&self) -> Result<(), DriveError> {
        if self.page_size == 0 {
            return Err(DriveError::InvalidConfig {
                message: "page_size".into(),
                context: Some("Page size must be positive".into()),
            });
        }

        let marker = self.marker_name.as_str();
        if marker.is_empty() || marker.contains('/') || marker == "." || marker == ".." || !is_sanitized(marker)
        {
            return Err(DriveError::InvalidConfig {
                message: self.marker_name.clone().into(),
                context: Some("Marker name must be a single sanitized path component".into()),
            });
        }

        if self.max_depth == 0 {
            return Err(DriveError::InvalidConfig {
                message: "max_depth".into(),
                context: Some("Depth limit must be at least 1".into()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DriveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.marker_name, ".keep");
        assert!(!config.show_markers);
    }

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: DriveConfig = serde_json::from_str(r#"{"show_markers":true}"#).unwrap();
        assert!(config.show_markers);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn rejects_unusable_values() {
        let zero_page = DriveConfig { page_size: 0, ..DriveConfig::default() };
        assert_eq!(zero_page.validate().unwrap_err().kind(), "InvalidConfig");

        for marker in ["", "a/b", "..", "ma rker"] {
            let config = DriveConfig { marker_name: marker.to_owned(), ..DriveConfig::default() };
            assert!(config.validate().is_err(), "{marker:?}");
        }

        let flat = DriveConfig { max_depth: 0, ..DriveConfig::default() };
        assert!(flat.validate().is_err());
    }
}
