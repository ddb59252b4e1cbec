use crate::error::LoggerError;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

/// File-friendly description of a logger, as read from a host's configuration.
///
/// ```toml
/// [log]
/// level = "debug"
/// directives = "strata_drive=trace"
///
/// [log.file]
/// path = "logs"
/// rotation = "hourly"
/// json = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Extra `EnvFilter` directives; when set, `RUST_LOG` is ignored.
    pub directives: Option<String>,
    pub console: bool,
    pub file: Option<FileSettings>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), directives: None, console: true, file: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub path: PathBuf,
    pub rotation: LogRotation,
    pub max_files: usize,
    pub json: bool,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("logs"),
            rotation: LogRotation::Daily,
            max_files: crate::builder::DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Self::MINUTELY,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

impl LogSettings {
    pub(crate) fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        LevelFilter::from_str(self.level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Unknown level '{}': {e}", self.level).into(),
            context: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings: LogSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn file_section_is_parsed() {
        let raw = r#"{"level":"debug","file":{"path":"/tmp/x","rotation":"hourly","json":true}}"#;
        let settings: LogSettings = serde_json::from_str(raw).unwrap();

        let file = settings.file.unwrap();
        assert_eq!(file.rotation, LogRotation::Hourly);
        assert!(file.json);
        assert_eq!(file.max_files, crate::builder::DEFAULT_MAX_FILES);
        assert_eq!(Rotation::from(file.rotation), Rotation::HOURLY);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let settings = LogSettings { level: "loud".to_owned(), ..LogSettings::default() };
        assert!(matches!(settings.level_filter(), Err(LoggerError::InvalidConfiguration { .. })));
    }
}
