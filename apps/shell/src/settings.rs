use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use strata_drive::DriveConfig;
use strata_logger::LogSettings;
use strata_object_store::MemoryStoreConfig;
use tracing::info;

const ENV_PREFIX: &str = "STRATA";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ShellConfig {
    pub(crate) drive: DriveConfig,
    pub(crate) store: MemoryStoreConfig,
    pub(crate) log: LogSettings,
}

/// Layers an optional configuration file under `STRATA__`-prefixed environment variables,
/// with `__` separating nested keys (`STRATA__DRIVE__PAGE_SIZE` sets `drive.page_size`).
pub(crate) fn load_config(path: Option<&Path>) -> Result<ShellConfig, config::ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<ShellConfig>()?;

    if let Some(path) = path {
        info!(path = %path.display(), "Configuration loaded");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_argument_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.drive, DriveConfig::default());
        assert_eq!(config.store.bucket, "user-files");
    }

    #[test]
    fn file_sections_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        fs::write(
            &path,
            "[drive]\npage_size = 25\nshow_markers = true\n\n[store]\nbucket = \"docs\"\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.drive.page_size, 25);
        assert!(config.drive.show_markers);
        assert_eq!(config.drive.marker_name, ".keep");
        assert_eq!(config.store.bucket, "docs");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
