//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for strata hosts. Library crates only emit
//! events; this crate decides where they go: a compact console layer, rolling files written
//! through a non-blocking worker (optionally as JSON), and an `EnvFilter` built from a default
//! level, explicit directives or `RUST_LOG`.
//!
//! Hosts either drive [`LoggerBuilder`] directly or hand over a deserialized
//! [`LogSettings`] section through [`Logger::from_settings`].
//!
//! ## Example
//!
//! ```rust
//! # use strata_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("strata")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("strata_drive=trace")
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod settings;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::settings::{FileSettings, LogRotation, LogSettings};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// A handle to the installed logging system.
///
/// Holds the background worker guard of file output; drop it only at shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    pub(crate) guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    ///
    /// The name identifies the host and prefixes rolling log files
    /// (e.g. `strata.2026-10-19.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Installs the subscriber described by `settings`.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level, plus everything
    /// [`LoggerBuilder::init`] can return.
    pub fn from_settings(name: impl Into<String>, settings: &LogSettings) -> Result<Self, LoggerError> {
        let mut builder =
            Self::builder().name(name).level(settings.level_filter()?).console(settings.console);
        if let Some(directives) = &settings.directives {
            builder = builder.env_filter(directives.clone());
        }

        match &settings.file {
            Some(file) => builder
                .path(file.path.clone())
                .rotation(file.rotation)
                .max_files(file.max_files)
                .json(file.json)
                .init(),
            None => builder.init(),
        }
    }

    /// Returns the worker guard of file output, if any.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
