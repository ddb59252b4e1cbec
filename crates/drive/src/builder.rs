use crate::config::DriveConfig;
use crate::engine::{Drive, DriveInner};
use crate::error::DriveError;
use private::Sealed;
use std::sync::Arc;
use strata_object_store::ObjectStore;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoStore;
#[derive(Debug)]
pub struct WithStore<S>(S);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoStore {}
impl<S> Sealed for WithStore<S> {}

/// Fluent builder for a [`Drive`]; a store must be supplied before [`build`](DriveBuilder::build)
/// becomes available.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct DriveBuilder<S: Sealed = NoStore> {
    state: S,
    config: DriveConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> DriveBuilder<S> {
    /// Replaces the whole configuration, e.g. one deserialized from a config file.
    #[must_use = "Sets the drive configuration"]
    pub fn config(mut self, config: DriveConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "Sets the number of entries requested per list call"]
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    #[must_use = "Sets whether directory markers appear in materialized trees"]
    pub const fn show_markers(mut self, show: bool) -> Self {
        self.config.show_markers = show;
        self
    }

    #[must_use = "Sets the depth limit of recursive traversals"]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> DriveBuilder<N> {
        DriveBuilder { state, config: self.config }
    }
}

impl DriveBuilder<NoStore> {
    #[must_use = "Creates a new drive builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the object store the drive operates on"]
    pub fn store<S: ObjectStore>(self, store: S) -> DriveBuilder<WithStore<S>> {
        self.transition(WithStore(store))
    }
}

impl<S: ObjectStore> DriveBuilder<WithStore<S>> {
    /// Validates the configuration and returns a shareable [`Drive`] handle.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::InvalidConfig`] if the page size or depth limit is zero, or the
    /// marker name is not a single sanitized path component.
    pub fn build(self) -> Result<Drive<S>, DriveError> {
        self.config.validate()?;

        info!(
            page_size = self.config.page_size,
            marker = %self.config.marker_name,
            max_depth = self.config.max_depth,
            "Drive initialized"
        );

        Ok(Drive { inner: Arc::new(DriveInner { store: self.state.0, config: self.config }) })
    }
}
