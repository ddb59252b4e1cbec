use std::borrow::Cow;
use std::fmt::Display;
use strata_object_store::StoreError;
use tracing::error;

/// Domain errors of the drive.
///
/// Every variant that wraps a [`StoreError`] names the key the failing store call was made on,
/// so a caller can tell exactly where a multi-object operation stopped.
#[strata_derive::strata_error]
pub enum DriveError {
    #[error("Failed to create directory {path}{}: {source}", format_context(.context))]
    DirectoryCreate { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to upload {path}{}: {source}", format_context(.context))]
    Upload { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to list {path}{}: {source}", format_context(.context))]
    List { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Tree traversal failed at {path}{}: {source}", format_context(.context))]
    TreeTraversal { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to rename {path}{}: {source}", format_context(.context))]
    Rename { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to move {path}{}: {source}", format_context(.context))]
    Move { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    /// The source of a copy could not be downloaded.
    #[error("Failed to read copy source {path}{}: {source}", format_context(.context))]
    CopyRead { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    /// The destination of a copy could not be written.
    #[error("Failed to write copy destination {path}{}: {source}", format_context(.context))]
    CopyWrite { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to delete {path}{}: {source}", format_context(.context))]
    Delete { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Failed to download {path}{}: {source}", format_context(.context))]
    Download { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Invalid tenant{}: {message}", format_context(.context))]
    InvalidTenant { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid path{}: {message}", format_context(.context))]
    InvalidPath { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Cannot move a directory into itself{}: {message}", format_context(.context))]
    RenameIntoSelf { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Directory nesting exceeds the depth limit{}: {message}", format_context(.context))]
    DepthExceeded { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid drive configuration{}: {message}", format_context(.context))]
    InvalidConfig { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

macro_rules! store_failures {
    ($($ctor:ident => $variant:ident),* $(,)?) => {
        impl DriveError {
            $(
                pub(crate) fn $ctor(path: impl Display) -> impl FnOnce(StoreError) -> Self {
                    let path: Cow<'static, str> = path.to_string().into();
                    move |source| Self::$variant { path, source, context: None }
                }
            )*
        }
    };
}

store_failures! {
    directory_create => DirectoryCreate,
    upload => Upload,
    list => List,
    tree_traversal => TreeTraversal,
    rename => Rename,
    move_failed => Move,
    copy_read => CopyRead,
    copy_write => CopyWrite,
    delete => Delete,
    download => Download,
}

impl DriveError {
    /// The object key or prefix a store failure occurred on.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::DirectoryCreate { path, .. }
            | Self::Upload { path, .. }
            | Self::List { path, .. }
            | Self::TreeTraversal { path, .. }
            | Self::Rename { path, .. }
            | Self::Move { path, .. }
            | Self::CopyRead { path, .. }
            | Self::CopyWrite { path, .. }
            | Self::Delete { path, .. }
            | Self::Download { path, .. } => Some(path.as_ref()),
            _ => None,
        }
    }

    /// The underlying store failure, if this error wraps one.
    #[must_use]
    pub const fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::DirectoryCreate { source, .. }
            | Self::Upload { source, .. }
            | Self::List { source, .. }
            | Self::TreeTraversal { source, .. }
            | Self::Rename { source, .. }
            | Self::Move { source, .. }
            | Self::CopyRead { source, .. }
            | Self::CopyWrite { source, .. }
            | Self::Delete { source, .. }
            | Self::Download { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Converts store failures into [`DriveError`]s at the call site, logging each one.
pub(crate) trait StoreResultExt<T> {
    fn raise(
        self,
        op: &'static str,
        wrap: impl FnOnce(StoreError) -> DriveError,
    ) -> Result<T, DriveError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn raise(
        self,
        op: &'static str,
        wrap: impl FnOnce(StoreError) -> DriveError,
    ) -> Result<T, DriveError> {
        self.map_err(|source| {
            let err = wrap(source);
            error!(op, kind = err.kind(), path = err.path().unwrap_or_default(), error = %err, "Object store call failed");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_keep_path_and_message() {
        let source = StoreError::NotFound { message: "alice/a/f.txt".into(), context: None };
        let err = DriveError::rename("alice/a/f.txt")(source);

        assert_eq!(err.kind(), "Rename");
        assert_eq!(err.path(), Some("alice/a/f.txt"));
        assert!(err.store_error().is_some_and(StoreError::is_not_found));
        assert!(err.to_string().starts_with("Failed to rename alice/a/f.txt"));
    }

    #[test]
    fn copy_phases_are_distinguishable() {
        let read = DriveError::copy_read("a")(StoreError::from("gone"));
        let write = DriveError::copy_write("b")(StoreError::from("quota"));

        assert!(matches!(read, DriveError::CopyRead { .. }));
        assert!(matches!(write, DriveError::CopyWrite { .. }));
        assert_ne!(read.kind(), write.kind());
    }

    #[test]
    fn raise_wraps_only_failures() {
        let ok: Result<u8, StoreError> = Ok(7);
        assert_eq!(ok.raise("test", DriveError::list("x")).unwrap(), 7);

        let failed: Result<u8, StoreError> = Err(StoreError::from("down"));
        let err = failed.raise("test", DriveError::list("alice/x")).unwrap_err();
        assert_eq!(err.kind(), "List");
        assert_eq!(err.path(), Some("alice/x"));
    }
}
