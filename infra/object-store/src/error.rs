use std::borrow::Cow;

/// Failure reported by an object store primitive.
///
/// The `message` always carries the store's own wording so callers can surface it verbatim.
#[strata_derive::strata_error]
pub enum StoreError {
    #[error("Object not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Object already exists{}: {message}", format_context(.context))]
    AlreadyExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Permission denied, quota exceeded or a key the store refuses to address.
    #[error("Request rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Transport-level failure; the request may or may not have been applied. Only network
    /// backends report it, never the in-memory store.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl StoreError {
    /// The store-level message without context decoration.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::AlreadyExists { message, .. }
            | Self::Rejected { message, .. }
            | Self::Unavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_survives_context() {
        let err: Result<(), StoreError> =
            Err(StoreError::NotFound { message: "user-files/a.txt".into(), context: None });
        let err = err.context("download").unwrap_err();

        assert_eq!(err.message(), "user-files/a.txt");
        assert_eq!(err.to_string(), "Object not found (download): user-files/a.txt");
        assert_eq!(err.kind(), "NotFound");
        assert!(err.is_not_found());
    }

    #[test]
    fn internal_from_str() {
        let err = StoreError::from("lock poisoned");
        assert_eq!(err.kind(), "Internal");
        assert!(!err.is_already_exists());
    }
}
