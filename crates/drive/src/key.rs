use crate::error::DriveError;
use crate::sanitize::sanitize;
use serde::Serialize;
use std::fmt;

/// Identifier of the owner of a key namespace; always the first component of an [`ObjectKey`].
///
/// The id is sanitized on construction and must remain a single, non-relative component,
/// otherwise two tenants could address each other's keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TryFrom<&str> for TenantId {
    type Error = DriveError;

    fn try_from(value: &str) -> Result<Self, DriveError> {
        let id = sanitize(value);

        if id.is_empty() {
            return Err(DriveError::InvalidTenant {
                message: "EMPTY".into(),
                context: Some("Tenant id cannot be empty".into()),
            });
        }

        if id.contains('/') || id == "." || id == ".." {
            return Err(DriveError::InvalidTenant {
                message: id.into(),
                context: Some("Tenant id must be a single path component".into()),
            });
        }

        Ok(Self(id))
    }
}

impl TryFrom<String> for TenantId {
    type Error = DriveError;

    fn try_from(value: String) -> Result<Self, DriveError> {
        Self::try_from(value.as_str())
    }
}

impl TenantId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully-qualified, slash-delimited object key: `tenant/segment/.../name`.
///
/// Never empty, never starts or ends with `/` and never contains `//`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Appends an entry name exactly as a listing reported it.
    ///
    /// Listed names are already store keys, so they are not sanitized again.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}/{}", self.0, name.trim_matches('/')))
    }

    /// The last component.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// The key as a folder locator, with the trailing slash.
    #[must_use]
    pub fn folder_path(&self) -> String {
        format!("{}/", self.0)
    }

    /// Whether `self` equals `other` or lies below it.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        self.0 == other.0
            || self.0.strip_prefix(other.0.as_str()).is_some_and(|rest| rest.starts_with('/'))
    }

    /// Number of components below the tenant root.
    pub(crate) fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// Re-roots a key found below `from` onto `to`.
    pub(crate) fn rebase(&self, from: &Self, to: &Self) -> Option<Self> {
        if self == from {
            return Some(to.clone());
        }
        let rest = self.0.strip_prefix(from.0.as_str())?.strip_prefix('/')?;
        Some(Self(format!("{}/{rest}", to.0)))
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composes a tenant-scoped key from user-supplied segments.
///
/// Each segment is sanitized on its own and may itself contain `/`, which makes it
/// several components. Empty and `.` components are dropped, so an empty directory
/// addresses the tenant root.
///
/// # Errors
///
/// Returns [`DriveError::InvalidPath`] if any component is `..`.
///
/// ```rust
/// use strata_drive::{TenantId, build_key};
///
/// let tenant = TenantId::try_from("alice")?;
/// let key = build_key(&tenant, ["Café/Photos", "", "été 2024.jpg"])?;
/// assert_eq!(key.as_str(), "alice/Cafe/Photos/ete-2024.jpg");
/// # Ok::<(), strata_drive::DriveError>(())
/// ```
pub fn build_key<'a>(
    tenant: &TenantId,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<ObjectKey, DriveError> {
    let mut key = tenant.0.clone();

    for raw in segments {
        let segment = sanitize(raw);
        for component in segment.split('/') {
            match component {
                "" | "." => {},
                ".." => {
                    return Err(DriveError::InvalidPath {
                        message: raw.to_owned().into(),
                        context: Some("Parent directory components are not allowed".into()),
                    });
                },
                component => {
                    key.push('/');
                    key.push_str(component);
                },
            }
        }
    }

    Ok(ObjectKey(key))
}

/// The key of `name` inside `dir`, where `name` must contribute at least one component.
pub(crate) fn file_key(tenant: &TenantId, dir: &str, name: &str) -> Result<ObjectKey, DriveError> {
    let parent = build_key(tenant, [dir])?;
    let key = build_key(tenant, [dir, name])?;
    if key == parent {
        return Err(DriveError::InvalidPath {
            message: name.to_owned().into(),
            context: Some("File name is empty after sanitization".into()),
        });
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> TenantId {
        TenantId::try_from("alice").unwrap()
    }

    #[test]
    fn tenant_is_sanitized() {
        let tenant = TenantId::try_from("Zoë Müller").unwrap();
        assert_eq!(tenant.as_str(), "Zoe-Muller");
    }

    #[test]
    fn tenant_rejects_multi_component_ids() {
        for raw in ["", "a/b", ".", "..", "/"] {
            let err = TenantId::try_from(raw).unwrap_err();
            assert_eq!(err.kind(), "InvalidTenant", "{raw:?}");
        }
    }

    #[test]
    fn segments_are_sanitized_independently() {
        let key = build_key(&alice(), ["docs", "déjà vu.txt"]).unwrap();
        assert_eq!(key.as_str(), "alice/docs/deja-vu.txt");
    }

    #[test]
    fn slashes_inside_a_segment_become_components() {
        let key = build_key(&alice(), ["a/b/", "/c.txt"]).unwrap();
        assert_eq!(key.as_str(), "alice/a/b/c.txt");
        assert_eq!(key.name(), "c.txt");
        assert_eq!(key.depth(), 3);
    }

    #[test]
    fn empty_and_current_components_are_dropped() {
        assert_eq!(build_key(&alice(), [""]).unwrap().as_str(), "alice");
        assert_eq!(build_key(&alice(), ["./a/./b"]).unwrap().as_str(), "alice/a/b");
    }

    #[test]
    fn parent_components_are_rejected() {
        let err = build_key(&alice(), ["a/../../bob"]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPath");
    }

    #[test]
    fn file_key_requires_a_name() {
        assert!(file_key(&alice(), "a", "f.txt").is_ok());
        let err = file_key(&alice(), "a", "///").unwrap_err();
        assert_eq!(err.kind(), "InvalidPath");
    }

    #[test]
    fn containment_respects_component_boundaries() {
        let a = build_key(&alice(), ["a"]).unwrap();
        let nested = build_key(&alice(), ["a/b"]).unwrap();
        let sibling = build_key(&alice(), ["ab"]).unwrap();

        assert!(nested.is_within(&a));
        assert!(a.is_within(&a));
        assert!(!sibling.is_within(&a));
        assert!(!a.is_within(&nested));
    }

    #[test]
    fn rebase_keeps_the_relative_part() {
        let from = build_key(&alice(), ["a"]).unwrap();
        let to = build_key(&alice(), ["z/y"]).unwrap();
        let file = build_key(&alice(), ["a/deep/f.txt"]).unwrap();

        assert_eq!(file.rebase(&from, &to).unwrap().as_str(), "alice/z/y/deep/f.txt");
        assert!(to.rebase(&from, &to).is_none());
    }

    #[test]
    fn child_and_folder_path() {
        let dir = build_key(&alice(), ["a"]).unwrap();
        assert_eq!(dir.child("x.txt").as_str(), "alice/a/x.txt");
        assert_eq!(dir.folder_path(), "alice/a/");
    }
}
