//! Identity of a remote drive entity.

use std::fmt;
use std::sync::Arc;

use crate::connection::Connection;
use crate::url::encode_path;

/// Identifies a drive entity by id and/or path on a given connection.
///
/// A reference with neither id nor path is the drive root. References never
/// change after construction and never hold fetched state; they are resolved
/// against the connection when an operation is invoked.
#[derive(Clone)]
pub struct ResourceRef {
    id: Option<String>,
    path: Option<String>,
    connection: Arc<Connection>,
}

impl ResourceRef {
    /// The drive's root container
    pub fn root(connection: Arc<Connection>) -> Self {
        Self {
            id: None,
            path: None,
            connection,
        }
    }

    pub fn with_id(connection: Arc<Connection>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            path: None,
            connection,
        }
    }

    /// Path relative to the drive root, e.g. `Documents/report.txt`
    pub fn with_path(connection: Arc<Connection>, path: impl Into<String>) -> Self {
        Self {
            id: None,
            path: Some(path.into()),
            connection,
        }
    }

    pub fn with_id_and_path(
        connection: Arc<Connection>,
        id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            path: Some(path.into()),
            connection,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    /// True when the reference resolves to the drive root (no id, empty or absent path)
    pub fn is_root(&self) -> bool {
        self.id.is_none()
            && self
                .path
                .as_deref()
                .map_or(true, |path| path.trim_matches('/').is_empty())
    }

    /// API path addressing this entity, followed by `suffix`.
    ///
    /// Id addressing wins over path addressing when both are known.
    pub(crate) fn api_path(&self, suffix: &str) -> String {
        match (&self.id, &self.path) {
            (Some(id), _) => format!("/drive/items/{}{}", urlencoding::encode(id), suffix),
            (None, Some(path)) => {
                let encoded = encode_path(path);
                if encoded.is_empty() {
                    format!("/drive/root{}", suffix)
                } else if suffix.is_empty() {
                    format!("/drive/root:/{}", encoded)
                } else {
                    format!("/drive/root:/{}:{}", encoded, suffix)
                }
            }
            (None, None) => format!("/drive/root{}", suffix),
        }
    }

    /// Absolute URL for `api_path(suffix)` on this reference's connection
    pub(crate) fn url(&self, suffix: &str, query: &crate::url::QueryString) -> String {
        crate::url::build_url(&self.connection.base_url(), &self.api_path(suffix), query)
    }
}

impl PartialEq for ResourceRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.path == other.path
            && Arc::ptr_eq(&self.connection, &other.connection)
    }
}

impl fmt::Debug for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRef")
            .field("id", &self.id)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::connection;
    use crate::url::QueryString;

    #[test]
    fn test_root_reference() {
        let reference = ResourceRef::root(connection());

        assert!(reference.is_root());
        assert_eq!(reference.api_path("/children"), "/drive/root/children");
    }

    #[test]
    fn test_id_reference() {
        let reference = ResourceRef::with_id(connection(), "01ABC!123");

        assert!(!reference.is_root());
        assert_eq!(reference.id(), Some("01ABC!123"));
        assert_eq!(reference.api_path(""), "/drive/items/01ABC%21123");
        assert_eq!(
            reference.url("/content", &QueryString::new()),
            "https://graph.microsoft.com/v1.0/me/drive/items/01ABC%21123/content"
        );
    }

    #[test]
    fn test_path_reference() {
        let reference = ResourceRef::with_path(connection(), "Documents/My Notes.txt");

        assert_eq!(reference.api_path(""), "/drive/root:/Documents/My%20Notes.txt");
        assert_eq!(
            reference.api_path("/content"),
            "/drive/root:/Documents/My%20Notes.txt:/content"
        );
    }

    #[test]
    fn test_id_wins_over_path() {
        let reference = ResourceRef::with_id_and_path(connection(), "42", "a/b");

        assert_eq!(reference.api_path(""), "/drive/items/42");
        assert_eq!(reference.path(), Some("a/b"));
    }

    #[test]
    fn test_equality_requires_same_connection() {
        let shared = connection();
        let a = ResourceRef::with_id(Arc::clone(&shared), "1");
        let b = ResourceRef::with_id(Arc::clone(&shared), "1");
        let c = ResourceRef::with_id(connection(), "1");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
