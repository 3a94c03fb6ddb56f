//! Namespacing of user identifiers.
//!
//! The face API keeps every tenant's users in one shared identifier space.
//! A deployment claims its own slice of that space by suffixing each user id
//! with a fixed namespace: `"<uid>@<namespace>"`.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Separator between a user id and its namespace.
pub const NAMESPACE_SEPARATOR: char = '@';

/// Returned when a namespace cannot be used to qualify user ids.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid namespace {0:?}: must be non-empty and must not contain '@'")]
pub struct InvalidNamespace(pub String);

/// Returned when a namespaced identifier lacks the separator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("namespaced identifier {0:?} does not contain '@'")]
pub struct MalformedNamespacedId(pub String);

/// A deployment namespace appended to every user id sent to the face API.
///
/// ## Constraints
///
/// - Must not be empty
/// - Must not contain [`NAMESPACE_SEPARATOR`]
///
/// ## Examples
///
/// ```
/// use biometric_login_core::{Namespace, UserId};
///
/// let ns = Namespace::new("my-namespace").unwrap();
/// assert_eq!(ns.qualify(&UserId::new("test")).as_str(), "test@my-namespace");
///
/// assert!(Namespace::new("").is_err());
/// assert!(Namespace::new("bad@ns").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNamespace`] if the value is empty or contains the
    /// separator.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidNamespace> {
        let value = value.into();
        if value.is_empty() || value.contains(NAMESPACE_SEPARATOR) {
            return Err(InvalidNamespace(value));
        }
        Ok(Self(value))
    }

    /// Get the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualify a user id with this namespace.
    ///
    /// Never fails. User ids are not checked for the separator; callers own
    /// that invariant.
    #[must_use]
    pub fn qualify(&self, uid: &UserId) -> NamespacedId {
        NamespacedId(format!("{uid}{NAMESPACE_SEPARATOR}{}", self.0))
    }

    /// Comma-joined namespaced ids, in input order.
    ///
    /// This is the list format the face API expects for multi-user queries.
    /// An empty slice yields an empty string.
    #[must_use]
    pub fn qualify_list(&self, uids: &[UserId]) -> String {
        uids.iter()
            .map(|uid| self.qualify(uid).0)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// A user id as known to the face API: `"<uid>@<namespace>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespacedId(String);

impl NamespacedId {
    /// Wrap a raw namespaced string as returned by the face API.
    ///
    /// No validation happens here; [`NamespacedId::user_id`] reports a
    /// missing separator.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw namespaced string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strip the namespace, keeping everything before the first separator.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedNamespacedId`] if the separator is absent.
    pub fn user_id(&self) -> Result<UserId, MalformedNamespacedId> {
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .map(|(uid, _)| UserId::new(uid))
            .ok_or_else(|| MalformedNamespacedId(self.0.clone()))
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NamespacedId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NamespacedId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(value: &str) -> Namespace {
        Namespace::new(value).expect("valid namespace")
    }

    #[test]
    fn test_qualify_appends_separator_and_namespace() {
        let id = ns("my-namespace").qualify(&UserId::new("test"));
        assert_eq!(id.as_str(), "test@my-namespace");
    }

    #[test]
    fn test_qualify_then_strip_round_trips() {
        let namespace = ns("tenant-a");
        for raw in ["test", "rafa", "", "user.name+tag", "ção"] {
            let uid = UserId::new(raw);
            let qualified = namespace.qualify(&uid);

            assert_eq!(qualified.as_str().matches(NAMESPACE_SEPARATOR).count(), 1);
            assert!(qualified.as_str().starts_with(&format!("{raw}@")));
            assert_eq!(qualified.user_id().expect("has separator"), uid);
        }
    }

    #[test]
    fn test_user_id_splits_on_first_separator() {
        let id = NamespacedId::new("a@b@c");
        assert_eq!(id.user_id().expect("has separator").as_str(), "a");
    }

    #[test]
    fn test_user_id_without_separator_is_malformed() {
        let err = NamespacedId::new("testmy-namespace")
            .user_id()
            .expect_err("no separator");
        assert_eq!(err, MalformedNamespacedId("testmy-namespace".to_owned()));
    }

    #[test]
    fn test_qualify_list_preserves_order() {
        let uids = [UserId::new("a"), UserId::new("b"), UserId::new("c")];
        assert_eq!(ns("ns").qualify_list(&uids), "a@ns,b@ns,c@ns");
    }

    #[test]
    fn test_qualify_list_empty() {
        assert_eq!(ns("ns").qualify_list(&[]), "");
    }

    #[test]
    fn test_namespace_rejects_empty_and_separator() {
        assert_eq!(Namespace::new(""), Err(InvalidNamespace(String::new())));
        assert_eq!(
            Namespace::new("my@ns"),
            Err(InvalidNamespace("my@ns".to_owned()))
        );
    }

    #[test]
    fn test_namespace_deserialize_validates() {
        let ok: Namespace = serde_json::from_str("\"docs\"").expect("valid");
        assert_eq!(ok.as_str(), "docs");

        let bad = serde_json::from_str::<Namespace>("\"do@cs\"");
        assert!(bad.is_err());
    }
}
