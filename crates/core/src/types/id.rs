//! String newtype IDs for type-safe references to users and face tags.
//!
//! The face API hands out opaque string identifiers at several stages of a
//! pipeline. Wrapping each kind in its own type keeps a temporary tag id from
//! being saved where a persistent one is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use biometric_login_core::define_string_id;
/// define_string_id!(DeviceId);
/// define_string_id!(SessionToken);
///
/// let device = DeviceId::new("cam-1");
/// assert_eq!(device.as_str(), "cam-1");
///
/// // These are different types, so this won't compile:
/// // let _: SessionToken = device;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A user identifier in the caller's own domain, before namespacing.
    UserId
);
define_string_id!(
    /// Vendor id of a face that was just detected and is not yet saved.
    TemporaryTagId
);
define_string_id!(
    /// Vendor id of a face tag durably associated with a user.
    PersistentTagId
);
