//! Core types for biometric login.
//!
//! This module provides type-safe wrappers for the identifiers and scores
//! exchanged with the face recognition API.

pub mod confidence;
pub mod id;
pub mod namespace;
pub mod options;

pub use confidence::Confidence;
pub use id::*;
pub use namespace::{
    InvalidNamespace, MalformedNamespacedId, NAMESPACE_SEPARATOR, Namespace, NamespacedId,
};
pub use options::VendorOptions;
