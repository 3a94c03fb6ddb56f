//! Extra parameters passed through to face API calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value parameters for a face API call.
///
/// Each pipeline stage starts from fixed defaults (detector mode, attribute
/// selection, result limit) and lets the caller override any of them. Keys
/// are kept sorted so requests are reproducible.
///
/// ## Examples
///
/// ```
/// use biometric_login_core::VendorOptions;
///
/// let defaults = VendorOptions::new()
///     .with("detector", "aggressive")
///     .with("attributes", "none");
/// let caller = VendorOptions::new().with("detector", "normal");
///
/// let merged = defaults.merged(&caller);
/// assert_eq!(merged.get("detector"), Some("normal"));
/// assert_eq!(merged.get("attributes"), Some("none"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorOptions(BTreeMap<String, String>);

impl VendorOptions {
    /// Create an empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Combine `self` (the defaults) with `overrides`.
    ///
    /// On a key collision the value from `overrides` wins.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut out = self.0.clone();
        out.extend(overrides.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(out)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VendorOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_caller_wins_on_collision() {
        let defaults = VendorOptions::new()
            .with("detector", "aggressive")
            .with("limit", "1");
        let caller: VendorOptions = [("limit", "3"), ("namespace", "docs")]
            .into_iter()
            .collect();

        let merged = defaults.merged(&caller);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("detector"), Some("aggressive"));
        assert_eq!(merged.get("limit"), Some("3"));
        assert_eq!(merged.get("namespace"), Some("docs"));
    }

    #[test]
    fn test_merged_with_empty_overrides_keeps_defaults() {
        let defaults = VendorOptions::new().with("attributes", "none");
        assert_eq!(defaults.merged(&VendorOptions::new()), defaults);
    }

    #[test]
    fn test_iter_is_sorted_by_key() {
        let opts = VendorOptions::new().with("b", "2").with("a", "1");
        let keys: Vec<_> = opts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
