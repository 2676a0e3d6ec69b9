//! Route parameters bound during matching.

use serde::ser::{Serialize, Serializer};

/// Ordered `(name, value)` pairs bound from `:name` segments.
///
/// Values are already percent-decoded. Parameters accumulate from the
/// outermost matched route to the innermost one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Drop bindings made after `len` (backtracking).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_truncate() {
        let mut params = Params::new();
        params.push("username", "alice");
        params.push("slug", "my-resume");

        assert_eq!(params.get("username"), Some("alice"));
        assert_eq!(params.get("slug"), Some("my-resume"));
        assert_eq!(params.get("id"), None);

        params.truncate(1);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("slug"), None);
    }

    #[test]
    fn test_serializes_as_map() {
        let params: Params = [("id", "abc123")].into_iter().collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "abc123" }));
    }
}
