//! Form parameters for a single API call.

use std::collections::BTreeMap;

/// String parameters sent as form fields.
///
/// Keys are unique; inserting the same key twice keeps the last value,
/// which is how the credential pair overrides caller-supplied fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams(BTreeMap<String, String>);

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always send `key`, even when `value` is empty.
    pub fn required(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    /// Send `key` only when a non-empty value is given.
    pub fn optional(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Attach `api_key` and `api_secret`, replacing any same-named field.
    pub fn with_credentials(self, api_key: &str, api_secret: &str) -> Self {
        self.required("api_key", api_key)
            .required("api_secret", api_secret)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for FormParams {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
