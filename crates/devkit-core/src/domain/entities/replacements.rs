use bstr::ByteSlice;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::DomainError;

/// Ordered placeholder → value map used by template rendering.
///
/// Insertion order is preserved and is the order in which substitutions are
/// applied. Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys must be free of braces. An empty key targets the `{}` token.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (key, _) in &self.entries {
            if key.contains(['{', '}']) {
                return Err(DomainError::InvalidPlaceholder {
                    key: key.clone(),
                    reason: "placeholder name contains a brace".into(),
                });
            }
        }
        Ok(())
    }

    /// Replace every `{key}` token in `content`, one key at a time, in order.
    ///
    /// Substitution is literal, global and byte-oriented: bytes outside the
    /// tokens pass through untouched whatever their encoding. Text
    /// introduced by an earlier value is visible to later keys.
    pub fn apply(&self, content: impl AsRef<[u8]>) -> Vec<u8> {
        self.entries
            .iter()
            .fold(content.as_ref().to_vec(), |acc, (key, value)| {
                acc.replace(format!("{{{key}}}"), value)
            })
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (key, value) in iter {
            replacements.insert(key, value);
        }
        replacements
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
