//! App Settings Entity
//!
//! Key/value configuration of a web app slot. Keys are kept sorted so the
//! pushed `--settings` list is deterministic.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    entries: BTreeMap<String, String>,
}

impl AppSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
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

    /// Every existing key survives; every key in `overrides` takes the new value.
    pub fn merged_with(&self, overrides: &AppSettings) -> AppSettings {
        let mut merged = self.clone();
        for (key, value) in &overrides.entries {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for AppSettings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = AppSettings::new();
        for (k, v) in iter {
            settings.insert(k, v);
        }
        settings
    }
}
