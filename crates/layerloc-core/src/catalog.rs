use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from generated key to source text.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringCatalog {
    entries: IndexMap<String, String>,
}

impl StringCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keep only the earliest key for each distinct value.
    pub fn dedup_by_value(&self) -> StringCatalog {
        let mut seen: HashSet<&str> = HashSet::new();
        self.iter()
            .filter(|&(_, v)| seen.insert(v))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for StringCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StringCatalog {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One source string with an optional translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TranslationUnit {
    pub fn new(source: impl Into<String>, target: Option<&str>) -> Self {
        Self {
            source: source.into(),
            target: target.map(str::to_string),
        }
    }

    /// Target text, if present and non-empty.
    pub fn translated(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }
}

/// Ordered mapping from key to its units; several units under one key are
/// plural variants of the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationSet {
    groups: IndexMap<String, Vec<TranslationUnit>>,
}

impl TranslationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit to the group for `key`, creating the group on first use.
    pub fn push(&mut self, key: impl Into<String>, unit: TranslationUnit) {
        self.groups.entry(key.into()).or_default().push(unit);
    }

    pub fn group(&self, key: &str) -> Option<&[TranslationUnit]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TranslationUnit])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Every unit across every key and variant, in set order.
    pub fn units(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.groups.values().flatten()
    }
}
