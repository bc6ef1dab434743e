//! Case-insensitive cookie attribute storage.
//!
//! `Set-Cookie` attribute names are case-insensitive (`Domain`, `domain` and
//! `DOMAIN` are the same attribute). Names are folded to ASCII lower-case on
//! both insertion and lookup, and entries keep their insertion order so the
//! attributes serialize deterministically.

use serde::{Deserialize, Serialize};

/// Ordered attribute map with case-insensitive names.
///
/// At most one value is kept per name; a later insert replaces the value in
/// place without moving the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct CookieAttributes {
    entries: Vec<(String, String)>,
}

impl CookieAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, returning the previous value if one existed.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let name = name.as_ref().to_ascii_lowercase();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    /// Presence check, for flag attributes such as `secure` and `httponly`.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order. Names are lower-case.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CookieAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        attributes.extend(iter);
        attributes
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for CookieAttributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

// Deserialized pairs go through `insert` so names fold and repeats collapse.
impl From<Vec<(String, String)>> for CookieAttributes {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<CookieAttributes> for Vec<(String, String)> {
    fn from(attributes: CookieAttributes) -> Self {
        attributes.entries
    }
}
