//! # Registries
//!
//! Insertion-ordered multimaps used for every canonical map in the
//! workspace. Pushing under an existing key appends; nothing is ever
//! overwritten. Key iteration follows first-insertion order, which is what
//! gives "first hit wins" scans their source-order meaning.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Key for an object method: the owning type plus the method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    /// Registered or declared type name.
    pub type_name: String,
    /// Method name.
    pub method: String,
}

impl MethodKey {
    /// Build a key from its parts.
    pub fn new(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.method)
    }
}

/// Insertion-ordered multimap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry<K, V>
where
    K: Eq + Hash,
{
    order: Vec<K>,
    entries: HashMap<K, Vec<V>>,
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`.
    pub fn push(&mut self, key: K, value: V) {
        match self.entries.get_mut(&key) {
            Some(values) => values.push(value),
            None => {
                self.order.push(key.clone());
                self.entries.insert(key, vec![value]);
            }
        }
    }

    /// All values stored under `key`, in insertion order.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether anything is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no key has been pushed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// `(key, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.order.iter().filter_map(move |k| {
            self.entries.get(k).map(|values| (k, values.as_slice()))
        })
    }
}

impl<V> Registry<String, V> {
    /// Lookup by `&str` without allocating a key.
    pub fn get_str(&self, key: &str) -> Option<&[V]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Membership by `&str`.
    pub fn contains_str(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
