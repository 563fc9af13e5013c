//! # Container Module
//!
//! The capture sink a caller hands to [`Node::match_path`](crate::router::Node::match_path).
//!
//! A container is owned by exactly one in-flight match and never shared
//! between concurrent calls, so implementations need no synchronization.
//! Nodes only ever write into it after everything below them resolved.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of captured values before heap allocation.
/// Most routes capture a handful of values (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated capture storage for the hot path.
///
/// Keys use `Arc<str>` because they come from the static trie; values are
/// per-request data cut from the path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Sink for named values extracted from path segments.
pub trait Container {
    /// Insert or overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str);

    /// Value currently stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Default [`Container`] backed by a [`ParamVec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamContainer {
    params: ParamVec,
}

impl ParamContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate captured `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a `HashMap`.
    /// Note: this allocates, use [`Container::get`] on the hot path.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        self.params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

impl Container for ParamContainer {
    fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k.as_ref() == key) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.params.push((Arc::from(key), value.to_owned())),
        }
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Container for HashMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }

    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}
