//! Request context threaded through matching.
//!
//! The matching algorithm never reads the context. It exists so executors
//! can decide whether they apply to the current request (see
//! [`Executor::inspect`](crate::executor::Executor::inspect)) and so a
//! resolved unit of work has somewhere to leave its results.

use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of context attributes before heap allocation.
pub const MAX_INLINE_ATTRS: usize = 8;

/// Stack-allocated attribute storage.
pub type AttrVec = SmallVec<[(Arc<str>, String); MAX_INLINE_ATTRS]>;

/// Free-form, string-keyed request attributes.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    attrs: AttrVec,
}

impl RequestContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RequestContext::set`].
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite an attribute.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k.as_ref() == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((Arc::from(key), value)),
        }
    }

    /// Look an attribute up by key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::RequestContext;

    #[test]
    fn test_set_overwrites() {
        let mut ctx = RequestContext::new().with_attr("method", "GET");
        assert_eq!(ctx.get("method"), Some("GET"));
        ctx.set("method", "POST");
        assert_eq!(ctx.get("method"), Some("POST"));
        assert_eq!(ctx.get("missing"), None);
    }
}
