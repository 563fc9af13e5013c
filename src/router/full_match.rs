use std::fmt;

use crate::children::Children;
use crate::container::Container;
use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::executor::MiddlewareExecutor;
use crate::handler::Handler;

use super::core::{RouteKind, Router, FULL_MATCH_TARGET, SEPARATOR};
use super::merge;

/// Shortcut for a regexp node whose expression accepts the whole segment.
///
/// The segment is captured verbatim under `key`; nothing in it is ever
/// interpreted, so `a.b*c` is stored as `a.b*c`.
///
/// When the path starts with a separator (an empty leading segment) the
/// node resolves as the final segment and captures the empty string
/// instead of delegating to its children.
pub struct FullMatchNode {
    handler: Handler,
    children: Children,
    /// Name for the only value.
    key: String,
    target: String,
}

impl FullMatchNode {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(RouterError::InvalidCapture {
                key,
                position: 1,
                groups: 1,
            });
        }
        let target = format!("{{{key}:{FULL_MATCH_TARGET}}}");
        Ok(Self {
            handler: Handler::new(),
            children: Children::new(),
            key,
            target,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut Handler {
        &mut self.handler
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Absorb `other`, which must capture into the same key.
    pub fn merge(&mut self, other: FullMatchNode) -> Result<()> {
        if self.key != other.key {
            return Err(RouterError::KeyMismatch {
                expected: self.key.clone(),
                found: other.key,
            });
        }
        merge::merge_components(
            &mut self.handler,
            &mut self.children,
            other.handler,
            other.children,
        )
    }

    pub fn check_merge(&self, other: &FullMatchNode) -> Result<()> {
        if self.key != other.key {
            return Err(RouterError::KeyMismatch {
                expected: self.key.clone(),
                found: other.key.clone(),
            });
        }
        merge::check_components(&self.handler, &self.children, &other.handler, &other.children)
    }
}

impl Router for FullMatchNode {
    fn kind(&self) -> RouteKind {
        RouteKind::Regexp
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn match_path(
        &self,
        ctx: &RequestContext,
        c: &mut dyn Container,
        path: &str,
    ) -> Result<MiddlewareExecutor> {
        let (executor, value) = match path.find(SEPARATOR) {
            Some(index) if index > 0 => {
                let downstream = self.children.match_path(ctx, c, &path[index..])?;
                (self.handler.pack(downstream)?, &path[..index])
            }
            Some(_) => (self.handler.union_executor(ctx)?, ""),
            None => (self.handler.union_executor(ctx)?, path),
        };
        c.set(&self.key, value);
        Ok(executor)
    }
}

impl fmt::Debug for FullMatchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullMatchNode")
            .field("key", &self.key)
            .field("children", &self.children.len())
            .finish()
    }
}
