//! Node contract and the tagged union stored in the trie.

use std::fmt;
use std::sync::Arc;

use crate::children::Children;
use crate::container::Container;
use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::executor::{Executor, MiddlewareExecutor};
use crate::handler::Handler;
use crate::middleware::Middleware;

use super::full_match::FullMatchNode;
use super::regexp::RegexpNode;

/// Path separator. Segments never contain it.
pub const SEPARATOR: char = '/';

/// Canonical expression for "match the whole segment".
pub const FULL_MATCH_TARGET: &str = ".*";

/// Whether `exp` accepts any segment in full, including the empty one.
///
/// Such expressions are served by [`FullMatchNode`] instead of a compiled regex.
#[must_use]
pub fn is_full_match(exp: &str) -> bool {
    matches!(exp, FULL_MATCH_TARGET | "[^/]*")
}

/// Category of matching rule a node implements.
///
/// The trie keeps literal (`String`) and multi-segment (`Path`) nodes
/// alongside regexp nodes; this crate only produces `Regexp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    String,
    Regexp,
    Path,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteKind::String => "String",
            RouteKind::Regexp => "Regexp",
            RouteKind::Path => "Path",
        };
        f.write_str(name)
    }
}

/// Where a named value sits in an expression's submatches.
///
/// `position` is 1-based: slot 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureIndex {
    pub key: String,
    pub position: usize,
}

impl CaptureIndex {
    pub fn new(key: impl Into<String>, position: usize) -> Self {
        Self {
            key: key.into(),
            position,
        }
    }
}

/// Capabilities shared by every node shape.
pub trait Router {
    fn kind(&self) -> RouteKind;

    /// Canonical form of the matching rule, used for printing and de-duplication.
    fn target(&self) -> &str;

    /// Match `path` (starting right after the parent's separator) and
    /// resolve the unit of work. Captures land in `c` only on success.
    fn match_path(
        &self,
        ctx: &RequestContext,
        c: &mut dyn Container,
        path: &str,
    ) -> Result<MiddlewareExecutor>;
}

/// A regexp-kind node of the trie.
pub enum Node {
    Regexp(RegexpNode),
    FullMatch(FullMatchNode),
}

impl Node {
    /// Build the node serving `exp` with positional capture keys.
    ///
    /// A full-match expression ([`FULL_MATCH_TARGET`] or `[^/]*`, see
    /// [`is_full_match`]) with a single key becomes a [`FullMatchNode`];
    /// everything else compiles into a [`RegexpNode`] whose `keys[i]` reads
    /// submatch `i + 1`.
    pub fn for_pattern(exp: &str, keys: &[&str]) -> Result<Self> {
        match keys {
            [key] if is_full_match(exp) => Ok(Node::FullMatch(FullMatchNode::new(*key)?)),
            _ => Ok(Node::Regexp(RegexpNode::with_keys(exp, keys)?)),
        }
    }

    /// Name of the concrete shape, for diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Node::Regexp(_) => "regexp",
            Node::FullMatch(_) => "full-match regexp",
        }
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        match self {
            Node::Regexp(n) => n.handler(),
            Node::FullMatch(n) => n.handler(),
        }
    }

    pub fn handler_mut(&mut self) -> &mut Handler {
        match self {
            Node::Regexp(n) => n.handler_mut(),
            Node::FullMatch(n) => n.handler_mut(),
        }
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        match self {
            Node::Regexp(n) => n.children(),
            Node::FullMatch(n) => n.children(),
        }
    }

    pub fn children_mut(&mut self) -> &mut Children {
        match self {
            Node::Regexp(n) => n.children_mut(),
            Node::FullMatch(n) => n.children_mut(),
        }
    }

    /// Append `child` without merging it into existing siblings.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children_mut().push(child);
        self
    }

    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.handler_mut().add_executor(executor);
        self
    }

    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.handler_mut().add_middleware(middleware);
        self
    }

    /// Whether `other` has the same shape and matching rule as `self`.
    #[must_use]
    pub fn same_rule(&self, other: &Node) -> bool {
        self.shape() == other.shape() && self.target() == other.target()
    }

    /// Absorb `other` into `self`.
    ///
    /// The handler merge runs first, then the children merge; the first
    /// failure is returned as is. A failing children merge leaves the
    /// handler merge (and any children already merged) applied. Use
    /// [`Node::check_merge`] beforehand when that matters.
    pub fn merge(&mut self, other: Node) -> Result<()> {
        let kind = self.kind();
        let expected = self.shape();
        match (self, other) {
            (Node::Regexp(node), Node::Regexp(other)) => node.merge(other),
            (Node::FullMatch(node), Node::FullMatch(other)) => node.merge(other),
            (_, other) => Err(RouterError::KindMismatch {
                kind,
                expected,
                found: other.shape(),
            }),
        }
    }

    /// Validate that [`Node::merge`] would succeed for the whole subtree,
    /// without mutating anything.
    pub fn check_merge(&self, other: &Node) -> Result<()> {
        match (self, other) {
            (Node::Regexp(node), Node::Regexp(other)) => node.check_merge(other),
            (Node::FullMatch(node), Node::FullMatch(other)) => node.check_merge(other),
            _ => Err(RouterError::KindMismatch {
                kind: self.kind(),
                expected: self.shape(),
                found: other.shape(),
            }),
        }
    }
}

impl Router for Node {
    fn kind(&self) -> RouteKind {
        match self {
            Node::Regexp(n) => n.kind(),
            Node::FullMatch(n) => n.kind(),
        }
    }

    fn target(&self) -> &str {
        match self {
            Node::Regexp(n) => n.target(),
            Node::FullMatch(n) => n.target(),
        }
    }

    fn match_path(
        &self,
        ctx: &RequestContext,
        c: &mut dyn Container,
        path: &str,
    ) -> Result<MiddlewareExecutor> {
        match self {
            Node::Regexp(n) => n.match_path(ctx, c, path),
            Node::FullMatch(n) => n.match_path(ctx, c, path),
        }
    }
}

impl From<RegexpNode> for Node {
    fn from(node: RegexpNode) -> Self {
        Node::Regexp(node)
    }
}

impl From<FullMatchNode> for Node {
    fn from(node: FullMatchNode) -> Self {
        Node::FullMatch(node)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("shape", &self.shape())
            .field("target", &self.target())
            .field("children", &self.children().len())
            .finish()
    }
}
