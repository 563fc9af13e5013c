//! Ordered child nodes of a trie node.
//!
//! A parent stops at the separator that ends its segment and hands the
//! remainder, separator included, to its [`Children`]. The collaborator
//! consumes that one separator and tries each child in insertion order.

use tracing::debug;

use crate::container::Container;
use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::executor::MiddlewareExecutor;
use crate::router::merge::MergePlan;
use crate::router::{Node, Router, SEPARATOR};

#[derive(Debug, Default)]
pub struct Children {
    nodes: Vec<Node>,
}

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Append `node` as the last candidate, without merging.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Match `path`, which must start with the separator.
    ///
    /// The first child to succeed wins. A child answering `NotFound` hands
    /// over to the next one; any other error is kept and returned when no
    /// later child succeeds.
    pub fn match_path(
        &self,
        ctx: &RequestContext,
        c: &mut dyn Container,
        path: &str,
    ) -> Result<MiddlewareExecutor> {
        let Some(rest) = path.strip_prefix(SEPARATOR) else {
            return Err(RouterError::NotFound);
        };
        let mut failure = RouterError::NotFound;
        for node in &self.nodes {
            match node.match_path(ctx, c, rest) {
                Ok(executor) => return Ok(executor),
                Err(err) if err.is_not_found() => continue,
                Err(err) => {
                    debug!(target_rule = %node.target(), error = %err, "Child node failed");
                    failure = err;
                }
            }
        }
        Err(failure)
    }

    /// Add `node`, merging it into the sibling with the same rule if any.
    pub fn add(&mut self, node: Node) -> Result<()> {
        match self.nodes.iter_mut().find(|n| n.same_rule(&node)) {
            Some(existing) => existing.merge(node),
            None => {
                self.nodes.push(node);
                Ok(())
            }
        }
    }

    /// Absorb every node of `other`. Stops at the first failure; nodes
    /// absorbed before it stay absorbed.
    pub fn merge(&mut self, other: Children) -> Result<()> {
        for node in other.nodes {
            self.add(node)?;
        }
        Ok(())
    }

    /// Dry run of [`Children::merge`] over the whole subtree.
    ///
    /// Incoming nodes are replayed in order, so two of them landing on the
    /// same sibling are checked against each other as well.
    pub fn check_merge(&self, other: &Children) -> Result<()> {
        MergePlan::of_children(self).absorb_children(other)
    }
}
