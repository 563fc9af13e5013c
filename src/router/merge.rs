//! Merge steps shared by every node shape once the shape-specific
//! precondition (same expression, same key) has been checked.
//!
//! The dry run replays the merge on a [`MergePlan`]: executor names and
//! child rules only. Incoming siblings that land on the same node are
//! checked against everything merged before them, so a plan that
//! succeeds guarantees the real merge succeeds too.

use crate::children::Children;
use crate::error::{Result, RouterError};
use crate::handler::Handler;

use super::core::{Node, Router};

/// Handler first, then children. Stops at the first error and keeps
/// whatever was applied before it.
pub(super) fn merge_components(
    handler: &mut Handler,
    children: &mut Children,
    other_handler: Handler,
    other_children: Children,
) -> Result<()> {
    handler.merge(other_handler)?;
    children.merge(other_children)?;
    Ok(())
}

/// Dry run of [`merge_components`].
pub(super) fn check_components(
    handler: &Handler,
    children: &Children,
    other_handler: &Handler,
    other_children: &Children,
) -> Result<()> {
    MergePlan::of_components(handler, children).absorb_components(other_handler, other_children)
}

/// Shape of a subtree as far as merging is concerned.
pub(crate) struct MergePlan<'a> {
    shape: &'static str,
    target: &'a str,
    executors: Vec<&'a str>,
    children: Vec<MergePlan<'a>>,
}

impl<'a> MergePlan<'a> {
    /// Plan for a bare children collection, such as the root of a tree.
    pub(crate) fn of_children(children: &'a Children) -> Self {
        Self {
            shape: "",
            target: "",
            executors: Vec::new(),
            children: children.iter().map(MergePlan::of_node).collect(),
        }
    }

    fn of_components(handler: &'a Handler, children: &'a Children) -> Self {
        Self {
            executors: handler.executor_names().collect(),
            ..Self::of_children(children)
        }
    }

    fn of_node(node: &'a Node) -> Self {
        Self {
            shape: node.shape(),
            target: node.target(),
            ..Self::of_components(node.handler(), node.children())
        }
    }

    fn absorb_components(&mut self, handler: &'a Handler, children: &'a Children) -> Result<()> {
        for name in handler.executor_names() {
            if self.executors.contains(&name) {
                return Err(RouterError::DuplicateExecutor {
                    name: name.to_string(),
                });
            }
            self.executors.push(name);
        }
        self.absorb_children(children)
    }

    /// Replay [`Children::merge`] of `children` into this plan.
    pub(crate) fn absorb_children(&mut self, children: &'a Children) -> Result<()> {
        for node in children.iter() {
            let existing = self
                .children
                .iter_mut()
                .find(|plan| plan.shape == node.shape() && plan.target == node.target());
            match existing {
                Some(plan) => plan.absorb_components(node.handler(), node.children())?,
                None => self.children.push(MergePlan::of_node(node)),
            }
        }
        Ok(())
    }
}
