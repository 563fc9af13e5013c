//! # Tree Module
//!
//! Entry point for serving lookups: a root [`Children`] collection plus the
//! runtime configuration.
//!
//! Build the tree fully, then share it (e.g. behind an `Arc`) with every
//! request thread. [`RouteTree::resolve`] takes `&self` and writes only into
//! a container it creates per call, so concurrent lookups need no locking.
//! Mutating methods take `&mut self`; merging into a tree that is already
//! serving requires an external lock or building a new tree and swapping it.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trierouter::context::RequestContext;
//! use trierouter::executor::FnExecutor;
//! use trierouter::router::Node;
//! use trierouter::tree::RouteTree;
//!
//! let orders = Node::for_pattern("^orders$", &[])
//!     .unwrap()
//!     .with_executor(Arc::new(FnExecutor::new("list_orders", |_| Ok(()))));
//! let user = Node::for_pattern("([0-9]+)", &["id"]).unwrap().with_child(orders);
//!
//! let mut tree = RouteTree::new();
//! tree.add(user).unwrap();
//!
//! let m = tree.resolve(&RequestContext::new(), "/42/orders").unwrap();
//! assert_eq!(m.executor.name(), "list_orders");
//! assert_eq!(m.param("id"), Some("42"));
//! ```

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::children::Children;
use crate::container::{Container, ParamContainer};
use crate::context::RequestContext;
use crate::error::Result;
use crate::executor::MiddlewareExecutor;
use crate::router::{Node, Router};
use crate::runtime_config::RuntimeConfig;

/// Result of resolving a full path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Unit of work to run for the request
    pub executor: MiddlewareExecutor,
    /// Values captured along the path
    pub params: ParamContainer,
}

impl RouteMatch {
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Root of the routing trie.
#[derive(Debug, Default)]
pub struct RouteTree {
    root: Children,
    config: RuntimeConfig,
}

impl RouteTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            root: Children::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> &Children {
        &self.root
    }

    /// Merge `node` into the top level of the tree.
    ///
    /// Checked first, so a conflicting node leaves the tree unchanged.
    pub fn add(&mut self, node: Node) -> Result<()> {
        let mut incoming = Children::new();
        incoming.push(node);
        self.absorb(incoming)
    }

    /// Merge another tree into this one, all or nothing.
    ///
    /// The whole of `other` is validated against `self` before anything is
    /// mutated.
    pub fn merge(&mut self, other: RouteTree) -> Result<()> {
        self.absorb(other.root)
    }

    fn absorb(&mut self, incoming: Children) -> Result<()> {
        if let Err(err) = self.root.check_merge(&incoming) {
            warn!(error = %err, "Rejected conflicting routes");
            return Err(err);
        }
        self.root.merge(incoming)
    }

    /// Match `path` from the root and collect its captures.
    pub fn resolve(&self, ctx: &RequestContext, path: &str) -> Result<RouteMatch> {
        debug!(path = %path, "Route match attempt");
        let match_start = Instant::now();

        let mut params = ParamContainer::new();
        let result = self.root.match_path(ctx, &mut params, path);
        let match_duration = match_start.elapsed();

        match result {
            Ok(executor) => {
                if match_duration > self.config.slow_match_threshold {
                    warn!(
                        path = %path,
                        executor = %executor.name(),
                        params = ?params,
                        duration_us = match_duration.as_micros() as u64,
                        "Slow route matching detected"
                    );
                } else {
                    info!(
                        path = %path,
                        executor = %executor.name(),
                        params = ?params,
                        duration_us = match_duration.as_micros() as u64,
                        "Route matched"
                    );
                }
                Ok(RouteMatch { executor, params })
            }
            Err(err) => {
                warn!(
                    path = %path,
                    error = %err,
                    duration_us = match_duration.as_micros() as u64,
                    "No route matched"
                );
                Err(err)
            }
        }
    }

    /// Every node target with its depth, depth-first in match order.
    #[must_use]
    pub fn targets(&self) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        collect_targets(&self.root, 0, &mut out);
        out
    }

    /// Text form of the trie, one node per line, indented by depth.
    #[must_use]
    pub fn render(&self) -> String {
        let targets = self.targets();
        let mut out = format!("[trie] nodes={}\n", targets.len());
        for (depth, target) in targets {
            out.push_str(&format!("[node] {}/{}\n", "  ".repeat(depth), target));
        }
        out
    }

    /// Print [`RouteTree::render`] to stdout.
    pub fn dump(&self) {
        print!("{}", self.render());
    }
}

fn collect_targets(children: &Children, depth: usize, out: &mut Vec<(usize, String)>) {
    for node in children.iter() {
        out.push((depth, node.target().to_string()));
        collect_targets(node.children(), depth + 1, out);
    }
}
