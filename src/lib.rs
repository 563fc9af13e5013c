//! # trierouter
//!
//! **trierouter** provides the regexp segment nodes of a dynamic URL router:
//! a trie where every node matches one path segment, extracts named values
//! from it and delegates the rest of the path to its children.
//!
//! ## Overview
//!
//! A route such as `/users/{id:[0-9]+}/files/{name}` is stored as a chain of
//! nodes, one per segment. This crate implements the nodes that decide with
//! a regular expression, plus the collaborators they need to be useful:
//! ordered children, per-node middlewares and executors, and a capture
//! container.
//!
//! ## Architecture
//!
//! - **[`router`]** - [`RegexpNode`](router::RegexpNode), [`FullMatchNode`](router::FullMatchNode)
//!   and the tagged [`Node`](router::Node) union; matching and merging
//! - **[`children`]** - ordered child nodes, separator handling, sibling merge
//! - **[`handler`]** - middlewares and executors attached to a node
//! - **[`executor`]** - the unit of work returned on a successful match
//! - **[`middleware`]** - hooks wrapped around executors
//! - **[`container`]** - capture sink written by nodes on success
//! - **[`context`]** - request attributes used for executor selection
//! - **[`tree`]** - root of the trie with logging and all-or-nothing merges
//! - **[`runtime_config`]** / **[`logging`]** - environment driven setup
//! - **[`error`]** - the [`RouterError`](error::RouterError) taxonomy
//!
//! ### Request Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Tree as RouteTree
//!     participant Node as RegexpNode
//!     participant Children
//!     participant Handler
//!
//!     Caller->>Tree: resolve(ctx, "/42/orders")
//!     Tree->>Children: match_path(ctx, params, "/42/orders")
//!     Children->>Node: match_path(ctx, params, "42/orders")
//!     Node->>Node: regex on segment "42"
//!     Node->>Children: match_path(ctx, params, "/orders")
//!     Children-->>Node: MiddlewareExecutor
//!     Node->>Handler: pack(executor)
//!     Handler-->>Node: wrapped executor
//!     Node->>Node: commit captures (id = 42)
//!     Node-->>Tree: MiddlewareExecutor
//!     Tree-->>Caller: RouteMatch { executor, params }
//! ```
//!
//! ### Key Properties
//!
//! 1. **Commit on success**: a node writes its captures only after every
//!    node below it succeeded.
//! 2. **No backtracking**: once a node's pattern accepts a segment, a
//!    failure further down is final for that node.
//! 3. **Build, then serve**: the tree is immutable while serving, so any
//!    number of threads can match concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trierouter::context::RequestContext;
//! use trierouter::executor::FnExecutor;
//! use trierouter::router::Node;
//! use trierouter::tree::RouteTree;
//!
//! let file = Node::for_pattern(".*", &["name"])
//!     .unwrap()
//!     .with_executor(Arc::new(FnExecutor::new("get_file", |_| Ok(()))));
//!
//! let mut tree = RouteTree::new();
//! tree.add(file).unwrap();
//!
//! let m = tree.resolve(&RequestContext::new(), "/a.b*c").unwrap();
//! assert_eq!(m.param("name"), Some("a.b*c"));
//! ```

pub mod children;
pub mod container;
pub mod context;
pub mod error;
pub mod executor;
pub mod handler;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod runtime_config;
pub mod tree;

pub use error::{Result, RouterError};
pub use router::{Node, RouteKind, Router};
pub use tree::{RouteMatch, RouteTree};
