//! # Router Module
//!
//! Regexp-based nodes of the routing trie. Each node matches exactly one
//! path segment, extracts named values from it and hands the rest of the
//! path to its children.
//!
//! ## Overview
//!
//! Two node shapes live here, both reporting [`RouteKind::Regexp`]:
//!
//! - [`RegexpNode`] runs a compiled regular expression against the segment
//!   and copies selected submatches into the caller's [`Container`](crate::container::Container).
//! - [`FullMatchNode`] is the shortcut for "everything up to the next `/`":
//!   the whole segment is captured verbatim under a single key and no regex
//!   is evaluated.
//!
//! [`Node`] is the tagged union the trie stores. Merging dispatches on the
//! tag, so a regexp node can only absorb a regexp node with the same
//! expression and a full-match node only one with the same key.
//!
//! ## Matching
//!
//! ```text
//! path "/42/orders" at the root
//!     → Children consumes "/"           (children collaborator)
//!     → RegexpNode "([0-9]+)" sees "42/orders"
//!         segment "42" matches
//!         → Children consumes "/"
//!         → child node sees "orders", resolves an executor
//!         → handler.pack wraps this node's middlewares
//!     → captures written: id = "42"
//! ```
//!
//! Captures are committed only once everything below the node succeeded,
//! so a failed deeper match never leaves stray values in the container.
//! Matching never backtracks: a node whose pattern matched but whose
//! children failed returns the failure as is.
//!
//! Expressions are not anchored to the segment. `([0-9]+)` accepts `a42b`
//! and captures `42`; add `^...$` to the expression when the whole segment
//! must match.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trierouter::container::{Container, ParamContainer};
//! use trierouter::context::RequestContext;
//! use trierouter::executor::FnExecutor;
//! use trierouter::router::{Node, Router};
//!
//! let node = Node::for_pattern("([0-9]+)", &["id"])
//!     .unwrap()
//!     .with_executor(Arc::new(FnExecutor::new("get_user", |_| Ok(()))));
//!
//! let mut params = ParamContainer::new();
//! let exec = node
//!     .match_path(&RequestContext::new(), &mut params, "42")
//!     .unwrap();
//! assert_eq!(exec.name(), "get_user");
//! assert_eq!(params.get("id"), Some("42"));
//! ```

mod core;
mod full_match;
pub(crate) mod merge;
mod regexp;

pub use self::core::{
    is_full_match, CaptureIndex, Node, RouteKind, Router, FULL_MATCH_TARGET, SEPARATOR,
};
pub use full_match::FullMatchNode;
pub use regexp::RegexpNode;
