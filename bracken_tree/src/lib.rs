// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_tree --heading-base-level=0

//! Bracken Tree: a tri-state checkable tree model for UI hierarchies.
//!
//! Bracken Tree is a reusable building block for checkbox trees, pickers, and
//! faceted filters: any widget where a hierarchy of items is selected in
//! bulk and the parent rows summarize their descendants.
//!
//! - Represents a fixed hierarchy of labeled nodes with per-node selection,
//!   expansion, and filter visibility.
//! - Keeps tri-state selection consistent: a branch is checked when all of
//!   its visible children are, partially checked on any mixture, and hidden
//!   branches are frozen out of the computation.
//! - Provides filtering by host predicate, sibling sorting by host
//!   comparator (with original-order restore), bulk select/expand toggles,
//!   and pre-order selection queries.
//!
//! ## Where this fits
//!
//! This crate is interaction state only. It performs no layout, hit testing,
//! or painting: a rendering collaborator walks [`Tree::visible_rows`] (or the
//! node accessors) to draw rows, and forwards taps back into the engine's
//! mutation operations. State flows one way: the collaborator must treat
//! the tree as read-only and route every change through the engine so the
//! selection invariants hold.
//!
//! ## Structure is fixed, state is not
//!
//! A [`Tree`] is built once from a forest of [`Node`] descriptions and never
//! changes shape afterwards: no insertion, removal, or reparenting. Only
//! selection, expansion, visibility, and sibling order move. This keeps every
//! [`NodeId`] valid for the life of the tree and removes any need for
//! generational handles or structural bookkeeping during traversals.
//!
//! ## API overview
//!
//! - [`Tree`]: container owning the flattened node table and root order.
//! - [`Node`]: construction-time description of one item.
//! - [`NodeId`]: dense handle of a node; [`NodeRef`]: read-only view.
//! - [`CheckState`]: tri-state selection value; [`CheckUpdate`]: tagged
//!   selection input (explicit state or state-dependent toggle).
//! - [`NodeFlags`]: expansion and filter-visibility flags.
//! - [`DisplaySymbol`]: opaque host-managed handle for labels and icons.
//! - [`TreeConfig`]: initial expansion depth and header-affordance hints.
//! - [`VisibleRow`]: one row of the flattened visible tree.
//!
//! Key operations:
//! - [`Tree::new`] → build, wire parent links, apply initial expansion.
//! - [`Tree::update_check`] / [`Tree::set_select_all`] → tri-state selection
//!   with downward drive and upward reconciliation.
//! - [`Tree::filter`] / [`Tree::clear_filter`] → per-node visibility from a
//!   predicate; ancestors of a match stay visible.
//! - [`Tree::sort_by`] / [`Tree::restore_order`] → reorder every sibling
//!   group with one comparator, or back to construction order.
//! - [`Tree::expand_all`] / [`Tree::collapse_all`] / [`Tree::toggle_expanded`]
//!   / [`Tree::toggle_all_expanded`] → expansion state.
//! - [`Tree::selected_nodes`] / [`Tree::selected_values`] → pre-order
//!   queries over checked, visible nodes; [`Tree::all_selected`] /
//!   [`Tree::all_expanded`] → header aggregates.
//! - [`Tree::set_selection_listener`] → full selected-value list after every
//!   selection-affecting operation.
//!
//! ## Example
//!
//! ```
//! use bracken_tree::{CheckUpdate, DisplaySymbol, Node, Tree, TreeConfig};
//!
//! let roots = vec![Node {
//!     label: DisplaySymbol(1),
//!     value: Some("docs"),
//!     children: vec![
//!         Node {
//!             label: DisplaySymbol(2),
//!             value: Some("guide"),
//!             ..Node::default()
//!         },
//!         Node {
//!             label: DisplaySymbol(3),
//!             value: Some("reference"),
//!             ..Node::default()
//!         },
//!     ],
//!     ..Node::default()
//! }];
//! let mut tree = Tree::new(roots, TreeConfig::default());
//!
//! let root = tree.roots()[0];
//! tree.update_check(root, CheckUpdate::Toggle);
//! assert_eq!(tree.selected_values(), vec![&"docs", &"guide", &"reference"]);
//! assert!(tree.all_selected());
//!
//! // Narrow the view; hidden branches stop counting but keep their state.
//! tree.filter(|n| n.value() == Some(&"guide"));
//! assert_eq!(tree.selected_values(), vec![&"docs", &"guide"]);
//! ```
//!
//! ## Concurrency
//!
//! Every operation is a synchronous, bounded, in-memory traversal taking
//! `&mut self` or `&self`; the borrow rules enforce the single-writer,
//! single-reader-at-a-time contract mechanically. There is no internal
//! locking and no suspension point inside any walk.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod filter;
mod order;
mod rows;
mod select;
mod tree;
mod types;

pub use rows::VisibleRow;
pub use select::SelectionListener;
pub use tree::{NodeRef, Tree};
pub use types::{CheckState, CheckUpdate, DisplaySymbol, Node, NodeFlags, NodeId, TreeConfig};
