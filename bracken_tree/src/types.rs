// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the checkable tree: node identifiers, view flags,
//! tri-state selection, and the construction-time node description.

use alloc::vec::Vec;

/// Identifier for a node in the tree.
///
/// Ids are dense indices into the tree's node table. The structure of a tree
/// is fixed after construction, so an id handed out by a [`crate::Tree`]
/// never goes stale. Ids from a different tree instance are rejected by the
/// `Option`-returning accessors and ignored by mutators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node view flags controlling expansion and filter visibility.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Children of this node are currently shown.
        const EXPANDED = 0b0000_0001;
        /// Node is excluded by the active filter: skipped by rendering,
        /// selection aggregation, and select-all. Structurally still present.
        const HIDDEN   = 0b0000_0010;
    }
}

/// Tri-state selection value of a node.
///
/// The enum makes the forbidden "checked and partially checked at once"
/// combination unrepresentable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// Not selected.
    #[default]
    Unchecked,
    /// Fully selected: the node and, recursively, every non-hidden descendant.
    Checked,
    /// Some, but not all, non-hidden descendants are selected.
    PartiallyChecked,
}

impl CheckState {
    /// Returns `true` if the state is [`CheckState::Checked`].
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Returns `true` if the state is [`CheckState::Unchecked`].
    #[must_use]
    pub const fn is_unchecked(self) -> bool {
        matches!(self, Self::Unchecked)
    }

    /// Returns `true` if the state is [`CheckState::PartiallyChecked`].
    #[must_use]
    pub const fn is_partially_checked(self) -> bool {
        matches!(self, Self::PartiallyChecked)
    }

    /// Returns `true` for [`CheckState::Checked`] or
    /// [`CheckState::PartiallyChecked`].
    #[must_use]
    pub const fn is_engaged(self) -> bool {
        !matches!(self, Self::Unchecked)
    }
}

/// Opaque handle for host-managed display data (label text, icon).
///
/// The engine never interprets a symbol beyond identity. The host owns the
/// mapping from symbols to renderable content, for example via an interned
/// string table or static constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplaySymbol(pub u64);

/// Requested change to a node's selection, as forwarded from a checkbox or
/// row tap.
///
/// A tap on a tri-state checkbox has no inherent target state; use
/// [`CheckUpdate::Toggle`] to resolve against the node's current state.
/// [`CheckUpdate::Set`] carries an explicit target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CheckUpdate {
    /// Flip based on the current state: checked or partially checked nodes
    /// clear, unchecked nodes select.
    Toggle,
    /// Drive to an explicit state.
    Set(bool),
}

/// Construction-time description of one item in the hierarchy.
///
/// `Node` is a plain data holder: the engine consumes a forest of these at
/// [`crate::Tree::new`] and flattens it into its own storage, recording
/// sibling order and parent links exactly once. `selected` seeds the initial
/// selection; the remaining view state (expansion, visibility) starts at its
/// defaults and is controlled through the engine's operations afterwards.
#[derive(Clone, Debug)]
pub struct Node<V> {
    /// Display label handle.
    pub label: DisplaySymbol,
    /// Optional payload returned by selection queries. Not required to be
    /// unique across the tree.
    pub value: Option<V>,
    /// Optional icon handle.
    pub icon: Option<DisplaySymbol>,
    /// Initial selection for this node.
    pub selected: bool,
    /// Child nodes, in significant order.
    pub children: Vec<Node<V>>,
}

impl<V> Node<V> {
    /// Create an unselected leaf with the given label and no value.
    pub fn new(label: DisplaySymbol) -> Self {
        Self {
            label,
            value: None,
            icon: None,
            selected: false,
            children: Vec::new(),
        }
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new(DisplaySymbol(0))
    }
}

/// Construction configuration for a [`crate::Tree`].
#[derive(Clone, Debug, Default)]
pub struct TreeConfig {
    /// Initial expansion depth. `None` leaves every node collapsed; `Some(0)`
    /// expands every node at every depth; `Some(n)` with `n > 0` expands
    /// nodes at depths `0..n` (roots are depth 0), descending only through
    /// nodes that are themselves expanded.
    pub initial_expanded_levels: Option<u32>,
    /// Whether the collaborator should render a select-all header checkbox.
    pub show_select_all: bool,
    /// Whether the collaborator should render an expand/collapse-all button.
    pub show_expand_collapse_button: bool,
}
