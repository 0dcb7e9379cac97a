// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree container: flattened storage, construction, accessors, and
//! expansion state.

use alloc::vec::Vec;

use crate::select::SelectionListener;
use crate::types::{CheckState, DisplaySymbol, Node, NodeFlags, NodeId, TreeConfig};

/// Per-node record in the flattened node table.
///
/// Structure fields (`parent`, `children`, `original_index`) are written once
/// during construction; only `check` and `flags` change afterwards.
pub(crate) struct NodeData<V> {
    pub(crate) label: DisplaySymbol,
    pub(crate) value: Option<V>,
    pub(crate) icon: Option<DisplaySymbol>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) original_index: u32,
    pub(crate) check: CheckState,
    pub(crate) flags: NodeFlags,
}

/// Tri-state checkable tree engine.
///
/// Owns the flattened node table and the ordered root list, and implements
/// every mutation documented at the crate level. The rendering collaborator
/// reads state through [`NodeRef`] and the id-keyed accessors and must route
/// all mutation through the engine's operations.
pub struct Tree<V> {
    pub(crate) nodes: Vec<NodeData<V>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) all_selected: bool,
    pub(crate) all_expanded: bool,
    pub(crate) config: TreeConfig,
    pub(crate) on_selection_changed: Option<SelectionListener<V>>,
}

impl<V> core::fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hidden = self
            .nodes
            .iter()
            .filter(|n| n.flags.contains(NodeFlags::HIDDEN))
            .count();
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("hidden", &hidden)
            .field("all_selected", &self.all_selected)
            .field("all_expanded", &self.all_expanded)
            .finish_non_exhaustive()
    }
}

impl<V> Tree<V> {
    /// Build the engine from a forest of [`Node`] descriptions.
    ///
    /// Flattening assigns each node its `original_index` within its sibling
    /// group and its parent link, in supplied order. Initial expansion is
    /// applied per [`TreeConfig::initial_expanded_levels`], then branch check
    /// states are derived bottom-up from any initially selected nodes.
    pub fn new(roots: Vec<Node<V>>, config: TreeConfig) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            all_selected: false,
            all_expanded: false,
            config,
            on_selection_changed: None,
        };
        let root_ids: Vec<NodeId> = roots
            .into_iter()
            .enumerate()
            .map(|(i, node)| tree.attach(node, None, sibling_index(i)))
            .collect();
        tree.roots = root_ids;
        tree.apply_initial_expansion();
        tree.refresh_branch_checks();
        tree.all_selected = tree.compute_all_selected();
        tree
    }

    fn attach(&mut self, node: Node<V>, parent: Option<NodeId>, original_index: u32) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The node table uses 32-bit indices."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            label: node.label,
            value: node.value,
            icon: node.icon,
            parent,
            children: Vec::new(),
            original_index,
            check: if node.selected {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            },
            flags: NodeFlags::default(),
        });
        let child_ids: Vec<NodeId> = node
            .children
            .into_iter()
            .enumerate()
            .map(|(i, child)| self.attach(child, Some(id), sibling_index(i)))
            .collect();
        self.nodes[id.idx()].children = child_ids;
        id
    }

    fn apply_initial_expansion(&mut self) {
        match self.config.initial_expanded_levels {
            None => {}
            Some(0) => self.expand_all(),
            Some(levels) => {
                let roots = self.roots.clone();
                for root in roots {
                    self.expand_to_depth(root, 0, levels);
                }
            }
        }
    }

    fn expand_to_depth(&mut self, id: NodeId, depth: u32, levels: u32) {
        if depth >= levels {
            return;
        }
        self.nodes[id.idx()].flags.insert(NodeFlags::EXPANDED);
        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            self.expand_to_depth(child, depth + 1, levels);
        }
    }

    // --- accessors ---

    /// Ordered root ids.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The configuration supplied at construction.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Read-only view of a node, if the id belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        (id.idx() < self.nodes.len()).then(|| self.node_ref(id))
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> NodeRef<'_, V> {
        NodeRef { tree: self, id }
    }

    /// Tri-state selection of a node, if the id is known.
    pub fn check_state(&self, id: NodeId) -> Option<CheckState> {
        self.nodes.get(id.idx()).map(|n| n.check)
    }

    /// View flags of a node, if the id is known.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.nodes.get(id.idx()).map(|n| n.flags)
    }

    /// Label handle of a node, if the id is known.
    pub fn label(&self, id: NodeId) -> Option<DisplaySymbol> {
        self.nodes.get(id.idx()).map(|n| n.label)
    }

    /// Payload of a node, if the id is known and the node carries one.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(id.idx()).and_then(|n| n.value.as_ref())
    }

    /// Icon handle of a node, if the id is known and the node carries one.
    pub fn icon(&self, id: NodeId) -> Option<DisplaySymbol> {
        self.nodes.get(id.idx()).and_then(|n| n.icon)
    }

    /// Parent of a node. `None` for roots and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx()).and_then(|n| n.parent)
    }

    /// Children of a node in current sibling order; empty for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.idx())
            .map_or(&[], |n| n.children.as_slice())
    }

    /// Construction-time sibling position, if the id is known.
    pub fn original_index(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(id.idx()).map(|n| n.original_index)
    }

    /// Whether a node's children are currently shown. `false` for unknown ids.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .is_some_and(|n| n.flags.contains(NodeFlags::EXPANDED))
    }

    /// Whether a node is excluded by the active filter. `false` for unknown ids.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .is_some_and(|n| n.flags.contains(NodeFlags::HIDDEN))
    }

    // --- expansion ---

    /// Flip one node's expansion. The expand-all aggregate is not affected.
    pub fn toggle_expanded(&mut self, id: NodeId) {
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.flags.toggle(NodeFlags::EXPANDED);
        }
    }

    /// Expand every node, hidden nodes included, so a later filter clear
    /// reveals consistent state. Records the expand direction.
    pub fn expand_all(&mut self) {
        for n in &mut self.nodes {
            n.flags.insert(NodeFlags::EXPANDED);
        }
        self.all_expanded = true;
    }

    /// Collapse every node, hidden nodes included. Records the collapse
    /// direction.
    pub fn collapse_all(&mut self) {
        for n in &mut self.nodes {
            n.flags.remove(NodeFlags::EXPANDED);
        }
        self.all_expanded = false;
    }

    /// Alternate between [`Tree::expand_all`] and [`Tree::collapse_all`]
    /// based on the last bulk direction, for a single header affordance.
    pub fn toggle_all_expanded(&mut self) {
        if self.all_expanded {
            self.collapse_all();
        } else {
            self.expand_all();
        }
    }

    /// Last bulk expansion direction (`true` after an expand-all).
    pub fn all_expanded(&self) -> bool {
        self.all_expanded
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Sibling positions use 32-bit indices."
)]
fn sibling_index(i: usize) -> u32 {
    i as u32
}

/// Read-only view of one node, handed to filter predicates, sort
/// comparators, and renderers.
pub struct NodeRef<'a, V> {
    pub(crate) tree: &'a Tree<V>,
    pub(crate) id: NodeId,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<V> core::fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("check", &self.check_state())
            .field("flags", &self.data().flags)
            .finish_non_exhaustive()
    }
}

impl<'a, V> NodeRef<'a, V> {
    fn data(&self) -> &'a NodeData<V> {
        &self.tree.nodes[self.id.idx()]
    }

    /// Id of the viewed node.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Display label handle.
    pub fn label(self) -> DisplaySymbol {
        self.data().label
    }

    /// Payload, if the node carries one.
    pub fn value(self) -> Option<&'a V> {
        self.data().value.as_ref()
    }

    /// Icon handle, if the node carries one.
    pub fn icon(self) -> Option<DisplaySymbol> {
        self.data().icon
    }

    /// Tri-state selection of the node.
    pub fn check_state(self) -> CheckState {
        self.data().check
    }

    /// Whether the node's children are currently shown.
    pub fn is_expanded(self) -> bool {
        self.data().flags.contains(NodeFlags::EXPANDED)
    }

    /// Whether the node is excluded by the active filter.
    pub fn is_hidden(self) -> bool {
        self.data().flags.contains(NodeFlags::HIDDEN)
    }

    /// Construction-time sibling position.
    pub fn original_index(self) -> u32 {
        self.data().original_index
    }

    /// View of the parent node, if any.
    pub fn parent(self) -> Option<Self> {
        self.data().parent.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// Views of the children in current sibling order.
    pub fn children(self) -> impl Iterator<Item = Self> {
        self.data().children.iter().map(move |&id| Self {
            tree: self.tree,
            id,
        })
    }
}
