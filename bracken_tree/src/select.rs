// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tri-state selection: propagation, aggregates, queries, and the
//! selection-changed listener.

use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::tree::{NodeData, Tree};
use crate::types::{CheckState, CheckUpdate, NodeFlags, NodeId};

/// Listener invoked after every mutating operation that can change the
/// selected-value list, with the full current list in document order.
pub type SelectionListener<V> = Box<dyn FnMut(&[&V])>;

impl<V> Tree<V> {
    /// Apply a selection change to one node and propagate it.
    ///
    /// The resolved state drives the node's whole subtree, skipping hidden
    /// branches (they stay frozen until unfiltered), then every ancestor is
    /// recomputed from its non-hidden children. Unknown ids are ignored.
    pub fn update_check(&mut self, id: NodeId, update: CheckUpdate) {
        let Some(current) = self.nodes.get(id.idx()).map(|n| n.check) else {
            return;
        };
        let target = match update {
            CheckUpdate::Set(state) => state,
            CheckUpdate::Toggle => !current.is_engaged(),
        };
        self.drive_subtree(id, target);
        self.reconcile_ancestors(id);
        self.all_selected = self.compute_all_selected();
        self.notify_selection_changed();
    }

    /// Drive every non-hidden node to a uniform selection state.
    ///
    /// No upward pass is needed: every visible node ends up in the same
    /// state, and hidden branches keep whatever they had.
    pub fn set_select_all(&mut self, selected: bool) {
        let roots = self.roots.clone();
        for root in roots {
            if self.nodes[root.idx()].flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            self.drive_subtree(root, selected);
        }
        self.all_selected = self.compute_all_selected();
        self.notify_selection_changed();
    }

    /// Whether every non-hidden root is fully selected.
    ///
    /// "Fully selected" is the strict recursive reading: the node is checked
    /// and so is every non-hidden descendant. An empty or fully hidden tree
    /// reports `false`.
    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    /// Ids of every checked, non-hidden node in pre-order.
    ///
    /// Partially checked nodes are never included.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        visit_selected(&self.nodes, &self.roots, |id, _| out.push(id));
        out
    }

    /// Values of every checked, non-hidden node in pre-order.
    ///
    /// Nodes without a value contribute nothing.
    pub fn selected_values(&self) -> Vec<&V> {
        collect_selected_values(&self.nodes, &self.roots)
    }

    /// Register the selection-changed listener, replacing any previous one.
    pub fn set_selection_listener(&mut self, listener: impl FnMut(&[&V]) + 'static) {
        self.on_selection_changed = Some(Box::new(listener));
    }

    /// Remove the selection-changed listener.
    pub fn clear_selection_listener(&mut self) {
        self.on_selection_changed = None;
    }

    // --- internals ---

    fn drive_subtree(&mut self, id: NodeId, selected: bool) {
        self.nodes[id.idx()].check = if selected {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        };
        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            if self.nodes[child.idx()].flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            self.drive_subtree(child, selected);
        }
    }

    fn reconcile_ancestors(&mut self, id: NodeId) {
        let mut cursor = self.nodes[id.idx()].parent;
        while let Some(parent) = cursor {
            self.recompute_check_from_children(parent);
            cursor = self.nodes[parent.idx()].parent;
        }
    }

    /// Derive one node's check state from its non-hidden children.
    ///
    /// With no evaluable children (a leaf, or every child hidden) the node's
    /// own state is left as it is.
    pub(crate) fn recompute_check_from_children(&mut self, id: NodeId) {
        let mut visible_any = false;
        let mut all_checked = true;
        let mut any_engaged = false;
        for &child in &self.nodes[id.idx()].children {
            let node = &self.nodes[child.idx()];
            if node.flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            visible_any = true;
            match node.check {
                CheckState::Checked => any_engaged = true,
                CheckState::PartiallyChecked => {
                    any_engaged = true;
                    all_checked = false;
                }
                CheckState::Unchecked => all_checked = false,
            }
        }
        if !visible_any {
            return;
        }
        self.nodes[id.idx()].check = if all_checked {
            CheckState::Checked
        } else if any_engaged {
            CheckState::PartiallyChecked
        } else {
            CheckState::Unchecked
        };
    }

    /// Post-order recompute of every branch's check state.
    ///
    /// Run after construction and after every filter pass, when the set of
    /// non-hidden children may have changed under every node at once.
    pub(crate) fn refresh_branch_checks(&mut self) {
        let roots = self.roots.clone();
        for root in roots {
            self.refresh_branch_checks_below(root);
        }
    }

    fn refresh_branch_checks_below(&mut self, id: NodeId) {
        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            self.refresh_branch_checks_below(child);
        }
        self.recompute_check_from_children(id);
    }

    pub(crate) fn compute_all_selected(&self) -> bool {
        let mut any_visible = false;
        for &root in &self.roots {
            if self.nodes[root.idx()].flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            any_visible = true;
            if !self.fully_selected(root) {
                return false;
            }
        }
        any_visible
    }

    fn fully_selected(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.idx()];
        if !node.check.is_checked() {
            return false;
        }
        node.children.iter().all(|&child| {
            self.nodes[child.idx()].flags.contains(NodeFlags::HIDDEN) || self.fully_selected(child)
        })
    }

    pub(crate) fn notify_selection_changed(&mut self) {
        let Self {
            nodes,
            roots,
            on_selection_changed,
            ..
        } = self;
        if let Some(listener) = on_selection_changed.as_mut() {
            let values = collect_selected_values(nodes, roots);
            listener(&values);
        }
    }
}

/// Pre-order walk over checked, non-hidden nodes.
///
/// A hidden node's subtree is skipped wholesale: a node only stays visible
/// if some descendant matched the filter, so a hidden node cannot have
/// visible descendants.
fn visit_selected<'a, V>(
    nodes: &'a [NodeData<V>],
    roots: &[NodeId],
    mut visit: impl FnMut(NodeId, &'a NodeData<V>),
) {
    let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
    for &root in roots.iter().rev() {
        stack.push(root);
    }
    while let Some(id) = stack.pop() {
        let node = &nodes[id.idx()];
        if node.flags.contains(NodeFlags::HIDDEN) {
            continue;
        }
        if node.check.is_checked() {
            visit(id, node);
        }
        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }
}

pub(crate) fn collect_selected_values<'a, V>(
    nodes: &'a [NodeData<V>],
    roots: &[NodeId],
) -> Vec<&'a V> {
    let mut out = Vec::new();
    visit_selected(nodes, roots, |_, node| {
        if let Some(value) = node.value.as_ref() {
            out.push(value);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::types::{DisplaySymbol, Node, TreeConfig};

    use super::*;

    fn leaf(label: u64) -> Node<u64> {
        Node {
            label: DisplaySymbol(label),
            value: Some(label),
            ..Node::default()
        }
    }

    fn branch(label: u64, children: Vec<Node<u64>>) -> Node<u64> {
        Node {
            label: DisplaySymbol(label),
            value: Some(label),
            children,
            ..Node::default()
        }
    }

    /// Root1[C11, C12], Root2[C21, C22] with values 1, 11, 12, 2, 21, 22.
    fn two_roots() -> Tree<u64> {
        Tree::new(
            vec![
                branch(1, vec![leaf(11), leaf(12)]),
                branch(2, vec![leaf(21), leaf(22)]),
            ],
            TreeConfig::default(),
        )
    }

    #[test]
    fn selecting_a_branch_selects_the_subtree_and_marks_siblings_partial() {
        // Scenario: select Root1 wholesale, then Child2.2 alone.
        let mut tree = two_roots();
        let r1 = tree.roots()[0];
        let r2 = tree.roots()[1];
        let c22 = tree.children_of(r2)[1];

        tree.update_check(r1, CheckUpdate::Set(true));
        tree.update_check(c22, CheckUpdate::Set(true));

        assert_eq!(tree.selected_values(), vec![&1, &11, &12, &22]);
        assert_eq!(tree.check_state(r2), Some(CheckState::PartiallyChecked));
        assert!(!tree.check_state(r2).unwrap().is_checked());
        assert!(!tree.all_selected());
    }

    #[test]
    fn toggle_resolves_against_the_current_state() {
        let mut tree = two_roots();
        let r1 = tree.roots()[0];
        let c11 = tree.children_of(r1)[0];

        // Unchecked -> toggle selects.
        tree.update_check(r1, CheckUpdate::Toggle);
        assert_eq!(tree.check_state(r1), Some(CheckState::Checked));

        // Partially checked -> toggle clears.
        tree.update_check(c11, CheckUpdate::Set(false));
        assert_eq!(tree.check_state(r1), Some(CheckState::PartiallyChecked));
        tree.update_check(r1, CheckUpdate::Toggle);
        assert_eq!(tree.check_state(r1), Some(CheckState::Unchecked));
        assert_eq!(tree.check_state(c11), Some(CheckState::Unchecked));
    }

    #[test]
    fn deselecting_the_last_child_clears_the_parent() {
        let mut tree = two_roots();
        let r1 = tree.roots()[0];
        let c11 = tree.children_of(r1)[0];
        let c12 = tree.children_of(r1)[1];

        tree.update_check(c11, CheckUpdate::Set(true));
        assert_eq!(tree.check_state(r1), Some(CheckState::PartiallyChecked));
        tree.update_check(c12, CheckUpdate::Set(true));
        assert_eq!(tree.check_state(r1), Some(CheckState::Checked));
        tree.update_check(c11, CheckUpdate::Set(false));
        assert_eq!(tree.check_state(r1), Some(CheckState::PartiallyChecked));
        tree.update_check(c12, CheckUpdate::Set(false));
        assert_eq!(tree.check_state(r1), Some(CheckState::Unchecked));
    }

    #[test]
    fn select_all_drives_everything_and_sets_the_aggregate() {
        let mut tree = two_roots();
        tree.set_select_all(true);
        assert!(tree.all_selected());
        for &root in tree.roots() {
            assert_eq!(tree.check_state(root), Some(CheckState::Checked));
            for &child in tree.children_of(root) {
                assert_eq!(tree.check_state(child), Some(CheckState::Checked));
            }
        }

        tree.set_select_all(false);
        assert!(!tree.all_selected());
        assert!(tree.selected_values().is_empty());
    }

    #[test]
    fn initial_selection_is_reconciled_at_construction() {
        // Both children of Root1 start selected; the branch state is derived
        // bottom-up, not taken from the node's own flag.
        let roots = vec![branch(
            1,
            vec![
                Node {
                    selected: true,
                    ..leaf(11)
                },
                Node {
                    selected: true,
                    ..leaf(12)
                },
            ],
        )];
        let tree = Tree::new(roots, TreeConfig::default());
        let r1 = tree.roots()[0];
        assert_eq!(tree.check_state(r1), Some(CheckState::Checked));
        assert!(tree.all_selected());

        let roots = vec![branch(
            1,
            vec![
                Node {
                    selected: true,
                    ..leaf(11)
                },
                leaf(12),
            ],
        )];
        let tree = Tree::new(roots, TreeConfig::default());
        let r1 = tree.roots()[0];
        assert_eq!(tree.check_state(r1), Some(CheckState::PartiallyChecked));
        assert!(!tree.all_selected());
    }

    #[test]
    fn selected_values_skip_valueless_nodes() {
        let mut tree = Tree::new(
            vec![Node {
                label: DisplaySymbol(1),
                children: vec![leaf(11)],
                ..Node::default()
            }],
            TreeConfig::default(),
        );
        let r1 = tree.roots()[0];
        tree.update_check(r1, CheckUpdate::Set(true));
        // The root is checked but carries no value.
        assert_eq!(tree.selected_nodes().len(), 2);
        assert_eq!(tree.selected_values(), vec![&11]);
    }

    #[test]
    fn listener_receives_the_full_list_per_operation() {
        let seen: Rc<RefCell<Vec<Vec<u64>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tree = two_roots();
        tree.set_selection_listener(move |values: &[&u64]| {
            sink.borrow_mut()
                .push(values.iter().map(|v| **v).collect());
        });

        let r1 = tree.roots()[0];
        tree.update_check(r1, CheckUpdate::Set(true));
        tree.set_select_all(false);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], vec![1, 11, 12]);
        assert!(seen[1].is_empty());
    }

    #[test]
    fn update_on_unknown_id_is_a_no_op() {
        let mut tree = two_roots();
        tree.update_check(NodeId::new(1000), CheckUpdate::Set(true));
        assert!(tree.selected_values().is_empty());
    }

    /// Every node with at least one visible child must agree with its
    /// children: all checked, none engaged, or a mixture.
    fn assert_tristate_consistent(tree: &Tree<u64>) {
        for i in 0..tree.len() {
            #[allow(clippy::cast_possible_truncation, reason = "Test tree is tiny.")]
            let id = NodeId::new(i as u32);
            let visible: Vec<NodeId> = tree
                .children_of(id)
                .iter()
                .copied()
                .filter(|&c| !tree.is_hidden(c))
                .collect();
            if visible.is_empty() {
                continue;
            }
            let all = visible
                .iter()
                .all(|&c| tree.check_state(c) == Some(CheckState::Checked));
            let any = visible
                .iter()
                .any(|&c| tree.check_state(c) != Some(CheckState::Unchecked));
            let expected = if all {
                CheckState::Checked
            } else if any {
                CheckState::PartiallyChecked
            } else {
                CheckState::Unchecked
            };
            assert_eq!(
                tree.check_state(id),
                Some(expected),
                "node {i} disagrees with its visible children"
            );
        }
    }

    #[test]
    fn consistency_holds_across_mixed_operations() {
        let mut tree = Tree::new(
            vec![
                branch(1, vec![leaf(11), branch(12, vec![leaf(121), leaf(122)])]),
                branch(2, vec![leaf(21), leaf(22)]),
            ],
            TreeConfig::default(),
        );
        let r1 = tree.roots()[0];
        let c12 = tree.children_of(r1)[1];
        let g121 = tree.children_of(c12)[0];
        let c21 = tree.children_of(tree.roots()[1])[0];

        tree.update_check(c21, CheckUpdate::Toggle);
        assert_tristate_consistent(&tree);
        tree.update_check(g121, CheckUpdate::Set(true));
        assert_tristate_consistent(&tree);
        tree.filter(|n| n.label().0 != 22);
        assert_tristate_consistent(&tree);
        tree.set_select_all(true);
        assert_tristate_consistent(&tree);
        tree.update_check(c12, CheckUpdate::Toggle);
        assert_tristate_consistent(&tree);
        tree.clear_filter();
        assert_tristate_consistent(&tree);
        tree.update_check(r1, CheckUpdate::Set(false));
        assert_tristate_consistent(&tree);
    }

    #[test]
    fn select_all_on_empty_tree_keeps_aggregate_false() {
        let mut tree: Tree<u64> = Tree::new(vec![], TreeConfig::default());
        tree.set_select_all(true);
        assert!(!tree.all_selected());
        assert!(tree.selected_values().is_empty());
    }
}
