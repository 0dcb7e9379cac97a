// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling ordering: comparator-driven sorting and original-order restore.

use core::cmp::Ordering;

use crate::tree::{NodeRef, Tree};

impl<V> Tree<V> {
    /// Reorder every sibling group, at every depth, with the same comparator.
    ///
    /// The sort is stable and in place; it touches only sibling order.
    /// Selection, expansion, and visibility are left as they are, and the
    /// selection listener does not fire.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(NodeRef<'_, V>, NodeRef<'_, V>) -> Ordering,
    {
        let mut roots = self.roots.clone();
        roots.sort_by(|&a, &b| compare(self.node_ref(a), self.node_ref(b)));
        self.roots = roots;
        for idx in 0..self.nodes.len() {
            let mut children = self.nodes[idx].children.clone();
            children.sort_by(|&a, &b| compare(self.node_ref(a), self.node_ref(b)));
            self.nodes[idx].children = children;
        }
    }

    /// Restore every sibling group to ascending construction order.
    pub fn restore_order(&mut self) {
        let mut roots = self.roots.clone();
        roots.sort_by_key(|id| self.nodes[id.idx()].original_index);
        self.roots = roots;
        for idx in 0..self.nodes.len() {
            let mut children = self.nodes[idx].children.clone();
            children.sort_by_key(|id| self.nodes[id.idx()].original_index);
            self.nodes[idx].children = children;
        }
    }
}
