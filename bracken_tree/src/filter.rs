// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filtering: per-node visibility from a host predicate.
//!
//! Visibility and selection are orthogonal. A filter pass only rewrites the
//! `HIDDEN` flags; selection flags are untouched, and only the *aggregation*
//! over children changes because the set of non-hidden children changes.

use crate::tree::{NodeRef, Tree};
use crate::types::{NodeFlags, NodeId};

impl<V> Tree<V> {
    /// Apply a visibility filter to every node.
    ///
    /// The predicate judges each node independently; a node stays visible iff
    /// it matches or any descendant, at any depth, matches. Every node is
    /// evaluated. Afterwards branch check states are recomputed bottom-up
    /// over the new non-hidden children sets, the all-selected aggregate is
    /// refreshed, and the selection listener fires.
    pub fn filter<F>(&mut self, mut predicate: F)
    where
        F: FnMut(NodeRef<'_, V>) -> bool,
    {
        let roots = self.roots.clone();
        for root in roots {
            self.apply_filter(root, &mut predicate);
        }
        self.refresh_branch_checks();
        self.all_selected = self.compute_all_selected();
        self.notify_selection_changed();
    }

    /// Make every node visible again, the fast path for an
    /// everything-matches filter.
    pub fn clear_filter(&mut self) {
        for node in &mut self.nodes {
            node.flags.remove(NodeFlags::HIDDEN);
        }
        self.refresh_branch_checks();
        self.all_selected = self.compute_all_selected();
        self.notify_selection_changed();
    }

    fn apply_filter<F>(&mut self, id: NodeId, predicate: &mut F) -> bool
    where
        F: FnMut(NodeRef<'_, V>) -> bool,
    {
        let mut keep = predicate(self.node_ref(id));
        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            // Every node is evaluated; no short-circuit once a match is found.
            let child_keep = self.apply_filter(child, predicate);
            keep = keep || child_keep;
        }
        self.nodes[id.idx()].flags.set(NodeFlags::HIDDEN, !keep);
        keep
    }
}
