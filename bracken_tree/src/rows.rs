// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-facing flattening of the visible tree.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId};

/// One row of the flattened visible tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibleRow {
    /// Node this row presents.
    pub id: NodeId,
    /// Depth in the hierarchy; roots are 0.
    pub depth: u32,
    /// Whether the node has at least one non-hidden child, i.e. whether an
    /// expansion affordance would reveal anything.
    pub has_children: bool,
    /// Whether the node is currently expanded.
    pub expanded: bool,
}

impl<V> Tree<V> {
    /// Flatten the tree for rendering.
    ///
    /// Rows come out in pre-order over the current sibling order; hidden
    /// subtrees are skipped and collapsed nodes contribute a row but none of
    /// their descendants.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[(NodeId, u32); 16]> = SmallVec::new();
        for &root in self.roots.iter().rev() {
            stack.push((root, 0));
        }
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.idx()];
            if node.flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            let expanded = node.flags.contains(NodeFlags::EXPANDED);
            let has_children = node
                .children
                .iter()
                .any(|&c| !self.nodes[c.idx()].flags.contains(NodeFlags::HIDDEN));
            out.push(VisibleRow {
                id,
                depth,
                has_children,
                expanded,
            });
            if expanded {
                for &child in node.children.iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }
        out
    }
}
