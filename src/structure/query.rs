//! Read-only traversal over structure trees.
//!
//! Pure functions of the tree: no mutation, deterministic pre-order, safe to
//! call repeatedly while a layout pass is in flight.

use crate::control::DockControlId;
use crate::structure::{DockNode, DockRegion};

/// All regions under `node`, pre-order.
pub fn find_regions(node: &DockNode) -> Vec<&DockRegion> {
    let mut out = Vec::new();
    visit_regions(node, &mut out);
    out
}

pub(crate) fn visit_regions<'a>(node: &'a DockNode, out: &mut Vec<&'a DockRegion>) {
    match node {
        DockNode::Region(region) => out.push(region),
        DockNode::Group(group) => {
            for child in &group.children {
                visit_regions(child, out);
            }
        }
    }
}

/// All control ids under `node`, pre-order.
pub fn node_ids(node: &DockNode) -> Vec<&DockControlId> {
    find_regions(node)
        .into_iter()
        .flat_map(|region| region.ids())
        .collect()
}

/// Number of regions under `node`.
pub fn region_count(node: &DockNode) -> usize {
    find_regions(node).len()
}
