//! Container capability interface, implemented once per toolkit.
//!
//! The engine never talks to a toolkit directly. It resolves a persisted
//! structure into [`ResolvedNode`] trees of live handles and hands those to
//! a [`DockContainer`], which owns the actual splitters, tab bars, and panes.
//! Implementations are injected into the window as boxed trait objects; the
//! in-memory one lives in [`crate::headless`].

use crate::control::{ControlHandle, DockControlId};
use crate::structure::{DockArea, NativeState, Orientation};

/// A structure subtree whose leaves have been resolved to live pane handles.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedNode {
    /// Tabbed set of live panes with the frontmost index.
    Region {
        panes: Vec<ControlHandle>,
        active: usize,
    },
    /// Split holding nested nodes.
    Group {
        orientation: Orientation,
        children: Vec<ResolvedNode>,
    },
}

impl ResolvedNode {
    /// Region with the first pane frontmost.
    pub fn region(panes: Vec<ControlHandle>) -> Self {
        ResolvedNode::Region { panes, active: 0 }
    }

    pub fn group(orientation: Orientation, children: Vec<ResolvedNode>) -> Self {
        ResolvedNode::Group {
            orientation,
            children,
        }
    }

    /// All pane handles under this node, pre-order.
    pub fn handles(&self) -> Vec<ControlHandle> {
        let mut out = Vec::new();
        self.collect_handles(&mut out);
        out
    }

    fn collect_handles(&self, out: &mut Vec<ControlHandle>) {
        match self {
            ResolvedNode::Region { panes, .. } => out.extend(panes.iter().copied()),
            ResolvedNode::Group { children, .. } => {
                for child in children {
                    child.collect_handles(out);
                }
            }
        }
    }

    pub fn contains(&self, handle: ControlHandle) -> bool {
        match self {
            ResolvedNode::Region { panes, .. } => panes.contains(&handle),
            ResolvedNode::Group { children, .. } => {
                children.iter().any(|child| child.contains(handle))
            }
        }
    }

    /// Append a pane to the first region, pre-order, and make it frontmost.
    ///
    /// A bare group with no region child (which normalization rules out)
    /// gets a fresh region appended.
    pub fn push_pane(&mut self, handle: ControlHandle) {
        if !self.push_pane_inner(handle) {
            if let ResolvedNode::Group { children, .. } = self {
                children.push(ResolvedNode::region(vec![handle]));
            }
        }
    }

    fn push_pane_inner(&mut self, handle: ControlHandle) -> bool {
        match self {
            ResolvedNode::Region { panes, active } => {
                panes.push(handle);
                *active = panes.len() - 1;
                true
            }
            ResolvedNode::Group { children, .. } => children
                .iter_mut()
                .any(|child| child.push_pane_inner(handle)),
        }
    }

    /// Remove one pane, collapsing emptied regions and single-child groups.
    ///
    /// Returns the normalized remainder, or `None` when nothing is left.
    pub fn without_pane(self, handle: ControlHandle) -> Option<ResolvedNode> {
        match self {
            ResolvedNode::Region { panes, active } => {
                let active_pane = panes.get(active).copied();
                let remaining: Vec<ControlHandle> =
                    panes.into_iter().filter(|&p| p != handle).collect();
                if remaining.is_empty() {
                    return None;
                }
                let active = active_pane
                    .and_then(|p| remaining.iter().position(|&r| r == p))
                    .unwrap_or(0);
                Some(ResolvedNode::Region {
                    panes: remaining,
                    active,
                })
            }
            ResolvedNode::Group {
                orientation,
                children,
            } => {
                let mut remaining: Vec<ResolvedNode> = children
                    .into_iter()
                    .filter_map(|child| child.without_pane(handle))
                    .collect();
                match remaining.len() {
                    0 => None,
                    1 => remaining.pop(),
                    _ => Some(ResolvedNode::Group {
                        orientation,
                        children: remaining,
                    }),
                }
            }
        }
    }
}

/// Toolkit surface the engine drives.
///
/// All methods are synchronous, run on the UI thread, and must not re-enter
/// the engine. One implementation exists per toolkit binding.
pub trait DockContainer {
    /// Create a new pane for `id`, returning its session handle.
    fn create_pane(&mut self, id: &DockControlId, title: &str) -> ControlHandle;

    /// Destroy a pane, detaching it from any area first.
    ///
    /// Returns false for unknown handles.
    fn destroy_pane(&mut self, handle: ControlHandle) -> bool;

    /// Detach a pane from its area, keeping it alive for later re-placement.
    fn remove_pane(&mut self, handle: ControlHandle) -> bool;

    /// Replace one area's arrangement (`None` clears the area).
    fn apply_area(&mut self, area: DockArea, layout: Option<&ResolvedNode>);

    /// Read back one area's current arrangement.
    fn capture_area(&self, area: DockArea) -> Option<ResolvedNode>;

    /// Bring a pane to the front of its region.
    ///
    /// Returns false when the pane is not currently placed.
    fn activate(&mut self, handle: ControlHandle) -> bool;

    /// Serialize the toolkit's full geometry (splitters, tab order).
    fn save_native(&self) -> Option<NativeState>;

    /// Restore a previously saved geometry blob.
    ///
    /// All-or-nothing: returns true only when every pane the blob references
    /// is alive and the whole arrangement was committed. On false the
    /// container is left exactly as it was.
    fn restore_native(&mut self, state: &NativeState) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> ControlHandle {
        ControlHandle(n)
    }

    #[test]
    fn test_handles_pre_order() {
        let node = ResolvedNode::group(
            Orientation::Vertical,
            vec![
                ResolvedNode::region(vec![h(1), h(2)]),
                ResolvedNode::group(
                    Orientation::Horizontal,
                    vec![
                        ResolvedNode::region(vec![h(3)]),
                        ResolvedNode::region(vec![h(4)]),
                    ],
                ),
            ],
        );
        assert_eq!(node.handles(), vec![h(1), h(2), h(3), h(4)]);
        assert!(node.contains(h(3)));
        assert!(!node.contains(h(9)));
    }

    #[test]
    fn test_push_pane_targets_first_region() {
        let mut node = ResolvedNode::group(
            Orientation::Vertical,
            vec![
                ResolvedNode::region(vec![h(1)]),
                ResolvedNode::region(vec![h(2)]),
            ],
        );
        node.push_pane(h(3));

        let ResolvedNode::Group { children, .. } = &node else {
            panic!("expected group");
        };
        assert_eq!(
            children[0],
            ResolvedNode::Region {
                panes: vec![h(1), h(3)],
                active: 1
            }
        );
    }

    #[test]
    fn test_without_pane_collapses_group() {
        let node = ResolvedNode::group(
            Orientation::Vertical,
            vec![
                ResolvedNode::region(vec![h(1)]),
                ResolvedNode::region(vec![h(2)]),
            ],
        );
        let node = node.without_pane(h(1)).unwrap();
        assert_eq!(node, ResolvedNode::region(vec![h(2)]));
    }

    #[test]
    fn test_without_pane_keeps_active_pane() {
        let node = ResolvedNode::Region {
            panes: vec![h(1), h(2), h(3)],
            active: 2,
        };
        let node = node.without_pane(h(1)).unwrap();
        assert_eq!(
            node,
            ResolvedNode::Region {
                panes: vec![h(2), h(3)],
                active: 1
            }
        );
    }

    #[test]
    fn test_without_last_pane_is_none() {
        let node = ResolvedNode::region(vec![h(1)]);
        assert!(node.without_pane(h(1)).is_none());
    }
}
