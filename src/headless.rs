//! In-memory dock container.
//!
//! The reference [`DockContainer`] implementation: full placement semantics
//! with no toolkit underneath. Backs the engine's tests and doubles as the
//! template for real toolkit ports. Its native blob is a JSON snapshot that
//! names panes by id, so it survives sessions the way a real toolkit's
//! serialized geometry does.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::backend::{DockContainer, ResolvedNode};
use crate::control::{ControlHandle, DockControlId};
use crate::structure::{DockArea, NativeState, Orientation};

const NATIVE_VERSION: u32 = 1;

#[derive(Debug, Clone)]
struct Pane {
    id: DockControlId,
    title: String,
}

#[derive(Debug, Clone, Default)]
struct AreaSlots {
    left: Option<ResolvedNode>,
    right: Option<ResolvedNode>,
    top: Option<ResolvedNode>,
    bottom: Option<ResolvedNode>,
}

impl AreaSlots {
    fn get(&self, area: DockArea) -> &Option<ResolvedNode> {
        match area {
            DockArea::Left => &self.left,
            DockArea::Right => &self.right,
            DockArea::Top => &self.top,
            DockArea::Bottom => &self.bottom,
        }
    }

    fn get_mut(&mut self, area: DockArea) -> &mut Option<ResolvedNode> {
        match area {
            DockArea::Left => &mut self.left,
            DockArea::Right => &mut self.right,
            DockArea::Top => &mut self.top,
            DockArea::Bottom => &mut self.bottom,
        }
    }
}

/// Container that arranges panes purely in memory.
#[derive(Debug, Default)]
pub struct HeadlessContainer {
    panes: IndexMap<ControlHandle, Pane>,
    areas: AreaSlots,
    next_handle: u64,
    activations: Vec<ControlHandle>,
}

impl HeadlessContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn pane_id(&self, handle: ControlHandle) -> Option<&DockControlId> {
        self.panes.get(&handle).map(|pane| &pane.id)
    }

    pub fn pane_title(&self, handle: ControlHandle) -> Option<&str> {
        self.panes.get(&handle).map(|pane| pane.title.as_str())
    }

    /// Whether the pane currently sits in some area's arrangement.
    pub fn is_placed(&self, handle: ControlHandle) -> bool {
        DockArea::ALL.iter().any(|&area| {
            self.areas
                .get(area)
                .as_ref()
                .map(|node| node.contains(handle))
                .unwrap_or(false)
        })
    }

    /// Handles placed across all areas, in fixed area order.
    pub fn placed_handles(&self) -> Vec<ControlHandle> {
        let mut out = Vec::new();
        for area in DockArea::ALL {
            if let Some(node) = self.areas.get(area) {
                out.extend(node.handles());
            }
        }
        out
    }

    /// Every activation since the container was created, oldest first.
    pub fn activations(&self) -> &[ControlHandle] {
        &self.activations
    }

    pub fn last_activated(&self) -> Option<ControlHandle> {
        self.activations.last().copied()
    }

    fn handle_for(&self, id: &str) -> Option<ControlHandle> {
        self.panes
            .iter()
            .find(|(_, pane)| pane.id.as_str() == id)
            .map(|(handle, _)| *handle)
    }

    fn detach(&mut self, handle: ControlHandle) -> bool {
        let mut detached = false;
        for area in DockArea::ALL {
            let slot = self.areas.get_mut(area);
            if let Some(node) = slot.take() {
                if node.contains(handle) {
                    *slot = node.without_pane(handle);
                    detached = true;
                } else {
                    *slot = Some(node);
                }
            }
        }
        detached
    }

    fn node_to_native(&self, node: &ResolvedNode) -> Option<NativeNode> {
        match node {
            ResolvedNode::Region { panes, active } => {
                let ids: Vec<String> = panes
                    .iter()
                    .filter_map(|handle| {
                        self.panes
                            .get(handle)
                            .map(|pane| pane.id.as_str().to_string())
                    })
                    .collect();
                if ids.is_empty() {
                    return None;
                }
                let active = (*active).min(ids.len() - 1);
                Some(NativeNode::Region { ids, active })
            }
            ResolvedNode::Group {
                orientation,
                children,
            } => {
                let nested: Vec<NativeNode> = children
                    .iter()
                    .filter_map(|child| self.node_to_native(child))
                    .collect();
                match nested.len() {
                    0 => None,
                    1 => nested.into_iter().next(),
                    n => Some(NativeNode::Split {
                        orientation: *orientation,
                        fractions: vec![1.0 / n as f32; n],
                        children: nested,
                    }),
                }
            }
        }
    }

    /// Rebuild one node from the blob, failing on any missing pane.
    fn native_to_node(&self, node: &NativeNode) -> Option<ResolvedNode> {
        match node {
            NativeNode::Region { ids, active } => {
                let mut handles = Vec::with_capacity(ids.len());
                for id in ids {
                    handles.push(self.handle_for(id)?);
                }
                if handles.is_empty() {
                    return None;
                }
                let active = (*active).min(handles.len() - 1);
                Some(ResolvedNode::Region {
                    panes: handles,
                    active,
                })
            }
            NativeNode::Split {
                orientation,
                children,
                ..
            } => {
                let mut nested = Vec::with_capacity(children.len());
                for child in children {
                    nested.push(self.native_to_node(child)?);
                }
                Some(ResolvedNode::Group {
                    orientation: *orientation,
                    children: nested,
                })
            }
        }
    }
}

impl DockContainer for HeadlessContainer {
    fn create_pane(&mut self, id: &DockControlId, title: &str) -> ControlHandle {
        self.next_handle += 1;
        let handle = ControlHandle(self.next_handle);
        self.panes.insert(
            handle,
            Pane {
                id: id.clone(),
                title: title.to_string(),
            },
        );
        handle
    }

    fn destroy_pane(&mut self, handle: ControlHandle) -> bool {
        self.detach(handle);
        self.panes.shift_remove(&handle).is_some()
    }

    fn remove_pane(&mut self, handle: ControlHandle) -> bool {
        if !self.panes.contains_key(&handle) {
            return false;
        }
        self.detach(handle);
        true
    }

    fn apply_area(&mut self, area: DockArea, layout: Option<&ResolvedNode>) {
        *self.areas.get_mut(area) = layout.cloned();
    }

    fn capture_area(&self, area: DockArea) -> Option<ResolvedNode> {
        self.areas.get(area).clone()
    }

    fn activate(&mut self, handle: ControlHandle) -> bool {
        for area in DockArea::ALL {
            if let Some(node) = self.areas.get_mut(area).as_mut() {
                if activate_in(node, handle) {
                    self.activations.push(handle);
                    return true;
                }
            }
        }
        false
    }

    fn save_native(&self) -> Option<NativeState> {
        let mut areas = Vec::new();
        for area in DockArea::ALL {
            if let Some(node) = self.areas.get(area) {
                if let Some(native) = self.node_to_native(node) {
                    areas.push(NativeArea { area, node: native });
                }
            }
        }
        let snapshot = NativeSnapshot {
            version: NATIVE_VERSION,
            areas,
        };
        serde_json::to_vec(&snapshot).ok().map(NativeState::new)
    }

    fn restore_native(&mut self, state: &NativeState) -> bool {
        let snapshot: NativeSnapshot = match serde_json::from_slice(state.as_bytes()) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::debug!(%err, "native state blob did not parse");
                return false;
            }
        };
        if snapshot.version != NATIVE_VERSION {
            tracing::debug!(
                version = snapshot.version,
                "native state blob has an unknown version"
            );
            return false;
        }

        // Two-phase commit: stage the whole arrangement against live panes
        // before touching the current one.
        let mut staged = AreaSlots::default();
        for entry in &snapshot.areas {
            match self.native_to_node(&entry.node) {
                Some(node) => *staged.get_mut(entry.area) = Some(node),
                None => {
                    tracing::debug!(
                        area = %entry.area,
                        "native state references a pane that no longer exists"
                    );
                    return false;
                }
            }
        }
        self.areas = staged;
        true
    }
}

fn activate_in(node: &mut ResolvedNode, handle: ControlHandle) -> bool {
    match node {
        ResolvedNode::Region { panes, active } => {
            match panes.iter().position(|&pane| pane == handle) {
                Some(idx) => {
                    *active = idx;
                    true
                }
                None => false,
            }
        }
        ResolvedNode::Group { children, .. } => children
            .iter_mut()
            .any(|child| activate_in(child, handle)),
    }
}

// ============================================================================
// Native blob wire format
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct NativeSnapshot {
    version: u32,
    areas: Vec<NativeArea>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NativeArea {
    area: DockArea,
    node: NativeNode,
}

#[derive(Debug, Serialize, Deserialize)]
enum NativeNode {
    Region {
        ids: Vec<String>,
        active: usize,
    },
    Split {
        orientation: Orientation,
        fractions: Vec<f32>,
        children: Vec<NativeNode>,
    },
}
