//! Per-window registry of live dock controls.
//!
//! The registry is the single source of truth for which controls exist:
//! resolution consults it first, capture maps live handles back through it,
//! and default activation walks it in insertion order. It is a plain
//! collection; events and lifecycle live in the window facade.

use indexmap::IndexMap;

use crate::control::{ControlHandle, DockControl, DockControlId};

/// Maps stable control ids to live controls, preserving insertion order.
#[derive(Debug, Default)]
pub struct ControlRegistry {
    controls: IndexMap<DockControlId, DockControl>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control, returning the previous entry for the same id.
    ///
    /// Re-registering keeps the id's original position, so iteration order
    /// stays stable when a pane is recreated. Safe to call from a resolve
    /// handler mid-pass; not-yet-resolved ids will find the new entry.
    pub fn register(&mut self, control: DockControl) -> Option<DockControl> {
        self.controls.insert(control.id.clone(), control)
    }

    /// Remove a control by id, preserving the order of remaining entries.
    pub fn unregister(&mut self, id: &DockControlId) -> Option<DockControl> {
        self.controls.shift_remove(id)
    }

    /// Look up a control; `visible_only` excludes hidden panes.
    pub fn get(&self, id: &DockControlId, visible_only: bool) -> Option<&DockControl> {
        self.controls
            .get(id)
            .filter(|control| !visible_only || control.visible)
    }

    pub fn get_mut(&mut self, id: &DockControlId) -> Option<&mut DockControl> {
        self.controls.get_mut(id)
    }

    /// All controls in insertion order; `visible_only` excludes hidden panes.
    pub fn get_all(&self, visible_only: bool) -> Vec<&DockControl> {
        self.controls
            .values()
            .filter(|control| !visible_only || control.visible)
            .collect()
    }

    /// Reverse lookup by live handle, used when capturing a container.
    pub fn find_by_handle(&self, handle: ControlHandle) -> Option<&DockControl> {
        self.controls
            .values()
            .find(|control| control.handle == handle)
    }

    pub fn contains(&self, id: &DockControlId) -> bool {
        self.controls.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &DockControlId> {
        self.controls.keys()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Flip a control's visibility flag. Returns false for unknown ids.
    pub fn set_visible(&mut self, id: &DockControlId, visible: bool) -> bool {
        match self.controls.get_mut(id) {
            Some(control) => {
                control.visible = visible;
                true
            }
            None => false,
        }
    }
}
