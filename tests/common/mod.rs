//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use drydock::backend::DockContainer;
use drydock::headless::HeadlessContainer;
use drydock::resolve::ResolveHandler;
use drydock::structure::{find_regions, DockArea, DockStructure};
use drydock::window::DockWindow;
use drydock::{ControlHandle, ControlMemento, ControlRegistry, DockControl, DockControlId};

/// Create an empty window over an in-memory container
pub fn test_window() -> DockWindow {
    DockWindow::new(Box::new(HeadlessContainer::new()))
}

/// Create a window with controls opened into the given areas
pub fn window_with_controls(controls: &[(&str, DockArea)]) -> DockWindow {
    let mut window = test_window();
    for (id, area) in controls {
        window
            .open_control(*id, *id, Some(*area))
            .expect("open_control failed in test setup");
    }
    window
}

/// Create a pane and register it, for tests driving the engine directly
pub fn register_pane(
    container: &mut HeadlessContainer,
    registry: &mut ControlRegistry,
    id: &str,
) -> ControlHandle {
    let handle = container.create_pane(&id.into(), id);
    registry.register(DockControl::new(id, handle));
    handle
}

/// Ids of every control in one area, pre-order across its regions
pub fn region_ids(structure: &DockStructure, area: DockArea) -> Vec<String> {
    structure
        .area(area)
        .map(|node| {
            find_regions(node)
                .into_iter()
                .flat_map(|region| region.ids().map(|id| id.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Id lists per region of one area, preserving region boundaries
pub fn regions_of(structure: &DockStructure, area: DockArea) -> Vec<Vec<String>> {
    structure
        .area(area)
        .map(|node| {
            find_regions(node)
                .into_iter()
                .map(|region| region.ids().map(|id| id.to_string()).collect())
                .collect()
        })
        .unwrap_or_default()
}

/// Handler that recreates any id it is asked for, counting invocations
pub struct CreatorHandler {
    pub calls: usize,
    pub seen_mementos: Vec<Option<ControlMemento>>,
}

impl CreatorHandler {
    pub fn new() -> Self {
        Self {
            calls: 0,
            seen_mementos: Vec::new(),
        }
    }
}

impl ResolveHandler for CreatorHandler {
    fn resolve_id(
        &mut self,
        id: &DockControlId,
        memento: Option<&ControlMemento>,
        registry: &mut ControlRegistry,
        container: &mut dyn DockContainer,
    ) -> Option<ControlHandle> {
        self.calls += 1;
        self.seen_mementos.push(memento.cloned());
        let handle = container.create_pane(id, id.as_str());
        registry.register(DockControl::new(id.clone(), handle));
        Some(handle)
    }
}

/// Handler that never resolves anything, counting invocations
pub struct RefusingHandler {
    pub calls: usize,
}

impl RefusingHandler {
    pub fn new() -> Self {
        Self { calls: 0 }
    }
}

impl ResolveHandler for RefusingHandler {
    fn resolve_id(
        &mut self,
        _id: &DockControlId,
        _memento: Option<&ControlMemento>,
        _registry: &mut ControlRegistry,
        _container: &mut dyn DockContainer,
    ) -> Option<ControlHandle> {
        self.calls += 1;
        None
    }
}
