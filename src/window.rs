//! Window facade tying the engine together
//!
//! A `DockWindow` owns the per-window context: the injected toolkit
//! container, the control registry, the standing resolve handlers, the
//! event bus, and configuration. The surrounding application talks to this
//! type only; the lower modules stay free of lifecycle and eventing
//! concerns.
//!
//! # Architecture
//!
//! - Structure apply and capture delegate to [`crate::layout`]
//! - Id resolution delegates to [`crate::resolve`], with any per-call
//!   handler consulted before the window's standing handlers
//! - Every mutating operation emits a [`DockEvent`] after the fact;
//!   observers never see intermediate state

use crate::backend::{DockContainer, ResolvedNode};
use crate::config::DockConfig;
use crate::control::{ControlHandle, DockControl, DockControlId};
use crate::error::{MalformedStructure, StructureResult};
use crate::events::{DockEvent, EventBus, SubscriptionId};
use crate::layout::{self, ApplyReport};
use crate::persist::LayoutStore;
use crate::registry::ControlRegistry;
use crate::resolve::ResolveHandler;
use crate::structure::{AreaSpec, DockArea, DockStructure};

/// One dockable window: a container plus the context needed to drive it.
pub struct DockWindow {
    container: Box<dyn DockContainer>,
    registry: ControlRegistry,
    handlers: Vec<Box<dyn ResolveHandler>>,
    events: EventBus,
    config: DockConfig,
}

impl DockWindow {
    /// Create a window around an injected container with default config.
    pub fn new(container: Box<dyn DockContainer>) -> Self {
        Self::with_config(container, DockConfig::default())
    }

    pub fn with_config(container: Box<dyn DockContainer>, config: DockConfig) -> Self {
        Self {
            container,
            registry: ControlRegistry::new(),
            handlers: Vec::new(),
            events: EventBus::new(),
            config,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ControlRegistry {
        &mut self.registry
    }

    pub fn container(&self) -> &dyn DockContainer {
        self.container.as_ref()
    }

    pub fn container_mut(&mut self) -> &mut dyn DockContainer {
        self.container.as_mut()
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DockConfig {
        &mut self.config
    }

    /// Append a standing resolve handler, consulted in registration order.
    pub fn add_handler(&mut self, handler: Box<dyn ResolveHandler>) {
        self.handlers.push(handler);
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Observe window events; the returned token unsubscribes.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&DockEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // Control lifecycle
    // ========================================================================

    /// Register an externally created control.
    pub fn register_control(&mut self, control: DockControl) {
        let id = control.id.clone();
        self.registry.register(control);
        self.events.emit(&DockEvent::ControlRegistered(id));
    }

    /// Create a pane, register it, and append it to an area's first region.
    ///
    /// Reopening an already-registered id places and activates the existing
    /// control instead of creating a duplicate. `None` lands the control in
    /// the configured default area.
    pub fn open_control(
        &mut self,
        id: impl Into<DockControlId>,
        title: &str,
        area: Option<DockArea>,
    ) -> StructureResult<ControlHandle> {
        let id = id.into();
        let area = area.unwrap_or(self.config.default_area);
        if id.is_blank() {
            return Err(MalformedStructure::BlankId { area });
        }

        if let Some(control) = self.registry.get(&id, false) {
            let handle = control.handle;
            self.place(handle, area);
            self.registry.set_visible(&id, true);
            self.container.activate(handle);
            self.events.emit(&DockEvent::ControlActivated(id));
            return Ok(handle);
        }

        let handle = self.container.create_pane(&id, title);
        self.registry
            .register(DockControl::new(id.clone(), handle).with_name(title));
        self.events.emit(&DockEvent::ControlRegistered(id.clone()));
        self.place(handle, area);
        self.container.activate(handle);
        self.events.emit(&DockEvent::ControlActivated(id));
        Ok(handle)
    }

    /// Close a control's pane and drop it from the registry.
    ///
    /// Controls marked not closeable are left alone. Returns false for
    /// unknown ids and refused closes.
    pub fn close_control(&mut self, id: &DockControlId) -> bool {
        let Some(control) = self.registry.get(id, false) else {
            return false;
        };
        if !control.closeable {
            tracing::debug!(id = %id, "close refused; control is not closeable");
            return false;
        }
        let handle = control.handle;
        self.container.destroy_pane(handle);
        self.registry.unregister(id);
        self.events.emit(&DockEvent::ControlClosed(id.clone()));
        self.events.emit(&DockEvent::ControlUnregistered(id.clone()));
        true
    }

    /// Bring a control to the front of its region.
    ///
    /// Returns false for unknown ids and controls not currently placed.
    pub fn activate_control(&mut self, id: &DockControlId) -> bool {
        let Some(control) = self.registry.get(id, false) else {
            return false;
        };
        let handle = control.handle;
        if self.container.activate(handle) {
            self.events.emit(&DockEvent::ControlActivated(id.clone()));
            true
        } else {
            false
        }
    }

    /// Place a hidden control back into the layout and activate it.
    ///
    /// A control detached from every area lands in the configured default
    /// area; one still placed is only marked visible and activated.
    pub fn show_control(&mut self, id: &DockControlId) -> bool {
        let Some(control) = self.registry.get(id, false) else {
            return false;
        };
        let handle = control.handle;
        self.place(handle, self.config.default_area);
        self.registry.set_visible(id, true);
        self.container.activate(handle);
        self.events.emit(&DockEvent::ControlShown(id.clone()));
        true
    }

    /// Detach a control from the layout, keeping its pane alive.
    pub fn hide_control(&mut self, id: &DockControlId) -> bool {
        let Some(control) = self.registry.get(id, false) else {
            return false;
        };
        let handle = control.handle;
        self.container.remove_pane(handle);
        self.registry.set_visible(id, false);
        self.events.emit(&DockEvent::ControlHidden(id.clone()));
        true
    }

    // ========================================================================
    // Structure apply and capture
    // ========================================================================

    /// Lay a structure onto the container using the standing handlers.
    pub fn apply(&mut self, structure: &DockStructure) -> ApplyReport {
        let handlers: Vec<&mut dyn ResolveHandler> = self
            .handlers
            .iter_mut()
            .map(|handler| handler.as_mut() as &mut dyn ResolveHandler)
            .collect();
        let report = layout::apply(
            structure,
            &mut self.registry,
            self.container.as_mut(),
            handlers,
            self.config.use_native_state,
        );
        self.emit_applied(&report);
        report
    }

    /// Capture the live arrangement as a fresh structure.
    pub fn get_structure(&self) -> DockStructure {
        layout::capture(
            &self.registry,
            self.container.as_ref(),
            self.config.capture_mementos,
        )
    }

    /// Apply a structure with an optional one-shot handler.
    ///
    /// The per-call handler is consulted before the standing handlers. When
    /// the apply dropped any ids the surviving regions are reset so no
    /// region is left showing a stale tab.
    pub fn set_structure(
        &mut self,
        structure: &DockStructure,
        handler: Option<&mut dyn ResolveHandler>,
    ) -> ApplyReport {
        let mut handlers: Vec<&mut dyn ResolveHandler> =
            Vec::with_capacity(self.handlers.len() + 1);
        if let Some(handler) = handler {
            handlers.push(handler);
        }
        handlers.extend(
            self.handlers
                .iter_mut()
                .map(|h| h.as_mut() as &mut dyn ResolveHandler),
        );

        let report = layout::apply(
            structure,
            &mut self.registry,
            self.container.as_mut(),
            handlers,
            self.config.use_native_state,
        );
        if !report.is_clean() {
            self.reset_regions();
        }
        self.emit_applied(&report);
        report
    }

    /// Bring the first control of every live region to the front.
    pub fn reset_regions(&mut self) {
        let live = layout::capture(&self.registry, self.container.as_ref(), false);
        layout::reset_regions(&live, &self.registry, self.container.as_mut());
    }

    /// Build a structure for one area, validating ids against the registry.
    ///
    /// Unlike [`DockStructure::build`], ids this window has never seen fail
    /// fast here instead of being dropped at apply time.
    pub fn build_area(&self, area: DockArea, spec: &AreaSpec) -> StructureResult<DockStructure> {
        let structure = DockStructure::build(area, spec)?;
        for id in structure.ids() {
            if !self.registry.contains(id) {
                return Err(MalformedStructure::unknown_id(id.clone()));
            }
        }
        Ok(structure)
    }

    fn emit_applied(&mut self, report: &ApplyReport) {
        self.events.emit(&DockEvent::StructureApplied {
            placed: report.placed.len(),
            dropped: report.dropped.len(),
            used_native: report.used_native,
        });
    }

    // ========================================================================
    // Saved layouts
    // ========================================================================

    /// Capture the live arrangement and save it under `name`.
    pub fn save_layout(&mut self, store: &mut LayoutStore, name: impl Into<String>) {
        let structure = self.get_structure();
        let regions = structure.region_count();
        store.remember(name, structure);
        store.prune(self.config.max_saved_layouts);
        self.events.emit(&DockEvent::StructureCaptured { regions });
    }

    /// Apply the layout saved under `name`, if the store has one.
    pub fn apply_layout(&mut self, store: &LayoutStore, name: &str) -> Option<ApplyReport> {
        let structure = store.get(name)?.structure.clone();
        Some(self.set_structure(&structure, None))
    }

    // ========================================================================
    // Placed-control queries
    // ========================================================================

    /// Look up a control currently placed in this window's layout.
    ///
    /// Registered-but-detached controls are not returned; use the registry
    /// accessors for those.
    pub fn get_control(&self, id: &DockControlId, visible_only: bool) -> Option<&DockControl> {
        let placed = self.placed_handles();
        self.registry
            .get(id, visible_only)
            .filter(|control| placed.contains(&control.handle))
    }

    /// All placed controls, in registry insertion order.
    pub fn get_controls(&self, visible_only: bool) -> Vec<&DockControl> {
        let placed = self.placed_handles();
        self.registry
            .get_all(visible_only)
            .into_iter()
            .filter(|control| placed.contains(&control.handle))
            .collect()
    }

    /// Handles currently placed in any area.
    fn placed_handles(&self) -> Vec<ControlHandle> {
        let mut out = Vec::new();
        for area in DockArea::ALL {
            if let Some(node) = self.container.capture_area(area) {
                out.extend(node.handles());
            }
        }
        out
    }

    fn is_placed(&self, handle: ControlHandle) -> bool {
        DockArea::ALL.into_iter().any(|area| {
            self.container
                .capture_area(area)
                .map(|node| node.contains(handle))
                .unwrap_or(false)
        })
    }

    /// Append a pane to an area unless it is already placed somewhere.
    fn place(&mut self, handle: ControlHandle, area: DockArea) {
        if self.is_placed(handle) {
            return;
        }
        let node = match self.container.capture_area(area) {
            Some(mut node) => {
                node.push_pane(handle);
                node
            }
            None => ResolvedNode::region(vec![handle]),
        };
        self.container.apply_area(area, Some(&node));
    }
}
