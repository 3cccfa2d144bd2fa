//! Lazy structure-to-control resolution.
//!
//! A persisted structure names controls by id. When a layout is applied the
//! ids must become live panes: the registry answers for panes that already
//! exist, and pluggable handlers answer for ones that must be recreated
//! (typically from a memento saved with the structure). An id nobody can
//! resolve is dropped from the layout with a warning; one missing pane never
//! blocks restoring the rest of the window.

use std::collections::HashMap;

use crate::backend::DockContainer;
use crate::control::{ControlHandle, ControlMemento, DockControl, DockControlId};
use crate::registry::ControlRegistry;

/// Supplies live controls for ids the registry cannot resolve.
///
/// Handlers are consulted in order after a registry miss. An implementation
/// may create the pane through `container` and should register the resulting
/// control in `registry` before returning its handle; the resolver re-checks
/// the registry after every call, so registration alone is enough. Calls are
/// synchronous and expected to be fast: deserialize the memento, build the
/// pane, return. Slow I/O belongs before the apply pass, not here.
pub trait ResolveHandler {
    fn resolve_id(
        &mut self,
        id: &DockControlId,
        memento: Option<&ControlMemento>,
        registry: &mut ControlRegistry,
        container: &mut dyn DockContainer,
    ) -> Option<ControlHandle>;
}

/// Per-id progress within one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    Resolving,
    Resolved(ControlHandle),
    Failed,
}

/// One resolution pass over a structure's ids.
///
/// Holds the registry and container borrows for the duration of the pass and
/// memoizes outcomes: resolving the same id twice returns the same handle,
/// never a second pane.
pub struct Resolver<'a, 'h> {
    registry: &'a mut ControlRegistry,
    container: &'a mut dyn DockContainer,
    handlers: Vec<&'h mut dyn ResolveHandler>,
    states: HashMap<DockControlId, ResolveState>,
}

impl<'a, 'h> Resolver<'a, 'h> {
    pub fn new(
        registry: &'a mut ControlRegistry,
        container: &'a mut dyn DockContainer,
        handlers: Vec<&'h mut dyn ResolveHandler>,
    ) -> Self {
        Self {
            registry,
            container,
            handlers,
            states: HashMap::new(),
        }
    }

    /// Resolve one id to a live handle, consulting handlers on registry miss.
    ///
    /// Returns `None` when the id stays unresolved; the caller drops it from
    /// the layout. A registry entry added since an earlier failed attempt is
    /// picked up: the registry is authoritative at every step.
    pub fn resolve(
        &mut self,
        id: &DockControlId,
        memento: Option<&ControlMemento>,
    ) -> Option<ControlHandle> {
        match self.states.get(id) {
            Some(ResolveState::Resolved(handle)) => return Some(*handle),
            Some(ResolveState::Resolving) => {
                // A handler re-entered resolution of the id it was asked for.
                tracing::warn!(id = %id, "reentrant resolution; dropping id");
                self.states.insert(id.clone(), ResolveState::Failed);
                return None;
            }
            Some(ResolveState::Failed) | None => {}
        }

        if let Some(control) = self.registry.get(id, false) {
            let handle = control.handle;
            self.states.insert(id.clone(), ResolveState::Resolved(handle));
            return Some(handle);
        }

        self.states.insert(id.clone(), ResolveState::Resolving);
        for handler in self.handlers.iter_mut() {
            let returned = handler.resolve_id(id, memento, self.registry, self.container);

            // The registry wins over the return value: a handler that
            // registered a control resolves even when it returned None.
            if let Some(control) = self.registry.get(id, false) {
                let handle = control.handle;
                self.states.insert(id.clone(), ResolveState::Resolved(handle));
                return Some(handle);
            }
            if let Some(handle) = returned {
                self.registry.register(DockControl::new(id.clone(), handle));
                self.states.insert(id.clone(), ResolveState::Resolved(handle));
                return Some(handle);
            }
        }

        tracing::warn!(id = %id, "no registry entry or handler resolved control; dropping from layout");
        self.states.insert(id.clone(), ResolveState::Failed);
        None
    }

    /// Ids that failed to resolve so far in this pass.
    pub fn failed_ids(&self) -> Vec<&DockControlId> {
        self.states
            .iter()
            .filter(|(_, state)| matches!(state, ResolveState::Failed))
            .map(|(id, _)| id)
            .collect()
    }
}
