//! Typed layout change events and subscriptions.
//!
//! The reactive surface of the engine: window operations fire [`DockEvent`]
//! values through a synchronous [`EventBus`]. Subscribers get a token back
//! and unsubscribe with it; dispatch order is subscription order. There is
//! no payload interpretation here, just delivery.

use std::fmt;

use crate::control::DockControlId;

/// Change notification fired by window-level operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    /// A control joined the window's registry.
    ControlRegistered(DockControlId),
    /// A control left the registry.
    ControlUnregistered(DockControlId),
    /// A control was brought to the front of its region.
    ControlActivated(DockControlId),
    /// A control's pane was closed and destroyed.
    ControlClosed(DockControlId),
    /// A hidden control was placed back into the layout.
    ControlShown(DockControlId),
    /// A control was detached from the layout but kept alive.
    ControlHidden(DockControlId),
    /// A structure was applied to the live container.
    StructureApplied {
        placed: usize,
        dropped: usize,
        used_native: bool,
    },
    /// The live arrangement was captured into a structure.
    StructureCaptured { regions: usize },
}

/// Token identifying one subscription; pass to [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&DockEvent)>;

/// Synchronous observer list.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; the returned token unsubscribes it.
    pub fn subscribe(&mut self, callback: impl FnMut(&DockEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false for unknown or stale tokens.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn emit(&mut self, event: &DockEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
