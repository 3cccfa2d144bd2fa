//! Dock control identity and metadata.
//!
//! A control's string id is its durable name: persisted structures refer to
//! panes by id, and the live pane behind an id may be destroyed and recreated
//! between sessions. Handles are the opposite: cheap session-scoped tokens
//! minted by the container that owns the live panes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable string identifier for a dockable pane (editor or view).
///
/// Unique within a window; survives save/restore cycles even when the live
/// control is destroyed and recreated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DockControlId(String);

impl DockControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An id that is empty or whitespace-only carries no identity.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DockControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DockControlId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DockControlId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handle to a live pane inside a backend container.
///
/// Valid only for the session that minted it; durable references use
/// [`DockControlId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub u64);

/// Opaque serialized snapshot sufficient to rebuild a closed pane's content.
///
/// The engine carries mementos through capture and persistence without
/// interpreting them; only resolve handlers look inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlMemento(pub serde_json::Value);

impl ControlMemento {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A live dockable pane known to a window.
///
/// Owned by whichever component created the underlying pane; the registry
/// keeps the record keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct DockControl {
    pub id: DockControlId,
    pub handle: ControlHandle,
    /// Name shown on the pane's tab or title bar.
    pub name: String,
    /// Hidden controls stay registered but are excluded from visible queries.
    pub visible: bool,
    /// Whether the user may close this pane.
    pub closeable: bool,
    /// Unsaved-changes marker, owned by the pane's content.
    pub dirty: bool,
    /// Snapshot for rebuilding the pane after it has been closed.
    pub memento: Option<ControlMemento>,
}

impl DockControl {
    /// Create a visible, closeable control named after its id.
    pub fn new(id: impl Into<DockControlId>, handle: ControlHandle) -> Self {
        let id = id.into();
        let name = id.as_str().to_string();
        Self {
            id,
            handle,
            name,
            visible: true,
            closeable: true,
            dirty: false,
            memento: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_memento(mut self, memento: ControlMemento) -> Self {
        self.memento = Some(memento);
        self
    }
}
