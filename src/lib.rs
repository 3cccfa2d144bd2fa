//! Drydock - toolkit-agnostic dockable window layout engine
//!
//! This crate provides the core types and logic for managing a dockable
//! window: a persistable tree of split groups and tabbed regions, a
//! registry of live controls, lazy id-to-control resolution through
//! handler callbacks, and a two-tier restore path that prefers opaque
//! native geometry and falls back to logical placement.

pub mod backend;
pub mod config;
pub mod config_paths;
pub mod control;
pub mod error;
pub mod events;
pub mod headless;
pub mod layout;
pub mod persist;
pub mod registry;
pub mod resolve;
pub mod structure;
pub mod tracing;
pub mod window;

// Re-export commonly used types
pub use backend::DockContainer;
pub use config::DockConfig;
pub use control::{ControlHandle, ControlMemento, DockControl, DockControlId};
pub use error::{MalformedStructure, StructureResult};
pub use events::{DockEvent, SubscriptionId};
pub use layout::ApplyReport;
pub use registry::ControlRegistry;
pub use resolve::ResolveHandler;
pub use structure::{AreaSpec, DockArea, DockStructure};
pub use window::DockWindow;
