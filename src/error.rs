//! Error types for structure building and validation.
//!
//! Structural errors fail fast at build time. Resolution problems during an
//! apply pass are never errors: unresolved ids are dropped with a diagnostic
//! and reported through [`ApplyReport`](crate::layout::ApplyReport).

use thiserror::Error;

use crate::control::DockControlId;
use crate::structure::DockArea;

/// A structure description that cannot produce a valid layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedStructure {
    /// The same control id appears more than once in one structure.
    #[error("control id `{id}` appears more than once in the structure")]
    DuplicateId { id: DockControlId },

    /// A referenced id is not registered with the window building the structure.
    #[error("control id `{id}` is not registered with this window")]
    UnknownId { id: DockControlId },

    /// An id in the description is empty or whitespace-only.
    #[error("blank control id in the {area} area description")]
    BlankId { area: DockArea },

    /// The description for an area contains no ids at all.
    #[error("structure description for the {area} area is empty")]
    EmptyArea { area: DockArea },
}

impl MalformedStructure {
    /// Shorthand for [`MalformedStructure::DuplicateId`].
    pub fn duplicate_id(id: impl Into<DockControlId>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Shorthand for [`MalformedStructure::UnknownId`].
    pub fn unknown_id(id: impl Into<DockControlId>) -> Self {
        Self::UnknownId { id: id.into() }
    }
}

/// Result alias for structure building and validation.
pub type StructureResult<T> = Result<T, MalformedStructure>;
