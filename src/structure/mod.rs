//! Persisted layout structure: trees, building, and queries.
//!
//! # Architecture
//!
//! - `tree`: the structure value types (areas, groups, regions, items) and
//!   tree surgery (merge, remove, normalize).
//! - `build`: the recursive description format and fail-fast builder.
//! - `query`: pure pre-order traversal helpers.
//!
//! # Integration
//!
//! Structures are inert values. The layout engine (`crate::layout`) turns
//! them into live arrangements and back; nothing in here touches a container.

mod build;
mod query;
mod tree;

pub use build::AreaSpec;
pub use query::{find_regions, node_ids, region_count};
pub use tree::{
    DockArea, DockGroup, DockItem, DockNode, DockRegion, DockStructure, NativeState, Orientation,
};
