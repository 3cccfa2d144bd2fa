//! Building structures from recursive area descriptions.
//!
//! The description format is the config-facing surface for perspectives: a
//! bare string is a single-id region, a flat list of strings is a tabbed
//! region, and nested lists form split groups whose orientation alternates
//! with depth, starting from the area's own orientation.

use serde::{Deserialize, Serialize};

use crate::error::MalformedStructure;
use crate::structure::tree::normalize_node;
use crate::structure::{
    DockArea, DockGroup, DockItem, DockNode, DockRegion, DockStructure, Orientation,
};

/// Recursive area description accepted by [`DockStructure::build`].
///
/// Serializes untagged, so saved files read as plain JSON/YAML values:
/// `"console"`, `["a", "b"]`, or `[["a", "b"], ["c"]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaSpec {
    /// Single control id.
    Id(String),
    /// Tabbed region when every element is an id; a split group otherwise.
    Items(Vec<AreaSpec>),
}

impl AreaSpec {
    pub fn id(id: impl Into<String>) -> Self {
        AreaSpec::Id(id.into())
    }

    /// Flat list of ids sharing one tabbed region.
    pub fn tabs<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AreaSpec::Items(ids.into_iter().map(|id| AreaSpec::Id(id.into())).collect())
    }

    pub fn group(specs: Vec<AreaSpec>) -> Self {
        AreaSpec::Items(specs)
    }

    /// Description of one area of an existing structure.
    ///
    /// Regions render as id lists and groups as nested lists, so rebuilding
    /// reproduces the same logical tree. Active tabs, mementos, native state,
    /// and explicit orientations are not part of the description; orientation
    /// is implied by area and nesting depth.
    pub fn from_area(structure: &DockStructure, area: DockArea) -> Option<AreaSpec> {
        structure.area(area).map(spec_of_node)
    }
}

impl From<&str> for AreaSpec {
    fn from(id: &str) -> Self {
        AreaSpec::Id(id.to_string())
    }
}

fn spec_of_node(node: &DockNode) -> AreaSpec {
    match node {
        DockNode::Region(region) => AreaSpec::Items(
            region
                .ids()
                .map(|id| AreaSpec::Id(id.as_str().to_string()))
                .collect(),
        ),
        DockNode::Group(group) => {
            AreaSpec::Items(group.children.iter().map(spec_of_node).collect())
        }
    }
}

impl DockStructure {
    /// Build a structure holding one area's subtree from a description.
    ///
    /// Fails fast: duplicate ids, blank ids, and empty descriptions are
    /// rejected here so `apply` never sees a malformed structure. Build
    /// multiple areas separately and [`merge`](DockStructure::merge) them.
    pub fn build(area: DockArea, spec: &AreaSpec) -> Result<DockStructure, MalformedStructure> {
        let node = build_node(spec, area, area.orientation())?;
        let mut structure = DockStructure::new();
        structure.set_area(area, normalize_node(node));
        if structure.is_empty() {
            return Err(MalformedStructure::EmptyArea { area });
        }
        structure.ensure_unique_ids()?;
        structure.assert_invariants();
        Ok(structure)
    }
}

fn build_node(
    spec: &AreaSpec,
    area: DockArea,
    orientation: Orientation,
) -> Result<DockNode, MalformedStructure> {
    match spec {
        AreaSpec::Id(raw) => Ok(DockNode::Region(DockRegion::new(vec![item_for(
            raw, area,
        )?]))),
        AreaSpec::Items(items) => {
            if items.is_empty() {
                return Err(MalformedStructure::EmptyArea { area });
            }
            let flat: Option<Vec<&String>> = items
                .iter()
                .map(|child| match child {
                    AreaSpec::Id(raw) => Some(raw),
                    AreaSpec::Items(_) => None,
                })
                .collect();
            match flat {
                Some(ids) => {
                    let region_items = ids
                        .into_iter()
                        .map(|raw| item_for(raw, area))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(DockNode::Region(DockRegion::new(region_items)))
                }
                None => {
                    let children = items
                        .iter()
                        .map(|child| build_node(child, area, orientation.flipped()))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(DockNode::Group(DockGroup::new(orientation, children)))
                }
            }
        }
    }
}

fn item_for(raw: &str, area: DockArea) -> Result<DockItem, MalformedStructure> {
    if raw.trim().is_empty() {
        return Err(MalformedStructure::BlankId { area });
    }
    Ok(DockItem::new(raw))
}
