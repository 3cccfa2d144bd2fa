//! Persisted layout trees: areas, split groups, tabbed regions.
//!
//! A [`DockStructure`] is the toolkit-independent form of a window layout:
//! one optional subtree per conventional area, leaves naming controls by id.
//! Structures are value types. Capture produces a fresh one each time and
//! nothing here aliases live UI state; cloning is always a deep copy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::control::{ControlMemento, DockControlId};
use crate::error::MalformedStructure;
use crate::structure::query;

// ============================================================================
// Areas and orientation
// ============================================================================

/// One of the four conventional window sides hosting a dock subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockArea {
    Left,
    Right,
    Top,
    Bottom,
}

impl DockArea {
    /// Fixed traversal order used wherever areas are walked.
    pub const ALL: [DockArea; 4] = [
        DockArea::Left,
        DockArea::Right,
        DockArea::Top,
        DockArea::Bottom,
    ];

    /// Initial split orientation for subtrees rooted in this area.
    ///
    /// Side areas stack their contents vertically; top and bottom areas lay
    /// them out in a row. Nesting alternates from there.
    pub fn orientation(&self) -> Orientation {
        match self {
            DockArea::Left | DockArea::Right => Orientation::Vertical,
            DockArea::Top | DockArea::Bottom => Orientation::Horizontal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DockArea::Left => "left",
            DockArea::Right => "right",
            DockArea::Top => "top",
            DockArea::Bottom => "bottom",
        }
    }
}

impl fmt::Display for DockArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction a group splits its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(&self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

// ============================================================================
// Tree nodes
// ============================================================================

/// A control slot in a persisted region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockItem {
    pub id: DockControlId,
    /// Snapshot for rebuilding content that no longer has a live control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memento: Option<ControlMemento>,
}

impl DockItem {
    pub fn new(id: impl Into<DockControlId>) -> Self {
        Self {
            id: id.into(),
            memento: None,
        }
    }

    pub fn with_memento(mut self, memento: ControlMemento) -> Self {
        self.memento = Some(memento);
        self
    }
}

/// An ordered, tabbed group of control slots sharing one screen area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockRegion {
    pub items: Vec<DockItem>,
    /// Index of the frontmost tab.
    #[serde(default)]
    pub active: usize,
}

impl DockRegion {
    pub fn new(items: Vec<DockItem>) -> Self {
        Self { items, active: 0 }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DockControlId>,
    {
        Self::new(ids.into_iter().map(DockItem::new).collect())
    }

    pub fn ids(&self) -> impl Iterator<Item = &DockControlId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Id of the frontmost tab, if the active index is in range.
    pub fn active_id(&self) -> Option<&DockControlId> {
        self.items.get(self.active).map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clamp_active(&mut self) {
        if self.active >= self.items.len() {
            self.active = self.items.len().saturating_sub(1);
        }
    }
}

/// A split holding regions and nested groups in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockGroup {
    pub orientation: Orientation,
    pub children: Vec<DockNode>,
}

impl DockGroup {
    pub fn new(orientation: Orientation, children: Vec<DockNode>) -> Self {
        Self {
            orientation,
            children,
        }
    }
}

/// One node of a structure tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DockNode {
    Region(DockRegion),
    Group(DockGroup),
}

impl DockNode {
    /// Single-id region leaf.
    pub fn leaf(id: impl Into<DockControlId>) -> Self {
        DockNode::Region(DockRegion::from_ids([id.into()]))
    }

    /// Tabbed region leaf.
    pub fn tabs<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DockControlId>,
    {
        DockNode::Region(DockRegion::from_ids(ids))
    }

    pub fn split(orientation: Orientation, children: Vec<DockNode>) -> Self {
        DockNode::Group(DockGroup::new(orientation, children))
    }
}

/// Opaque toolkit-serialized geometry (splitter positions, tab order).
///
/// Attached to a structure as a fast, high-fidelity restore path. The engine
/// never looks inside; only the container that produced a blob can consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeState(pub Vec<u8>);

impl NativeState {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// Structure
// ============================================================================

/// Persisted window layout: one optional subtree per conventional area plus
/// an optional native geometry blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<DockNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<DockNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<DockNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<DockNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_state: Option<NativeState>,
}

impl DockStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self, area: DockArea) -> Option<&DockNode> {
        match area {
            DockArea::Left => self.left.as_ref(),
            DockArea::Right => self.right.as_ref(),
            DockArea::Top => self.top.as_ref(),
            DockArea::Bottom => self.bottom.as_ref(),
        }
    }

    pub fn area_mut(&mut self, area: DockArea) -> &mut Option<DockNode> {
        match area {
            DockArea::Left => &mut self.left,
            DockArea::Right => &mut self.right,
            DockArea::Top => &mut self.top,
            DockArea::Bottom => &mut self.bottom,
        }
    }

    pub fn set_area(&mut self, area: DockArea, node: Option<DockNode>) {
        *self.area_mut(area) = node;
    }

    pub fn take_area(&mut self, area: DockArea) -> Option<DockNode> {
        self.area_mut(area).take()
    }

    /// Attach an opaque native geometry blob; the logical tree is untouched.
    pub fn with_native_state(mut self, blob: NativeState) -> Self {
        self.native_state = Some(blob);
        self
    }

    /// True when no area holds a subtree.
    pub fn is_empty(&self) -> bool {
        DockArea::ALL.iter().all(|&a| self.area(a).is_none())
    }

    /// Combine with a structure built for other areas.
    ///
    /// Areas defined by `other` replace the same areas of `self`; `other`'s
    /// native blob wins when present. Fails if a control id would end up in
    /// the merged structure twice (id uniqueness is per window, not per area).
    pub fn merge(mut self, mut other: DockStructure) -> Result<DockStructure, MalformedStructure> {
        for area in DockArea::ALL {
            if let Some(node) = other.take_area(area) {
                self.set_area(area, Some(node));
            }
        }
        if other.native_state.is_some() {
            self.native_state = other.native_state;
        }
        self.ensure_unique_ids()?;
        Ok(self)
    }

    /// All regions across areas, pre-order, in fixed area order.
    pub fn regions(&self) -> Vec<&DockRegion> {
        let mut out = Vec::new();
        for area in DockArea::ALL {
            if let Some(node) = self.area(area) {
                query::visit_regions(node, &mut out);
            }
        }
        out
    }

    /// All control ids across areas, pre-order, in fixed area order.
    pub fn ids(&self) -> Vec<&DockControlId> {
        self.regions()
            .into_iter()
            .flat_map(|region| region.ids())
            .collect()
    }

    pub fn contains_id(&self, id: &DockControlId) -> bool {
        self.ids().into_iter().any(|known| known == id)
    }

    /// Which area holds `id`, if any.
    pub fn area_of(&self, id: &DockControlId) -> Option<DockArea> {
        DockArea::ALL.into_iter().find(|&area| {
            self.area(area)
                .map(|node| query::node_ids(node).into_iter().any(|known| known == id))
                .unwrap_or(false)
        })
    }

    pub fn region_count(&self) -> usize {
        self.regions().len()
    }

    /// Remove one id wherever it appears, collapsing emptied nodes.
    ///
    /// Returns true when the id was present.
    pub fn remove_id(&mut self, id: &DockControlId) -> bool {
        let mut removed = false;
        for area in DockArea::ALL {
            if let Some(node) = self.take_area(area) {
                let (node, hit) = remove_id_in(node, id);
                removed |= hit;
                self.set_area(area, node);
            }
        }
        removed
    }

    /// Drop empty regions, collapse single-child groups, clamp active tabs.
    pub fn normalize(&mut self) {
        for area in DockArea::ALL {
            if let Some(node) = self.take_area(area) {
                self.set_area(area, normalize_node(node));
            }
        }
    }

    /// Fail with `DuplicateId` if any control id appears twice.
    pub(crate) fn ensure_unique_ids(&self) -> Result<(), MalformedStructure> {
        let mut seen: HashSet<&DockControlId> = HashSet::new();
        for id in self.ids() {
            if !seen.insert(id) {
                return Err(MalformedStructure::duplicate_id(id.clone()));
            }
        }
        Ok(())
    }

    /// Validate internal consistency. Panics on violation in debug builds.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let mut seen: HashSet<&DockControlId> = HashSet::new();
        for area in DockArea::ALL {
            if let Some(node) = self.area(area) {
                assert_node_invariants(node, area, &mut seen);
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

#[cfg(debug_assertions)]
fn assert_node_invariants<'a>(
    node: &'a DockNode,
    area: DockArea,
    seen: &mut HashSet<&'a DockControlId>,
) {
    match node {
        DockNode::Region(region) => {
            assert!(
                !region.items.is_empty(),
                "empty region in {area} area after normalization"
            );
            assert!(
                region.active < region.items.len(),
                "active tab {} out of range for {} items in {area} area",
                region.active,
                region.items.len()
            );
            for item in &region.items {
                assert!(!item.id.is_blank(), "blank control id in {area} area");
                assert!(
                    seen.insert(&item.id),
                    "control id `{}` placed twice",
                    item.id
                );
            }
        }
        DockNode::Group(group) => {
            assert!(
                group.children.len() >= 2,
                "group with {} children in {area} area after normalization",
                group.children.len()
            );
            for child in &group.children {
                assert_node_invariants(child, area, seen);
            }
        }
    }
}

// ============================================================================
// Tree surgery
// ============================================================================

/// Drop empty regions and collapse single-child groups, bottom-up.
pub(crate) fn normalize_node(node: DockNode) -> Option<DockNode> {
    match node {
        DockNode::Region(mut region) => {
            if region.items.is_empty() {
                return None;
            }
            region.clamp_active();
            Some(DockNode::Region(region))
        }
        DockNode::Group(group) => {
            let mut children: Vec<DockNode> = group
                .children
                .into_iter()
                .filter_map(normalize_node)
                .collect();
            match children.len() {
                0 => None,
                1 => children.pop(),
                _ => Some(DockNode::Group(DockGroup::new(
                    group.orientation,
                    children,
                ))),
            }
        }
    }
}

/// Remove `id` from a subtree, normalizing what remains.
fn remove_id_in(node: DockNode, id: &DockControlId) -> (Option<DockNode>, bool) {
    match node {
        DockNode::Region(mut region) => {
            let active_id = region.active_id().cloned();
            let before = region.items.len();
            region.items.retain(|item| item.id != *id);
            let hit = region.items.len() != before;
            if hit {
                // Keep the same tab frontmost when it survived the removal.
                region.active = active_id
                    .and_then(|a| region.ids().position(|known| *known == a))
                    .unwrap_or(0);
            }
            (normalize_node(DockNode::Region(region)), hit)
        }
        DockNode::Group(group) => {
            let mut hit = false;
            let children: Vec<DockNode> = group
                .children
                .into_iter()
                .filter_map(|child| {
                    let (child, child_hit) = remove_id_in(child, id);
                    hit |= child_hit;
                    child
                })
                .collect();
            (
                normalize_node(DockNode::Group(DockGroup::new(
                    group.orientation,
                    children,
                ))),
                hit,
            )
        }
    }
}
