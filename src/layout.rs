//! Two-way bridge between persisted structures and live containers.
//!
//! `apply` turns a structure into a live arrangement, resolving ids through
//! the registry and handlers; `capture` reads the live arrangement back into
//! a fresh structure. Restore is two-tier: a native geometry blob is tried
//! first as an all-or-nothing fast path, and the logical tree is the
//! fallback that always works. Neither direction ever fails outright; the
//! worst case is a layout with fewer panes than the structure named.

use crate::backend::{DockContainer, ResolvedNode};
use crate::control::{ControlHandle, DockControlId};
use crate::registry::ControlRegistry;
use crate::resolve::{ResolveHandler, Resolver};
use crate::structure::{DockArea, DockGroup, DockItem, DockNode, DockRegion, DockStructure};

/// Summary of one apply pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Ids resolved for placement, pre-order across areas.
    pub placed: Vec<DockControlId>,
    /// Ids dropped because no registry entry or handler could resolve them.
    pub dropped: Vec<DockControlId>,
    /// Whether the native fast path produced the final arrangement.
    pub used_native: bool,
    /// Whether a native blob was present but failed to restore.
    pub native_failed: bool,
}

impl ApplyReport {
    /// True when every id in the structure found a live control.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Lay a structure onto a container.
///
/// Pre-order per area: region ids resolve through `registry` then
/// `handlers`; failed ids are skipped, a region left empty is omitted, and a
/// group left with one child collapses. When `use_native` is set and the
/// structure carries a blob, the container gets one transactional restore
/// attempt first; on failure (or no blob) every area is laid out logically.
pub fn apply(
    structure: &DockStructure,
    registry: &mut ControlRegistry,
    container: &mut dyn DockContainer,
    handlers: Vec<&mut dyn ResolveHandler>,
    use_native: bool,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    // Resolution first, placement second: handlers may create panes the
    // native blob refers to, so every id is live before restore is tried.
    let mut resolved: Vec<(DockArea, Option<ResolvedNode>)> = Vec::with_capacity(4);
    {
        let mut resolver = Resolver::new(&mut *registry, &mut *container, handlers);
        for area in DockArea::ALL {
            let node = structure
                .area(area)
                .and_then(|node| resolve_node(node, &mut resolver, &mut report));
            resolved.push((area, node));
        }
    }

    // Placement implies visibility.
    for id in &report.placed {
        if let Some(control) = registry.get_mut(id) {
            control.visible = true;
        }
    }

    if use_native {
        if let Some(blob) = &structure.native_state {
            if container.restore_native(blob) {
                report.used_native = true;
                return report;
            }
            report.native_failed = true;
            tracing::debug!("native state restore failed; using logical placement");
        }
    }

    for (area, node) in resolved {
        container.apply_area(area, node.as_ref());
    }
    report
}

fn resolve_node(
    node: &DockNode,
    resolver: &mut Resolver<'_, '_>,
    report: &mut ApplyReport,
) -> Option<ResolvedNode> {
    match node {
        DockNode::Region(region) => {
            let active_id = region.active_id().cloned();
            let mut placed: Vec<(DockControlId, ControlHandle)> =
                Vec::with_capacity(region.items.len());
            for item in &region.items {
                match resolver.resolve(&item.id, item.memento.as_ref()) {
                    Some(handle) => {
                        report.placed.push(item.id.clone());
                        placed.push((item.id.clone(), handle));
                    }
                    None => report.dropped.push(item.id.clone()),
                }
            }
            if placed.is_empty() {
                return None;
            }
            // The previously active tab stays frontmost when it survived.
            let active = active_id
                .and_then(|id| placed.iter().position(|(pid, _)| *pid == id))
                .unwrap_or(0);
            Some(ResolvedNode::Region {
                panes: placed.into_iter().map(|(_, handle)| handle).collect(),
                active,
            })
        }
        DockNode::Group(group) => {
            let mut children: Vec<ResolvedNode> = group
                .children
                .iter()
                .filter_map(|child| resolve_node(child, resolver, report))
                .collect();
            match children.len() {
                0 => None,
                1 => children.pop(),
                _ => Some(ResolvedNode::Group {
                    orientation: group.orientation,
                    children,
                }),
            }
        }
    }
}

/// Read the live arrangement back into a fresh structure.
///
/// Handles that no longer map to a registered control are dropped; emptied
/// regions and single-child groups collapse. The container's native
/// serialized state rides along as an auxiliary blob.
pub fn capture(
    registry: &ControlRegistry,
    container: &dyn DockContainer,
    include_mementos: bool,
) -> DockStructure {
    let mut structure = DockStructure::new();
    for area in DockArea::ALL {
        let node = container
            .capture_area(area)
            .and_then(|node| capture_node(&node, registry, include_mementos));
        structure.set_area(area, node);
    }
    structure.normalize();
    structure.assert_invariants();
    match container.save_native() {
        Some(blob) => structure.with_native_state(blob),
        None => structure,
    }
}

fn capture_node(
    node: &ResolvedNode,
    registry: &ControlRegistry,
    include_mementos: bool,
) -> Option<DockNode> {
    match node {
        ResolvedNode::Region { panes, active } => {
            let active_handle = panes.get(*active).copied();
            let mut items = Vec::with_capacity(panes.len());
            let mut kept: Vec<ControlHandle> = Vec::with_capacity(panes.len());
            for &handle in panes {
                match registry.find_by_handle(handle) {
                    Some(control) => {
                        let mut item = DockItem::new(control.id.clone());
                        if include_mementos {
                            item.memento = control.memento.clone();
                        }
                        items.push(item);
                        kept.push(handle);
                    }
                    None => {
                        tracing::debug!(
                            handle = handle.0,
                            "unregistered pane dropped from capture"
                        );
                    }
                }
            }
            if items.is_empty() {
                return None;
            }
            let mut region = DockRegion::new(items);
            region.active = active_handle
                .and_then(|handle| kept.iter().position(|&k| k == handle))
                .unwrap_or(0);
            Some(DockNode::Region(region))
        }
        ResolvedNode::Group {
            orientation,
            children,
        } => {
            let mut nested: Vec<DockNode> = children
                .iter()
                .filter_map(|child| capture_node(child, registry, include_mementos))
                .collect();
            match nested.len() {
                0 => None,
                1 => nested.pop(),
                _ => Some(DockNode::Group(DockGroup::new(*orientation, nested))),
            }
        }
    }
}

/// Bring the first control of every region to the front, pre-order.
///
/// Used after a bulk layout change so the user never lands on a stale tab.
pub fn reset_regions(
    structure: &DockStructure,
    registry: &ControlRegistry,
    container: &mut dyn DockContainer,
) {
    for region in structure.regions() {
        let Some(item) = region.items.first() else {
            continue;
        };
        if let Some(control) = registry.get(&item.id, false) {
            container.activate(control.handle);
        }
    }
}
