//! Structure tree construction, query, and round-trip tests

mod common;

use common::{region_ids, regions_of};
use drydock::structure::{find_regions, AreaSpec, DockArea, DockNode, DockStructure, Orientation};
use drydock::MalformedStructure;

// ============================================================================
// Building from descriptions
// ============================================================================

#[test]
fn test_bare_id_builds_single_region() {
    let structure = DockStructure::build(DockArea::Right, &AreaSpec::id("inspector")).unwrap();
    assert_eq!(regions_of(&structure, DockArea::Right), [["inspector"]]);
}

#[test]
fn test_flat_list_builds_tabbed_region() {
    let spec = AreaSpec::tabs(["console", "log", "terminal"]);
    let structure = DockStructure::build(DockArea::Bottom, &spec).unwrap();
    assert_eq!(
        regions_of(&structure, DockArea::Bottom),
        [["console", "log", "terminal"]]
    );
}

#[test]
fn test_nested_lists_build_group_of_regions() {
    let spec = AreaSpec::group(vec![
        AreaSpec::tabs(["editor", "preview"]),
        AreaSpec::tabs(["console"]),
    ]);
    let structure = DockStructure::build(DockArea::Left, &spec).unwrap();

    assert_eq!(
        regions_of(&structure, DockArea::Left),
        [vec!["editor".to_string(), "preview".to_string()], vec!["console".to_string()]]
    );
    let Some(DockNode::Group(group)) = structure.area(DockArea::Left) else {
        panic!("expected group at left");
    };
    assert_eq!(group.orientation, DockArea::Left.orientation());
}

#[test]
fn test_nested_group_orientation_alternates() {
    let spec = AreaSpec::group(vec![
        AreaSpec::tabs(["a"]),
        AreaSpec::group(vec![AreaSpec::tabs(["b"]), AreaSpec::tabs(["c"])]),
    ]);
    let structure = DockStructure::build(DockArea::Left, &spec).unwrap();

    let Some(DockNode::Group(outer)) = structure.area(DockArea::Left) else {
        panic!("expected outer group");
    };
    assert_eq!(outer.orientation, Orientation::Vertical);
    let DockNode::Group(inner) = &outer.children[1] else {
        panic!("expected inner group");
    };
    assert_eq!(inner.orientation, Orientation::Horizontal);
}

#[test]
fn test_duplicate_id_fails_fast() {
    let spec = AreaSpec::group(vec![
        AreaSpec::tabs(["console", "log"]),
        AreaSpec::tabs(["console"]),
    ]);
    let err = DockStructure::build(DockArea::Bottom, &spec).unwrap_err();
    assert_eq!(err, MalformedStructure::duplicate_id("console"));
}

#[test]
fn test_blank_id_fails_fast() {
    let err = DockStructure::build(DockArea::Top, &AreaSpec::tabs(["ok", "  "])).unwrap_err();
    assert!(matches!(err, MalformedStructure::BlankId { area: DockArea::Top }));
}

#[test]
fn test_empty_description_fails_fast() {
    let err = DockStructure::build(DockArea::Left, &AreaSpec::group(Vec::new())).unwrap_err();
    assert!(matches!(err, MalformedStructure::EmptyArea { area: DockArea::Left }));
}

// ============================================================================
// Perspective-file format
// ============================================================================

#[test]
fn test_area_spec_parses_bare_string() {
    let spec: AreaSpec = serde_json::from_str(r#""console""#).unwrap();
    let structure = DockStructure::build(DockArea::Bottom, &spec).unwrap();
    assert_eq!(region_ids(&structure, DockArea::Bottom), ["console"]);
}

#[test]
fn test_area_spec_parses_nested_lists() {
    let spec: AreaSpec =
        serde_json::from_str(r#"[["editor", "preview"], ["console"]]"#).unwrap();
    let structure = DockStructure::build(DockArea::Left, &spec).unwrap();
    assert_eq!(
        regions_of(&structure, DockArea::Left),
        [vec!["editor".to_string(), "preview".to_string()], vec!["console".to_string()]]
    );
}

#[test]
fn test_from_area_rebuilds_identical_logical_tree() {
    let spec = AreaSpec::group(vec![
        AreaSpec::tabs(["a", "b"]),
        AreaSpec::group(vec![AreaSpec::tabs(["c"]), AreaSpec::tabs(["d", "e"])]),
    ]);
    let structure = DockStructure::build(DockArea::Left, &spec).unwrap();

    let described = AreaSpec::from_area(&structure, DockArea::Left).unwrap();
    let rebuilt = DockStructure::build(DockArea::Left, &described).unwrap();
    assert_eq!(rebuilt.area(DockArea::Left), structure.area(DockArea::Left));
}

#[test]
fn test_from_area_keeps_single_member_regions_distinct_from_tabs() {
    // A split of two single-pane regions must not collapse into one tab strip.
    let split = AreaSpec::group(vec![AreaSpec::tabs(["a"]), AreaSpec::tabs(["b"])]);
    let tabbed = AreaSpec::tabs(["a", "b"]);

    let split_structure = DockStructure::build(DockArea::Left, &split).unwrap();
    let tabbed_structure = DockStructure::build(DockArea::Left, &tabbed).unwrap();
    assert_ne!(
        split_structure.area(DockArea::Left),
        tabbed_structure.area(DockArea::Left)
    );

    let described = AreaSpec::from_area(&split_structure, DockArea::Left).unwrap();
    let rebuilt = DockStructure::build(DockArea::Left, &described).unwrap();
    assert_eq!(
        rebuilt.area(DockArea::Left),
        split_structure.area(DockArea::Left)
    );
}

#[test]
fn test_structure_serde_round_trip() {
    let left = DockStructure::build(
        DockArea::Left,
        &AreaSpec::group(vec![AreaSpec::tabs(["a", "b"]), AreaSpec::tabs(["c"])]),
    )
    .unwrap();
    let bottom = DockStructure::build(DockArea::Bottom, &AreaSpec::id("console")).unwrap();
    let structure = left.merge(bottom).unwrap();

    let json = serde_json::to_string(&structure).unwrap();
    let parsed: DockStructure = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, structure);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_find_regions_pre_order_and_pure() {
    // Three nested groups holding five regions.
    let spec = AreaSpec::group(vec![
        AreaSpec::tabs(["a"]),
        AreaSpec::group(vec![
            AreaSpec::tabs(["c"]),
            AreaSpec::group(vec![AreaSpec::tabs(["d"]), AreaSpec::tabs(["e"])]),
        ]),
        AreaSpec::tabs(["g"]),
    ]);
    let structure = DockStructure::build(DockArea::Left, &spec).unwrap();
    let node = structure.area(DockArea::Left).unwrap();

    let first: Vec<String> = find_regions(node)
        .into_iter()
        .flat_map(|region| region.ids().map(|id| id.to_string()))
        .collect();
    assert_eq!(first, ["a", "c", "d", "e", "g"]);
    assert_eq!(find_regions(node).len(), 5);

    // Pure: a second traversal sees the identical sequence.
    let second: Vec<String> = find_regions(node)
        .into_iter()
        .flat_map(|region| region.ids().map(|id| id.to_string()))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_area_of_and_contains() {
    let left = DockStructure::build(DockArea::Left, &AreaSpec::tabs(["a", "b"])).unwrap();
    let right = DockStructure::build(DockArea::Right, &AreaSpec::id("c")).unwrap();
    let structure = left.merge(right).unwrap();

    assert_eq!(structure.area_of(&"c".into()), Some(DockArea::Right));
    assert_eq!(structure.area_of(&"a".into()), Some(DockArea::Left));
    assert_eq!(structure.area_of(&"missing".into()), None);
    assert!(structure.contains_id(&"b".into()));
    assert_eq!(structure.region_count(), 2);
}

#[test]
fn test_merge_rejects_duplicate_across_areas() {
    let left = DockStructure::build(DockArea::Left, &AreaSpec::id("shared")).unwrap();
    let right = DockStructure::build(DockArea::Right, &AreaSpec::id("shared")).unwrap();

    let err = left.merge(right).unwrap_err();
    assert_eq!(err, MalformedStructure::duplicate_id("shared"));
}

#[test]
fn test_remove_id_collapses_emptied_region() {
    let spec = AreaSpec::group(vec![AreaSpec::tabs(["a"]), AreaSpec::tabs(["b", "c"])]);
    let mut structure = DockStructure::build(DockArea::Left, &spec).unwrap();

    assert!(structure.remove_id(&"a".into()));
    // The group collapsed around the surviving region.
    assert_eq!(regions_of(&structure, DockArea::Left), [["b", "c"]]);
    assert!(!structure.remove_id(&"a".into()));
}
