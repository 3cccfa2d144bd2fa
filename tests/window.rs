//! Window facade tests: lifecycle flows, events, session save and restore

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{region_ids, regions_of, test_window, window_with_controls, CreatorHandler};
use drydock::persist::LayoutStore;
use drydock::structure::{AreaSpec, DockArea, DockStructure};
use drydock::DockEvent;

// ============================================================================
// Control lifecycle through the facade
// ============================================================================

#[test]
fn test_open_close_cycle_keeps_other_areas_intact() {
    let mut window = window_with_controls(&[
        ("editor", DockArea::Left),
        ("outline", DockArea::Right),
        ("console", DockArea::Bottom),
    ]);

    assert!(window.close_control(&"outline".into()));

    let structure = window.get_structure();
    assert_eq!(region_ids(&structure, DockArea::Left), ["editor"]);
    assert!(structure.area(DockArea::Right).is_none());
    assert_eq!(region_ids(&structure, DockArea::Bottom), ["console"]);
}

#[test]
fn test_hide_then_show_round_trips_placement() {
    let mut window = window_with_controls(&[
        ("editor", DockArea::Left),
        ("console", DockArea::Left),
    ]);

    window.hide_control(&"console".into());
    assert_eq!(region_ids(&window.get_structure(), DockArea::Left), ["editor"]);
    assert_eq!(window.get_controls(true).len(), 1);

    window.show_control(&"console".into());
    assert_eq!(window.get_controls(true).len(), 2);
    assert!(window.get_structure().contains_id(&"console".into()));
}

#[test]
fn test_activate_control_reorders_front_tab() {
    let mut window = window_with_controls(&[
        ("a", DockArea::Left),
        ("b", DockArea::Left),
        ("c", DockArea::Left),
    ]);

    assert!(window.activate_control(&"a".into()));
    let structure = window.get_structure();
    let node = structure.area(DockArea::Left).unwrap();
    let region = drydock::structure::find_regions(node)[0];
    assert_eq!(region.active_id().map(|id| id.as_str()), Some("a"));
}

// ============================================================================
// Structure application
// ============================================================================

#[test]
fn test_set_structure_rearranges_live_window() {
    let mut window = window_with_controls(&[
        ("a", DockArea::Left),
        ("b", DockArea::Left),
        ("c", DockArea::Left),
    ]);

    // Split "c" off into its own region below the a/b tabs.
    let spec = AreaSpec::group(vec![AreaSpec::tabs(["a", "b"]), AreaSpec::tabs(["c"])]);
    let structure = window.build_area(DockArea::Left, &spec).unwrap();
    let report = window.set_structure(&structure, None);

    assert!(report.is_clean());
    assert_eq!(
        regions_of(&window.get_structure(), DockArea::Left),
        [vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
    );
}

#[test]
fn test_session_restore_recreates_closed_controls() {
    let mut window = window_with_controls(&[
        ("editor", DockArea::Left),
        ("notes", DockArea::Left),
    ]);
    let saved = window.get_structure();

    window.close_control(&"notes".into());
    assert_eq!(region_ids(&window.get_structure(), DockArea::Left), ["editor"]);

    let mut handler = CreatorHandler::new();
    let report = window.set_structure(&saved, Some(&mut handler));

    assert!(report.is_clean());
    assert_eq!(handler.calls, 1);
    assert_eq!(
        region_ids(&window.get_structure(), DockArea::Left),
        ["editor", "notes"]
    );
}

#[test]
fn test_cold_start_restore_via_standing_handler() {
    // First session: arrange and capture.
    let mut first = window_with_controls(&[
        ("editor", DockArea::Left),
        ("outline", DockArea::Right),
        ("console", DockArea::Bottom),
    ]);
    let saved_json = serde_json::to_string(&first.get_structure()).unwrap();

    // Second session: nothing registered, everything comes from the handler.
    let mut second = test_window();
    second.add_handler(Box::new(CreatorHandler::new()));
    let saved: DockStructure = serde_json::from_str(&saved_json).unwrap();
    let report = second.apply(&saved);

    assert!(report.is_clean());
    assert_eq!(report.placed.len(), 3);
    let structure = second.get_structure();
    assert_eq!(region_ids(&structure, DockArea::Left), ["editor"]);
    assert_eq!(region_ids(&structure, DockArea::Right), ["outline"]);
    assert_eq!(region_ids(&structure, DockArea::Bottom), ["console"]);
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_structure_applied_event_reports_counts() {
    let mut window = window_with_controls(&[("a", DockArea::Left)]);
    let seen: Rc<RefCell<Vec<(usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    window.subscribe(move |event| {
        if let DockEvent::StructureApplied { placed, dropped, .. } = event {
            sink.borrow_mut().push((*placed, *dropped));
        }
    });

    let structure =
        DockStructure::build(DockArea::Left, &AreaSpec::tabs(["a", "missing"])).unwrap();
    window.set_structure(&structure, None);

    assert_eq!(*seen.borrow(), [(1, 1)]);
}

// ============================================================================
// Saved layouts through the window
// ============================================================================

#[test]
fn test_named_layouts_switch_back_and_forth() {
    let mut window = window_with_controls(&[
        ("editor", DockArea::Left),
        ("console", DockArea::Bottom),
    ]);
    let mut store = LayoutStore::default();
    window.save_layout(&mut store, "coding");

    // Rearrange into a review layout and save that too.
    window.hide_control(&"console".into());
    window.save_layout(&mut store, "review");
    assert_eq!(store.names(), vec!["review", "coding"]);

    let report = window.apply_layout(&store, "coding").unwrap();
    assert!(report.is_clean());
    assert_eq!(region_ids(&window.get_structure(), DockArea::Bottom), ["console"]);

    window.apply_layout(&store, "review").unwrap();
    assert!(window.get_structure().area(DockArea::Bottom).is_none());
}
