#![allow(clippy::float_cmp)]

use super::*;
use crate::hit::Shape;
use crate::table::Section;

// =============================================================
// Helpers
// =============================================================

fn make_table(id: TableId, number: &str, section: Section, capacity: u32, x: i32, y: i32) -> Table {
    Table {
        id,
        table_number: number.to_owned(),
        capacity,
        section,
        status: "available".to_owned(),
        coordinates_x: x,
        coordinates_y: y,
    }
}

fn ok_response(tables: Vec<Table>, guests: Option<u32>) -> Result<AvailabilityResponse, LoadError> {
    Ok(AvailabilityResponse { success: true, available_tables: tables, guests, message: None })
}

fn query() -> AvailabilityQuery {
    AvailabilityQuery::new("2024-07-01", "19:00", 4)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn core_with_viewport() -> EngineCore {
    let mut core = EngineCore::new(TableMapConfig::default());
    core.set_viewport(1000.0, 600.0, 1.0);
    core
}

fn loaded(tables: Vec<Table>) -> EngineCore {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(query());
    core.finish_load(&ticket, ok_response(tables, Some(4)));
    core
}

fn selection_action(actions: &[Action]) -> Option<Option<SelectionSummary>> {
    actions.iter().find_map(|a| match a {
        Action::SelectionChanged(s) => Some(s.clone()),
        _ => None,
    })
}

fn hidden_field(actions: &[Action]) -> Option<String> {
    selection_action(actions).map(|s| s.map(|s| s.field_value()).unwrap_or_default())
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_core_has_default_view_state() {
    let core = EngineCore::default();
    assert_eq!(core.camera.zoom, 1.0);
    assert_eq!(core.camera.pan_x, 0.0);
    assert_eq!(core.camera.pan_y, 0.0);
    assert!(core.selection().is_none());
    assert!(!core.input.is_dragging());
    assert_eq!(core.status(), MapStatus::Idle);
    assert!(core.tables.is_empty());
}

#[test]
fn new_core_takes_zoom_limits_from_config() {
    let config = TableMapConfig { min_zoom: 0.25, max_zoom: 5.0, ..TableMapConfig::default() };
    let core = EngineCore::new(config);
    assert_eq!(core.camera.min_zoom, 0.25);
    assert_eq!(core.camera.max_zoom, 5.0);
}

// =============================================================
// begin_load / finish_load
// =============================================================

#[test]
fn begin_load_shows_loading_and_clears_selection() {
    let mut core = loaded(vec![make_table(1, "A1", Section::Indoor, 2, 100, 100)]);
    core.select_at(pt(100.0, 100.0));
    assert_eq!(core.selection(), Some(1));

    let (ticket, actions) = core.begin_load(query());
    assert_eq!(ticket.seq, 2);
    assert_eq!(core.status(), MapStatus::Loading);
    assert!(core.selection().is_none());
    assert_eq!(
        actions,
        vec![Action::SetLoading(true), Action::HideMessage, Action::SelectionChanged(None)]
    );
}

#[test]
fn finish_load_non_empty_renders_and_publishes_summary() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(query());
    let actions = core.finish_load(
        &ticket,
        ok_response(
            vec![
                make_table(1, "A1", Section::Indoor, 2, 100, 100),
                make_table(2, "P1", Section::Outdoor, 4, 800, 100),
            ],
            Some(4),
        ),
    );

    assert_eq!(core.status(), MapStatus::Ready);
    assert_eq!(core.tables.len(), 2);
    assert_eq!(actions[0], Action::SetLoading(false));
    assert!(actions.contains(&Action::HideMessage));
    assert!(actions.contains(&Action::SetCanvasVisible(true)));
    assert!(actions.contains(&Action::SetAvailability(Some(panel::availability_html(2, 4)))));
    assert!(actions.contains(&Action::RenderNeeded));
}

#[test]
fn finish_load_summary_falls_back_to_query_guests() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(AvailabilityQuery::new("2024-07-01", "19:00", 3));
    let actions = core.finish_load(&ticket, ok_response(vec![make_table(1, "A1", Section::Indoor, 4, 1, 1)], None));
    assert!(actions.contains(&Action::SetAvailability(Some(panel::availability_html(1, 3)))));
}

#[test]
fn finish_load_empty_shows_no_tables_message() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(query());
    let actions = core.finish_load(&ticket, ok_response(Vec::new(), Some(4)));

    assert_eq!(core.status(), MapStatus::Empty);
    assert_eq!(actions[0], Action::SetLoading(false));
    assert!(actions.contains(&Action::SetCanvasVisible(false)));
    assert!(actions.contains(&Action::ShowMessage(Notice::NoTables(core.config.no_tables_message.clone()))));
}

#[test]
fn finish_load_rejected_shows_server_message() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(query());
    let result = Ok(AvailabilityResponse {
        success: false,
        available_tables: Vec::new(),
        guests: None,
        message: Some("Restaurant is closed on Mondays".to_owned()),
    });
    let actions = core.finish_load(&ticket, result);

    assert_eq!(core.status(), MapStatus::Failed);
    assert_eq!(actions[0], Action::SetLoading(false));
    assert!(actions.contains(&Action::ShowMessage(Notice::Error("Restaurant is closed on Mondays".to_owned()))));
}

#[test]
fn finish_load_transport_error_shows_fallback() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(query());
    let actions = core.finish_load(&ticket, Err(LoadError::Transport("connection reset".to_owned())));

    let fallback = core.config.fallback_error_message.clone();
    assert!(actions.contains(&Action::ShowMessage(Notice::Error(fallback))));
    assert!(actions.contains(&Action::SetAvailability(None)));
}

#[test]
fn loading_is_cleared_before_any_message() {
    let mut core = core_with_viewport();
    for result in [
        ok_response(Vec::new(), None),
        Err(LoadError::Transport("boom".to_owned())),
        Err(LoadError::Rejected { message: None }),
    ] {
        let (ticket, _) = core.begin_load(query());
        let actions = core.finish_load(&ticket, result);
        let loading_off = actions.iter().position(|a| *a == Action::SetLoading(false));
        let message = actions.iter().position(|a| matches!(a, Action::ShowMessage(_)));
        assert!(loading_off.is_some());
        assert!(loading_off < message);
    }
}

#[test]
fn failed_load_drops_previous_tables() {
    let mut core = loaded(vec![make_table(1, "A1", Section::Indoor, 2, 100, 100)]);
    let (ticket, _) = core.begin_load(query());
    core.finish_load(&ticket, Err(LoadError::Transport("timeout".to_owned())));
    assert!(core.tables.is_empty());
    core.select_at(pt(100.0, 100.0));
    assert!(core.selection().is_none());
}

// =============================================================
// Replace, not merge
// =============================================================

#[test]
fn second_load_replaces_first() {
    let mut core = loaded(vec![
        make_table(1, "T1", Section::Indoor, 2, 100, 100),
        make_table(2, "T2", Section::Indoor, 2, 300, 100),
    ]);
    let (ticket, _) = core.begin_load(query());
    core.finish_load(&ticket, ok_response(vec![make_table(3, "T3", Section::Indoor, 2, 500, 100)], Some(4)));

    let ids: Vec<TableId> = core.scene().tables.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3]);

    core.select_at(pt(100.0, 100.0));
    assert!(core.selection().is_none());
    core.select_at(pt(300.0, 100.0));
    assert!(core.selection().is_none());
    core.select_at(pt(500.0, 100.0));
    assert_eq!(core.selection(), Some(3));
}

#[test]
fn stale_response_is_discarded() {
    let mut core = core_with_viewport();
    let (first, _) = core.begin_load(query());
    let (second, _) = core.begin_load(AvailabilityQuery::new("2024-07-02", "20:00", 2));

    core.finish_load(&second, ok_response(vec![make_table(3, "T3", Section::Indoor, 2, 500, 100)], Some(2)));
    let late = core.finish_load(
        &first,
        ok_response(
            vec![
                make_table(1, "T1", Section::Indoor, 2, 100, 100),
                make_table(2, "T2", Section::Indoor, 2, 300, 100),
            ],
            Some(4),
        ),
    );

    assert!(late.is_empty());
    assert_eq!(core.tables.len(), 1);
    assert!(core.tables.get(3).is_some());
    assert_eq!(core.status(), MapStatus::Ready);
}

#[test]
fn stale_failure_does_not_hide_newer_tables() {
    let mut core = core_with_viewport();
    let (first, _) = core.begin_load(query());
    let (second, _) = core.begin_load(query());
    core.finish_load(&second, ok_response(vec![make_table(3, "T3", Section::Indoor, 2, 500, 100)], Some(4)));
    let late = core.finish_load(&first, Err(LoadError::Transport("slow".to_owned())));
    assert!(late.is_empty());
    assert_eq!(core.status(), MapStatus::Ready);
    assert_eq!(core.tables.len(), 1);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn selecting_another_table_clears_the_first() {
    let mut core = loaded(vec![
        make_table(1, "A", Section::Indoor, 2, 100, 100),
        make_table(2, "B", Section::Indoor, 2, 300, 100),
    ]);
    core.select_at(pt(100.0, 100.0));
    core.select_at(pt(300.0, 100.0));
    assert_eq!(core.selection(), Some(2));

    let selected: Vec<TableId> = core.scene().tables.iter().filter(|g| g.selected).map(|g| g.id).collect();
    assert_eq!(selected, vec![2]);
}

#[test]
fn click_on_empty_space_deselects_and_empties_field() {
    let mut core = loaded(vec![make_table(1, "A", Section::Indoor, 2, 100, 100)]);
    let actions = core.select_at(pt(100.0, 100.0));
    assert_eq!(hidden_field(&actions).as_deref(), Some("1"));

    let actions = core.select_at(pt(600.0, 500.0));
    assert!(core.selection().is_none());
    assert_eq!(hidden_field(&actions).as_deref(), Some(""));
    assert!(actions.contains(&Action::RenderNeeded));
}

#[test]
fn clicking_selected_table_again_keeps_it_selected() {
    let mut core = loaded(vec![make_table(1, "A", Section::Outdoor, 4, 800, 300)]);
    core.select_at(pt(800.0, 300.0));
    let actions = core.select_at(pt(810.0, 305.0));
    assert_eq!(core.selection(), Some(1));
    assert_eq!(hidden_field(&actions).as_deref(), Some("1"));
}

#[test]
fn selected_table_returns_full_record() {
    let mut core = loaded(vec![make_table(4, "Q4", Section::Outdoor, 6, 800, 300)]);
    core.select_at(pt(800.0, 300.0));
    let table = core.selected_table().unwrap();
    assert_eq!(table.table_number, "Q4");
}

#[test]
fn outdoor_table_misses_on_square_corner() {
    let mut core = loaded(vec![make_table(1, "P", Section::Outdoor, 6, 800, 300)]);
    core.select_at(pt(838.0, 338.0));
    assert!(core.selection().is_none());
}

#[test]
fn indoor_table_hits_on_square_corner() {
    let mut core = loaded(vec![make_table(1, "I", Section::Indoor, 6, 200, 300)]);
    core.select_at(pt(238.0, 338.0));
    assert_eq!(core.selection(), Some(1));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn repeated_zoom_in_never_exceeds_max() {
    let mut core = core_with_viewport();
    for _ in 0..50 {
        core.zoom(pt(400.0, 300.0), ZoomDirection::In);
    }
    assert!(core.camera.zoom <= 3.0);
    assert!(core.camera.zoom > 3.0 / 1.1);
}

#[test]
fn repeated_zoom_out_never_drops_below_min() {
    let mut core = core_with_viewport();
    for _ in 0..50 {
        core.zoom(pt(400.0, 300.0), ZoomDirection::Out);
    }
    assert!(core.camera.zoom >= 0.5);
    assert!(core.camera.zoom < 0.5 / 0.9);
}

#[test]
fn rejected_zoom_returns_no_actions_and_keeps_pan() {
    let mut core = core_with_viewport();
    core.camera.zoom = 2.95;
    core.camera.pan_x = 12.0;
    let actions = core.zoom(pt(400.0, 300.0), ZoomDirection::In);
    assert!(actions.is_empty());
    assert_eq!(core.camera.zoom, 2.95);
    assert_eq!(core.camera.pan_x, 12.0);
}

#[test]
fn zoom_keeps_point_under_pointer_fixed() {
    let mut core = loaded(vec![make_table(1, "A", Section::Indoor, 2, 250, 150)]);
    core.pan_by(37.0, -12.0);
    let pivot = pt(321.0, 187.0);
    let under = core.camera.screen_to_world(pivot);

    assert_eq!(core.zoom(pivot, ZoomDirection::In), vec![Action::RenderNeeded]);
    let after = core.camera.world_to_screen(under);
    assert!((after.x - pivot.x).abs() < 1e-9);
    assert!((after.y - pivot.y).abs() < 1e-9);

    core.zoom(pivot, ZoomDirection::Out);
    let after = core.camera.world_to_screen(under);
    assert!((after.x - pivot.x).abs() < 1e-9);
    assert!((after.y - pivot.y).abs() < 1e-9);
}

#[test]
fn wheel_direction_picks_zoom_step() {
    let mut core = core_with_viewport();
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -100.0 });
    assert!((core.camera.zoom - 1.1).abs() < 1e-12);
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 100.0 });
    assert!((core.camera.zoom - 0.99).abs() < 1e-12);
}

#[test]
fn zoom_moves_tables_but_not_their_radius() {
    let mut core = loaded(vec![make_table(1, "A", Section::Indoor, 2, 100, 100)]);
    core.zoom(pt(0.0, 0.0), ZoomDirection::In);
    let glyph = &core.scene().tables[0];
    assert!((glyph.footprint.center.x - 110.0).abs() < 1e-9);
    assert_eq!(glyph.footprint.radius, 20.0);
}

// =============================================================
// Pan gesture
// =============================================================

#[test]
fn drag_accumulates_pan_and_requests_render() {
    let mut core = core_with_viewport();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    assert!(core.input.is_dragging());
    assert_eq!(core.on_pointer_move(pt(110.0, 95.0)), vec![Action::RenderNeeded]);
    core.on_pointer_move(pt(130.0, 90.0));
    core.on_pointer_up(pt(130.0, 90.0));
    assert_eq!(core.camera.pan_x, 30.0);
    assert_eq!(core.camera.pan_y, -10.0);
    assert!(!core.input.is_dragging());
}

#[test]
fn move_without_press_does_nothing() {
    let mut core = core_with_viewport();
    assert!(core.on_pointer_move(pt(50.0, 50.0)).is_empty());
    assert_eq!(core.camera.pan_x, 0.0);
}

#[test]
fn secondary_button_does_not_pan() {
    let mut core = core_with_viewport();
    core.on_pointer_down(pt(100.0, 100.0), Button::Secondary);
    core.on_pointer_move(pt(200.0, 200.0));
    assert_eq!(core.camera.pan_x, 0.0);
}

#[test]
fn pointer_leave_ends_drag() {
    let mut core = core_with_viewport();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    core.on_pointer_move(pt(120.0, 100.0));
    core.on_pointer_leave();
    core.on_pointer_move(pt(300.0, 300.0));
    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.camera.pan_y, 0.0);
}

#[test]
fn click_after_drag_does_not_select() {
    let mut core = loaded(vec![make_table(1, "A", Section::Indoor, 6, 200, 300)]);
    core.on_pointer_down(pt(150.0, 300.0), Button::Primary);
    core.on_pointer_move(pt(200.0, 300.0));
    core.on_pointer_up(pt(200.0, 300.0));
    // Table moved 50px right; its center is now at 250.
    assert!(core.on_click(pt(250.0, 300.0)).is_empty());
    assert!(core.selection().is_none());

    // The suppression lasts for one click only.
    core.on_click(pt(250.0, 300.0));
    assert_eq!(core.selection(), Some(1));
}

#[test]
fn small_jitter_still_counts_as_click() {
    let mut core = loaded(vec![make_table(1, "A", Section::Indoor, 6, 200, 300)]);
    core.on_pointer_down(pt(200.0, 300.0), Button::Primary);
    core.on_pointer_move(pt(201.0, 301.0));
    core.on_pointer_up(pt(201.0, 301.0));
    core.on_click(pt(201.0, 301.0));
    assert_eq!(core.selection(), Some(1));
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn set_viewport_clamps_and_requests_render() {
    let mut core = EngineCore::default();
    let actions = core.set_viewport(0.0, 480.0, 0.0);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.viewport.width, 1.0);
    assert_eq!(core.viewport.height, 480.0);
    assert_eq!(core.viewport.dpr, 1.0);
}

#[test]
fn resize_moves_zone_divider() {
    let mut core = core_with_viewport();
    assert_eq!(core.scene().divider_x, 700.0);
    core.set_viewport(500.0, 600.0, 2.0);
    assert_eq!(core.scene().divider_x, 350.0);
}

// =============================================================
// End to end
// =============================================================

#[test]
fn reservation_flow_select_then_deselect() {
    let mut core = core_with_viewport();
    let (ticket, _) = core.begin_load(AvailabilityQuery::new("2024-07-01", "19:00", 4));
    let body = r#"{"success":true,"availableTables":[{"id":7,"table_number":"B3","capacity":6,"section":"indoor","coordinates_x":200,"coordinates_y":300}],"guests":4}"#;
    core.finish_load(&ticket, AvailabilityResponse::from_json(body));

    let scene = core.scene();
    assert_eq!(scene.tables.len(), 1);
    let glyph = &scene.tables[0];
    assert_eq!(glyph.label, "B3 (6)");
    assert_eq!(glyph.footprint.shape, Shape::Square);
    assert_eq!(glyph.fill, "#ffffff");

    let actions = core.on_click(pt(200.0, 300.0));
    assert_eq!(hidden_field(&actions).as_deref(), Some("7"));
    assert_eq!(core.scene().tables[0].fill, core.config.palette.selected_fill);

    let actions = core.on_click(pt(400.0, 300.0));
    assert_eq!(hidden_field(&actions).as_deref(), Some(""));
    assert_eq!(core.scene().tables[0].fill, "#ffffff");
}
