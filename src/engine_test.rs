#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::consts::{AIR_RESISTANCE, GRAVITY};
use crate::entity::EntityKind;
use crate::geometry::Size;

// =============================================================
// Helpers
// =============================================================

struct FixedMeasurer {
    width: f64,
    height: f64,
}

impl MeasureGlyph for FixedMeasurer {
    fn measure(&self, _glyph: char, _font_size: f64, _font_weight: u16) -> Size {
        Size::new(self.width, self.height)
    }
}

fn measurer() -> FixedMeasurer {
    FixedMeasurer { width: 40.0, height: 70.0 }
}

fn core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 1.0);
    core
}

fn box_entity(x: f64, y: f64, width: f64, height: f64) -> Entity {
    Entity {
        id: Uuid::new_v4(),
        kind: EntityKind::Shape {
            points: vec![
                Point::new(-width / 2.0, -height / 2.0),
                Point::new(width / 2.0, -height / 2.0),
                Point::new(width / 2.0, height / 2.0),
                Point::new(-width / 2.0, height / 2.0),
            ],
        },
        x,
        y,
        rotation: 0.0,
        velocity: Velocity::zero(),
        width,
        height,
        is_dragging: false,
        is_static: false,
    }
}

fn push_box(core: &mut EngineCore, x: f64, y: f64, width: f64, height: f64) -> EntityId {
    let entity = box_entity(x, y, width, height);
    let id = entity.id;
    core.scene.push(entity);
    id
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn stroke() -> Vec<Point> {
    vec![
        pt(0.0, 0.0),
        pt(10.0, 0.0),
        pt(10.0, 20.0),
        pt(5.0, 25.0),
        pt(0.0, 20.0),
        pt(2.0, 10.0),
    ]
}

// =============================================================
// EngineCore: construction and defaults
// =============================================================

#[test]
fn core_new_has_empty_scene() {
    let core = EngineCore::new();
    assert!(core.scene.is_empty());
}

#[test]
fn core_new_has_no_drag() {
    let core = EngineCore::new();
    assert!(core.dragged().is_none());
    assert_eq!(core.drag, DragState::Idle);
}

#[test]
fn core_default_viewport_is_zero() {
    let core = EngineCore::new();
    assert_eq!(core.viewport_width, 0.0);
    assert_eq!(core.viewport_height, 0.0);
    assert_eq!(core.dpr, 1.0);
}

#[test]
fn core_starts_at_frame_zero() {
    let core = EngineCore::new();
    assert_eq!(core.frame, 0);
}

// =============================================================
// EngineCore: set_viewport
// =============================================================

#[test]
fn set_viewport_stores_dimensions() {
    let mut core = EngineCore::new();
    core.set_viewport(1920.0, 1080.0, 2.0);
    assert_eq!(core.viewport_width, 1920.0);
    assert_eq!(core.viewport_height, 1080.0);
    assert_eq!(core.dpr, 2.0);
}

#[test]
fn set_viewport_overwrites_previous() {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 1.0);
    core.set_viewport(1024.0, 768.0, 1.5);
    assert_eq!(core.viewport_width, 1024.0);
    assert_eq!(core.viewport_height, 768.0);
    assert_eq!(core.dpr, 1.5);
}

#[test]
fn set_viewport_does_not_touch_entities() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    core.set_viewport(320.0, 240.0, 3.0);
    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.x, 100.0);
    assert_eq!(entity.y, 100.0);
    assert_eq!(core.scene.len(), 1);
}

// =============================================================
// EngineCore: ingestion
// =============================================================

#[test]
fn add_text_returns_spawn_count() {
    let mut core = core();
    let count = core.add_text("AB", 100.0, 700, &measurer()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(core.scene.len(), 2);
}

#[test]
fn add_text_rejects_empty_input() {
    let mut core = core();
    assert_eq!(
        core.add_text("  ", 100.0, 700, &measurer()).unwrap_err(),
        IngestError::EmptyText
    );
    assert!(core.scene.is_empty());
}

#[test]
fn add_shape_returns_the_new_id() {
    let mut core = core();
    let id = core.add_shape(&stroke(), 1.0).unwrap();
    assert_eq!(core.scene.len(), 1);
    assert!(core.entity(&id).is_some());
}

#[test]
fn add_shape_rejects_short_strokes() {
    let mut core = core();
    let short: Vec<Point> = stroke().into_iter().take(4).collect();
    assert_eq!(
        core.add_shape(&short, 1.0).unwrap_err(),
        IngestError::DegenerateStroke
    );
    assert!(core.scene.is_empty());
}

// =============================================================
// EngineCore: clear
// =============================================================

#[test]
fn clear_empties_the_scene() {
    let mut core = core();
    push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    push_box(&mut core, 200.0, 100.0, 40.0, 40.0);
    core.clear();
    assert!(core.scene.is_empty());
}

#[test]
fn clear_drops_an_active_drag() {
    let mut core = core();
    push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    core.on_pointer_down(pt(100.0, 100.0));
    assert!(core.dragged().is_some());

    core.clear();
    assert!(core.dragged().is_none());

    // A stale pointer-up after the clear is a no-op.
    let actions = core.on_pointer_up();
    assert!(actions.is_empty());
}

#[test]
fn ids_are_fresh_after_clear() {
    let mut core = core();
    let first = core.add_shape(&stroke(), 1.0).unwrap();
    core.clear();
    let second = core.add_shape(&stroke(), 1.0).unwrap();
    assert_eq!(core.scene.len(), 1);
    assert_ne!(first, second);
}

// =============================================================
// EngineCore: step
// =============================================================

#[test]
fn step_advances_the_frame_counter() {
    let mut core = core();
    core.step();
    core.step();
    assert_eq!(core.frame, 2);
}

#[test]
fn step_integrates_free_entities() {
    let mut core = core();
    let id = push_box(&mut core, 400.0, 100.0, 40.0, 40.0);
    core.step();
    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.y, 100.0 + (0.0 + GRAVITY) * AIR_RESISTANCE);
}

#[test]
fn step_reports_floor_impacts_as_sound_actions() {
    let mut core = core();
    let id = push_box(&mut core, 400.0, 578.0, 40.0, 40.0);
    if let Some(entity) = core.scene.get_mut(&id) {
        entity.velocity.y = 10.0;
    }

    let actions = core.step();

    let expected_speed = (10.0 + GRAVITY) * AIR_RESISTANCE;
    assert_eq!(actions, vec![Action::ImpactSound { speed: expected_speed }]);
}

#[test]
fn quiet_steps_produce_no_actions() {
    let mut core = core();
    push_box(&mut core, 400.0, 100.0, 40.0, 40.0);
    assert!(core.step().is_empty());
}

// =============================================================
// EngineCore: pointer down
// =============================================================

#[test]
fn pointer_down_on_empty_space_stays_idle() {
    let mut core = core();
    push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    let actions = core.on_pointer_down(pt(500.0, 500.0));
    assert!(actions.is_empty());
    assert_eq!(core.drag, DragState::Idle);
}

#[test]
fn pointer_down_grabs_the_topmost_entity() {
    let mut core = core();
    let _bottom = push_box(&mut core, 100.0, 100.0, 50.0, 50.0);
    let top = push_box(&mut core, 110.0, 105.0, 50.0, 50.0);

    core.on_pointer_down(pt(105.0, 102.0));

    assert_eq!(core.dragged(), Some(top));
    let entity = core.entity(&top).unwrap();
    assert!(entity.is_dragging);
}

#[test]
fn pointer_down_zeroes_velocity() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    if let Some(entity) = core.scene.get_mut(&id) {
        entity.velocity = Velocity { x: 5.0, y: -3.0, rotation: 0.2 };
    }

    core.on_pointer_down(pt(100.0, 100.0));

    assert_eq!(core.entity(&id).unwrap().velocity, Velocity::zero());
}

#[test]
fn pointer_down_records_the_grab_offset() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(105.0, 98.0));

    assert_eq!(
        core.drag,
        DragState::Dragging { id, offset_x: 5.0, offset_y: -2.0 }
    );
}

#[test]
fn grabbing_a_pinned_entity_unpins_it() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    if let Some(entity) = core.scene.get_mut(&id) {
        entity.is_static = true;
    }

    core.on_pointer_down(pt(100.0, 100.0));

    let entity = core.entity(&id).unwrap();
    assert!(entity.is_dragging);
    assert!(!entity.is_static);
}

// =============================================================
// EngineCore: pointer move
// =============================================================

#[test]
fn pointer_move_without_drag_is_a_noop() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    core.on_pointer_move(pt(300.0, 300.0));
    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.x, 100.0);
    assert_eq!(entity.y, 100.0);
}

#[test]
fn pointer_move_keeps_the_grab_point_under_the_pointer() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(105.0, 98.0));
    core.on_pointer_move(pt(300.0, 200.0));

    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.x, 295.0);
    assert_eq!(entity.y, 202.0);
    assert_eq!(entity.velocity, Velocity::zero());
}

#[test]
fn dragged_entity_ignores_physics_while_held() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_move(pt(400.0, 50.0));
    for _ in 0..30 {
        core.step();
    }

    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.x, 400.0);
    assert_eq!(entity.y, 50.0);
}

// =============================================================
// EngineCore: pointer up
// =============================================================

#[test]
fn release_pins_the_entity_in_place() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_move(pt(250.0, 320.0));
    let actions = core.on_pointer_up();

    assert_eq!(actions, vec![Action::PlacementSound]);
    assert!(core.dragged().is_none());
    let entity = core.entity(&id).unwrap();
    assert!(!entity.is_dragging);
    assert!(entity.is_static);
    assert_eq!(entity.x, 250.0);
    assert_eq!(entity.y, 320.0);
}

#[test]
fn pinned_entity_survives_further_ticks_unmoved() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_move(pt(250.0, 320.0));
    core.on_pointer_up();
    for _ in 0..100 {
        core.step();
    }

    let entity = core.entity(&id).unwrap();
    assert_eq!(entity.x, 250.0);
    assert_eq!(entity.y, 320.0);
    assert_eq!(entity.velocity, Velocity::zero());
}

#[test]
fn pointer_up_without_drag_does_nothing() {
    let mut core = core();
    push_box(&mut core, 100.0, 100.0, 40.0, 40.0);
    assert!(core.on_pointer_up().is_empty());
}

#[test]
fn regrab_and_release_repins_at_the_new_spot() {
    let mut core = core();
    let id = push_box(&mut core, 100.0, 100.0, 40.0, 40.0);

    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_move(pt(200.0, 200.0));
    core.on_pointer_up();

    core.on_pointer_down(pt(200.0, 200.0));
    core.on_pointer_move(pt(50.0, 400.0));
    let actions = core.on_pointer_up();

    assert_eq!(actions, vec![Action::PlacementSound]);
    let entity = core.entity(&id).unwrap();
    assert!(entity.is_static);
    assert_eq!(entity.x, 50.0);
    assert_eq!(entity.y, 400.0);
}

// =============================================================
// EngineCore: scene snapshot
// =============================================================

#[test]
fn scene_json_describes_the_entities() {
    let mut core = core();
    core.add_shape(&stroke(), 1.0).unwrap();
    core.add_text("A", 64.0, 700, &measurer()).unwrap();

    let json = core.scene_json().unwrap();
    assert!(json.contains("\"type\":\"shape\""));
    assert!(json.contains("\"type\":\"text\""));
}

#[test]
fn scene_json_of_empty_scene_is_an_empty_array() {
    let core = core();
    assert_eq!(core.scene_json().unwrap(), "[]");
}
