use uuid::Uuid;

use super::*;

#[test]
fn default_state_is_idle() {
    assert_eq!(DragState::default(), DragState::Idle);
}

#[test]
fn idle_drags_nothing() {
    assert!(DragState::Idle.dragged().is_none());
}

#[test]
fn dragging_reports_the_held_id() {
    let id = Uuid::new_v4();
    let state = DragState::Dragging { id, offset_x: 5.0, offset_y: -3.0 };
    assert_eq!(state.dragged(), Some(id));
}

#[test]
fn states_compare_by_id_and_offset() {
    let id = Uuid::new_v4();
    let a = DragState::Dragging { id, offset_x: 1.0, offset_y: 2.0 };
    let b = DragState::Dragging { id, offset_x: 1.0, offset_y: 2.0 };
    let c = DragState::Dragging { id, offset_x: 0.0, offset_y: 2.0 };
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, DragState::Idle);
}
