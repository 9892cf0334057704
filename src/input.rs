//! Input model: the pointer drag gesture state machine.
//!
//! A single pointer drives the playground, so the state machine has exactly
//! two states. The grab offset recorded at pointer-down keeps the grab point
//! fixed under the pointer for the whole drag, however the entity was hit.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::entity::EntityId;

/// Active pointer gesture. At most one entity is dragged at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// An entity is held by the pointer.
    Dragging {
        /// Id of the entity being dragged.
        id: EntityId,
        /// Pointer x minus entity center x at grab time.
        offset_x: f64,
        /// Pointer y minus entity center y at grab time.
        offset_y: f64,
    },
}

impl DragState {
    /// Id of the dragged entity, if a drag is in progress.
    #[must_use]
    pub fn dragged(&self) -> Option<EntityId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } => Some(*id),
        }
    }
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}
