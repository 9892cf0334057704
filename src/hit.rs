//! Hit-testing against the entity list.
//!
//! Deliberately an axis-aligned bounding-box test, even for rotated shapes:
//! the loose box is easier to grab than an exact polygon test would be. The
//! scan runs from the most recently added entity down, so the entity drawn
//! on top is the one that wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::entity::{Entity, EntityId};
use crate::geometry::Point;

/// Return the topmost entity whose bounding box contains `point`.
#[must_use]
pub fn hit_test(point: Point, entities: &[Entity]) -> Option<EntityId> {
    entities
        .iter()
        .rev()
        .find(|entity| {
            (point.x - entity.x).abs() < entity.half_width()
                && (point.y - entity.y).abs() < entity.half_height()
        })
        .map(|entity| entity.id)
}
