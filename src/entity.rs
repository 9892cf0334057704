//! Entity model: falling glyphs, drawn shapes, and the scene that owns them.
//!
//! `Scene` keeps entities in insertion order, and that order is load-bearing
//! twice over: the renderer paints from it bottom-to-top (later entries draw
//! on top) and the hit test scans it in reverse so the topmost entity wins.
//! Entities are only ever removed all at once, by [`Scene::clear`].

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Velocity};

/// Unique identifier for an entity. Never reused, including across clears.
pub type EntityId = Uuid;

/// Kind-specific payload. Exactly one variant per entity, each carrying only
/// the fields its renderer path needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityKind {
    /// A single character glyph.
    Text {
        glyph: char,
        font_size: f64,
        font_weight: u16,
        font_family: String,
    },
    /// A closed polygon captured from a lasso stroke. Points are relative to
    /// the entity's center, so the polygon is invariant under the entity's
    /// translation and rotation.
    Shape { points: Vec<Point> },
}

/// A falling/draggable object on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier, assigned at spawn.
    pub id: EntityId,
    /// Glyph or polygon payload.
    pub kind: EntityKind,
    /// Center x in canvas space.
    pub x: f64,
    /// Center y in canvas space.
    pub y: f64,
    /// Current angle in radians.
    pub rotation: f64,
    /// Linear and angular speed, per frame.
    pub velocity: Velocity,
    /// Bounding width used for collisions and hit tests. Fixed at spawn.
    pub width: f64,
    /// Bounding height used for collisions and hit tests. Fixed at spawn.
    pub height: f64,
    /// True only while the pointer actively holds this entity.
    pub is_dragging: bool,
    /// True once dropped by the user: pinned in place, exempt from gravity
    /// until grabbed again.
    pub is_static: bool,
}

impl Entity {
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

/// Insertion-ordered store of all live entities.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self { entities: Vec::new() }
    }

    /// Append an entity at the top of the z-order.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == *id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == *id)
    }

    /// Entities in insertion (draw) order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Remove every entity. Irreversible.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
