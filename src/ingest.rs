//! Ingestion: converts typed text and lasso strokes into spawned entities.
//!
//! Both paths validate first (empty text, degenerate strokes), measure or
//! derive bounding extents, and hand back fully-formed entities spawned above
//! the visible area with zero velocity. Spawn scatter comes from a seedable
//! xorshift generator so placement is exactly reproducible in tests.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use thiserror::Error;
use uuid::Uuid;

use crate::consts::{
    DEFAULT_FONT_FAMILY, GLYPH_STAGGER, MIN_STROKE_POINTS, SHAPE_SPAWN_SCATTER,
    SPAWN_SCATTER_FRACTION, SPAWN_Y_OFFSET, TEXT_SPAWN_DROP,
};
use crate::entity::{Entity, EntityKind};
use crate::geometry::{Point, Size, Velocity};

/// Why an ingestion attempt produced no entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IngestError {
    /// The submitted text was empty or whitespace-only.
    #[error("text is empty")]
    EmptyText,
    /// The lasso stroke had too few points to form a shape.
    #[error("stroke has too few points to form a shape")]
    DegenerateStroke,
}

/// Measures a single glyph at the font settings the renderer will draw with.
pub trait MeasureGlyph {
    /// Bounding extents of `glyph` at the given size and weight.
    fn measure(&self, glyph: char, font_size: f64, font_weight: u16) -> Size;
}

/// Fallback measurer for hosts without a 2D context: a font-size square.
pub struct SquareMeasurer;

impl MeasureGlyph for SquareMeasurer {
    fn measure(&self, _glyph: char, font_size: f64, _font_weight: u16) -> Size {
        Size::new(font_size, font_size)
    }
}

/// Deterministic spawn-scatter generator (xorshift32).
#[derive(Debug, Clone)]
pub struct SpawnRng {
    state: u32,
}

impl SpawnRng {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero.
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    /// Uniform value in `[0, 1]`.
    pub fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        f64::from(x) / f64::from(u32::MAX)
    }
}

/// Spawn one entity per non-space character of `text`.
///
/// Each glyph is measured independently at the requested size and weight.
/// Glyphs scatter horizontally around the viewport center and stagger by
/// their index in the full string (spaces advance the stagger but spawn
/// nothing), starting above the visible area.
///
/// # Errors
///
/// [`IngestError::EmptyText`] if `text` is empty or whitespace-only.
pub fn text_entities(
    text: &str,
    font_size: f64,
    font_weight: u16,
    viewport_w: f64,
    measure: &dyn MeasureGlyph,
    rng: &mut SpawnRng,
) -> Result<Vec<Entity>, IngestError> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyText);
    }

    let start_x = viewport_w / 2.0;
    let mut entities = Vec::new();

    for (index, glyph) in text.chars().enumerate() {
        if glyph == ' ' {
            continue;
        }

        let size = measure.measure(glyph, font_size, font_weight);
        let scatter = (rng.next_unit() - 0.5) * (viewport_w * SPAWN_SCATTER_FRACTION);
        let drop = rng.next_unit() * TEXT_SPAWN_DROP;

        entities.push(Entity {
            id: Uuid::new_v4(),
            kind: EntityKind::Text {
                glyph,
                font_size,
                font_weight,
                font_family: DEFAULT_FONT_FAMILY.to_owned(),
            },
            x: start_x + scatter + (index as f64) * (font_size * GLYPH_STAGGER),
            y: SPAWN_Y_OFFSET - drop,
            rotation: 0.0,
            velocity: Velocity::zero(),
            width: size.width,
            height: size.height,
            is_dragging: false,
            is_static: false,
        });
    }

    Ok(entities)
}

/// Build a shape entity from a raw lasso stroke.
///
/// The stroke is recentered about its bounding-box center and scaled by
/// `scale`, so the stored polygon is center-relative; the bounding extents
/// are the scaled bounding box of the input points. The shape spawns at the
/// horizontal center of the viewport with a small random offset, above the
/// visible area.
///
/// # Errors
///
/// [`IngestError::DegenerateStroke`] if the stroke has fewer than
/// [`MIN_STROKE_POINTS`] points.
pub fn shape_entity(
    stroke: &[Point],
    scale: f64,
    viewport_w: f64,
    rng: &mut SpawnRng,
) -> Result<Entity, IngestError> {
    if stroke.len() < MIN_STROKE_POINTS {
        return Err(IngestError::DegenerateStroke);
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for point in stroke {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    let center_x = min_x + (max_x - min_x) / 2.0;
    let center_y = min_y + (max_y - min_y) / 2.0;
    let points = stroke
        .iter()
        .map(|p| Point::new((p.x - center_x) * scale, (p.y - center_y) * scale))
        .collect();

    Ok(Entity {
        id: Uuid::new_v4(),
        kind: EntityKind::Shape { points },
        x: viewport_w / 2.0 + (rng.next_unit() - 0.5) * SHAPE_SPAWN_SCATTER,
        y: SPAWN_Y_OFFSET,
        rotation: 0.0,
        velocity: Velocity::zero(),
        width: (max_x - min_x) * scale,
        height: (max_y - min_y) * scale,
        is_dragging: false,
        is_static: false,
    })
}
