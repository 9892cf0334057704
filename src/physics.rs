//! Physics integration: gravity, damping, and canvas-bounds collisions.
//!
//! One [`step`] call advances every free entity a single frame. Entities that
//! are dragged or pinned get their velocity zeroed and are otherwise left
//! alone — the drag controller owns their position. There is no
//! entity-entity collision; overlap is part of the look.

#[cfg(test)]
#[path = "physics_test.rs"]
mod physics_test;

use crate::consts::{
    AIR_RESISTANCE, BOUNCE_FACTOR, FLOOR_FRICTION, FLOOR_SPIN_DAMPING, GRAVITY,
    IMPACT_SPEED_THRESHOLD, SPIN_DAMPING,
};
use crate::entity::Entity;
use crate::geometry::Velocity;

/// Side effect of one integration step, reported to the host/audio layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// An entity crossed the floor moving down at `speed` px/frame
    /// (pre-reflection), hard enough to be audible.
    FloorImpact { speed: f64 },
}

/// Advance every entity one frame inside a `width` x `height` viewport.
pub fn step(entities: &mut [Entity], width: f64, height: f64) -> Vec<StepEvent> {
    let mut events = Vec::new();

    for entity in entities.iter_mut() {
        if entity.is_dragging || entity.is_static {
            // Held or pinned: position is owned elsewhere and momentum must
            // never accumulate across the hold.
            entity.velocity = Velocity::zero();
            continue;
        }

        let Velocity { x: mut vx, y: mut vy, rotation: mut spin } = entity.velocity;

        vy += GRAVITY;
        vx *= AIR_RESISTANCE;
        vy *= AIR_RESISTANCE;
        spin *= SPIN_DAMPING;

        entity.x += vx;
        entity.y += vy;
        entity.rotation += spin;

        // Floor.
        let floor = height - entity.half_height();
        if entity.y > floor {
            if vy > IMPACT_SPEED_THRESHOLD {
                events.push(StepEvent::FloorImpact { speed: vy });
            }
            entity.y = floor;
            vy *= -BOUNCE_FACTOR;
            vx *= FLOOR_FRICTION;
            spin *= FLOOR_SPIN_DAMPING;
            // Settle instead of micro-bouncing forever.
            if vy.abs() < GRAVITY {
                vy = 0.0;
            }
        }

        // Walls.
        let half_width = entity.half_width();
        if entity.x < half_width {
            entity.x = half_width;
            vx *= -BOUNCE_FACTOR;
        } else if entity.x > width - half_width {
            entity.x = width - half_width;
            vx *= -BOUNCE_FACTOR;
        }

        entity.velocity = Velocity { x: vx, y: vy, rotation: spin };
    }

    events
}
