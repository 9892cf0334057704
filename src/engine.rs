//! Top-level engine: the testable [`EngineCore`] and the canvas-owning
//! [`Engine`] wrapper.
//!
//! `EngineCore` holds everything that does not depend on the browser (the
//! scene, the drag gesture, the viewport dimensions) and is exercised
//! natively by the test suite. `Engine` binds a core to an
//! `HtmlCanvasElement`, the 2D context, and the audio subsystem, and is what
//! the frame loop ticks. All state mutation happens on the single browser
//! thread; the pointer handlers and the frame tick never interleave.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::entity::{Entity, EntityId, Scene};
use crate::geometry::{Point, Velocity};
use crate::hit;
use crate::ingest::{self, IngestError, MeasureGlyph, SpawnRng, SquareMeasurer};
use crate::input::DragState;
use crate::physics::{self, StepEvent};
use crate::render::{self, CanvasMeasurer};

/// Host-visible side effects returned from input and simulation steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Play an impact cue for a floor hit at the given speed.
    ImpactSound { speed: f64 },
    /// Play the placement cue for a drag release.
    PlacementSound,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub drag: DragState,
    pub rng: SpawnRng,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    pub frame: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            drag: DragState::Idle,
            rng: SpawnRng::new(12345),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            frame: 0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Store the CSS-pixel viewport size and device pixel ratio.
    ///
    /// Entity state is deliberately untouched: a resize must never reset the
    /// scene.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Ingestion ---

    /// Spawn one falling glyph per non-space character of `text`.
    ///
    /// Returns the number of entities created.
    ///
    /// # Errors
    ///
    /// [`IngestError::EmptyText`] for empty or whitespace-only input.
    pub fn add_text(
        &mut self,
        text: &str,
        font_size: f64,
        font_weight: u16,
        measure: &dyn MeasureGlyph,
    ) -> Result<usize, IngestError> {
        let spawned = ingest::text_entities(
            text,
            font_size,
            font_weight,
            self.viewport_width,
            measure,
            &mut self.rng,
        )?;
        let count = spawned.len();
        for entity in spawned {
            self.scene.push(entity);
        }
        log::debug!("spawned {count} glyph entities");
        Ok(count)
    }

    /// Spawn a shape entity from a raw lasso stroke.
    ///
    /// # Errors
    ///
    /// [`IngestError::DegenerateStroke`] for strokes too short to form a
    /// shape.
    pub fn add_shape(&mut self, stroke: &[Point], scale: f64) -> Result<EntityId, IngestError> {
        let entity = ingest::shape_entity(stroke, scale, self.viewport_width, &mut self.rng)?;
        let id = entity.id;
        self.scene.push(entity);
        log::debug!("spawned shape entity {id}");
        Ok(id)
    }

    /// Remove every entity and drop any drag in progress. Irreversible.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.drag = DragState::Idle;
        log::debug!("scene cleared");
    }

    // --- Simulation ---

    /// Advance the simulation one frame.
    pub fn step(&mut self) -> Vec<Action> {
        let events = physics::step(
            self.scene.entities_mut(),
            self.viewport_width,
            self.viewport_height,
        );
        self.frame += 1;
        events
            .into_iter()
            .map(|StepEvent::FloorImpact { speed }| Action::ImpactSound { speed })
            .collect()
    }

    // --- Pointer input ---

    /// Grab the topmost entity under the pointer, if any.
    ///
    /// Grabbing unpins a static entity: it is live again from the moment it
    /// is held, though physics stays suspended until release.
    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        let Some(id) = hit::hit_test(point, self.scene.entities()) else {
            return Vec::new();
        };
        if let Some(entity) = self.scene.get_mut(&id) {
            entity.is_dragging = true;
            entity.is_static = false;
            entity.velocity = Velocity::zero();
            self.drag = DragState::Dragging {
                id,
                offset_x: point.x - entity.x,
                offset_y: point.y - entity.y,
            };
        }
        Vec::new()
    }

    /// Track the pointer while an entity is held.
    ///
    /// The entity follows `pointer - grab offset`; velocity stays zeroed so a
    /// fast drag transfers no momentum on release.
    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        if let DragState::Dragging { id, offset_x, offset_y } = self.drag {
            if let Some(entity) = self.scene.get_mut(&id) {
                entity.x = point.x - offset_x;
                entity.y = point.y - offset_y;
                entity.velocity = Velocity::zero();
            }
        }
        Vec::new()
    }

    /// Release the held entity, pinning it at its current position.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let DragState::Dragging { id, .. } = self.drag else {
            return Vec::new();
        };
        self.drag = DragState::Idle;
        // The entity can be gone if the scene was cleared mid-drag.
        let Some(entity) = self.scene.get_mut(&id) else {
            return Vec::new();
        };
        entity.is_dragging = false;
        entity.is_static = true;
        vec![Action::PlacementSound]
    }

    // --- Queries ---

    /// The currently dragged entity, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<EntityId> {
        self.drag.dragged()
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.scene.get(id)
    }

    /// JSON snapshot of the live entity list, for host-side inspection.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn scene_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.scene.entities())
    }
}

/// The full playground engine. Wraps [`EngineCore`] and owns the browser
/// canvas element, the 2D context, and the audio subsystem.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    audio: crate::audio::SoundDirector,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// A missing or unusable 2D context disables rendering but is not fatal:
    /// the simulation still runs and glyph measurement falls back to
    /// font-size squares.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = acquire_context(&canvas);
        Self {
            canvas,
            ctx,
            audio: crate::audio::SoundDirector::new(),
            core: EngineCore::new(),
        }
    }

    // --- Viewport ---

    /// Resize the canvas backing store to physical pixels and record the CSS
    /// viewport. Entity state is untouched.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.canvas.set_width((width_css * dpr).max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).max(0.0) as u32);
        self.core.set_viewport(width_css, height_css, dpr);
    }

    // --- Ingestion ---

    /// Spawn falling glyphs, measuring each against the live context.
    ///
    /// # Errors
    ///
    /// See [`EngineCore::add_text`].
    pub fn add_text(
        &mut self,
        text: &str,
        font_size: f64,
        font_weight: u16,
    ) -> Result<usize, IngestError> {
        match &self.ctx {
            Some(ctx) => {
                let measurer = CanvasMeasurer::new(ctx);
                self.core.add_text(text, font_size, font_weight, &measurer)
            }
            None => self.core.add_text(text, font_size, font_weight, &SquareMeasurer),
        }
    }

    /// Spawn a shape from a lasso stroke.
    ///
    /// # Errors
    ///
    /// See [`EngineCore::add_shape`].
    pub fn add_shape(&mut self, stroke: &[Point], scale: f64) -> Result<EntityId, IngestError> {
        self.core.add_shape(stroke, scale)
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        // First user gesture: the only safe moment to unlock audio output.
        self.audio.ensure_init();
        let actions = self.core.on_pointer_down(Point::new(x, y));
        self.dispatch(&actions);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let actions = self.core.on_pointer_move(Point::new(x, y));
        self.dispatch(&actions);
    }

    pub fn pointer_up(&mut self) {
        let actions = self.core.on_pointer_up();
        self.dispatch(&actions);
    }

    // --- Frame ---

    /// One animation-frame tick: integrate physics, then repaint.
    pub fn tick(&mut self) {
        let actions = self.core.step();
        self.dispatch(&actions);
        self.render();
    }

    /// Draw the current scene. A missing context makes this a no-op.
    pub fn render(&self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if let Err(err) = render::draw(
            ctx,
            self.core.scene.entities(),
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        ) {
            log::warn!("render failed: {err:?}");
        }
    }

    /// PNG data URL of the live raster surface. No engine state changes.
    ///
    /// # Errors
    ///
    /// Propagates canvas encoding failures.
    pub fn snapshot_data_url(&self) -> Result<String, JsValue> {
        self.canvas.to_data_url()
    }

    fn dispatch(&mut self, actions: &[Action]) {
        for action in actions {
            match *action {
                Action::ImpactSound { speed } => self.audio.play_impact(speed),
                Action::PlacementSound => self.audio.play_placement(),
            }
        }
    }
}

fn acquire_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(ctx),
            Err(_) => {
                log::warn!("2d context has an unexpected type; rendering disabled");
                None
            }
        },
        Ok(None) => {
            log::warn!("canvas returned no 2d context; rendering disabled");
            None
        }
        Err(err) => {
            log::warn!("failed to acquire 2d context: {err:?}; rendering disabled");
            None
        }
    }
}
