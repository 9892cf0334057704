//! WASM facade: the `Playground` object a JavaScript host drives.
//!
//! The host wires DOM pointer events to the pointer methods, form
//! submissions to the spawn methods, a resize observer to `set_viewport`,
//! and calls `start()` once the canvas is mounted. Everything else
//! (simulation, rendering, audio) happens inside the engine on the
//! animation-frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::engine::Engine;
use crate::geometry::Point;
use crate::ingest::IngestError;
use crate::scheduler::FrameLoop;

#[wasm_bindgen]
pub struct Playground {
    engine: Rc<RefCell<Engine>>,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl Playground {
    /// Bind a playground to a canvas element.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        crate::ensure_diagnostics();
        Self {
            engine: Rc::new(RefCell::new(Engine::new(canvas))),
            frame_loop: None,
        }
    }

    /// Begin the physics+render loop. Idempotent while running.
    pub fn start(&mut self) {
        if self.frame_loop.is_some() {
            return;
        }
        let engine = Rc::clone(&self.engine);
        match FrameLoop::start(move || engine.borrow_mut().tick()) {
            Ok(frame_loop) => self.frame_loop = Some(frame_loop),
            Err(err) => log::warn!("could not start frame loop: {err:?}"),
        }
    }

    /// Stop the loop and cancel the pending frame request.
    pub fn stop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
    }

    /// Whether the frame loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_some()
    }

    /// Update the canvas backing resolution for a new CSS size and device
    /// pixel ratio. Entity state is untouched.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.engine.borrow_mut().set_viewport(width_css, height_css, dpr);
    }

    /// Spawn one falling glyph per non-space character. Returns the number
    /// of entities created.
    ///
    /// # Errors
    ///
    /// Rejects empty or whitespace-only text.
    pub fn add_text(&mut self, text: &str, font_size: f64, font_weight: u16) -> Result<usize, JsValue> {
        self.engine
            .borrow_mut()
            .add_text(text, font_size, font_weight)
            .map_err(to_js)
    }

    /// Spawn a shape from a flat `[x0, y0, x1, y1, ...]` lasso stroke.
    /// Returns the new entity's id.
    ///
    /// # Errors
    ///
    /// Rejects strokes with too few points.
    pub fn add_shape(&mut self, coords: &[f64], scale: f64) -> Result<String, JsValue> {
        let stroke: Vec<Point> = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        self.engine
            .borrow_mut()
            .add_shape(&stroke, scale)
            .map(|id| id.to_string())
            .map_err(to_js)
    }

    /// Remove every entity. No confirmation, irreversible.
    pub fn clear(&mut self) {
        self.engine.borrow_mut().clear();
    }

    // --- Pointer input (canvas-relative CSS pixels) ---

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.engine.borrow_mut().pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.engine.borrow_mut().pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.engine.borrow_mut().pointer_up();
    }

    // --- Queries ---

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.engine.borrow().core.scene.len()
    }

    /// Frames simulated since creation.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.engine.borrow().core.frame
    }

    /// JSON snapshot of the live entity list.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn scene_json(&self) -> Result<String, JsValue> {
        self.engine
            .borrow()
            .core
            .scene_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// PNG data URL of the live raster surface, for image export. Reads the
    /// canvas as-is; no engine state changes.
    ///
    /// # Errors
    ///
    /// Propagates canvas encoding failures.
    pub fn snapshot_data_url(&self) -> Result<String, JsValue> {
        self.engine.borrow().snapshot_data_url()
    }
}

fn to_js(err: IngestError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
