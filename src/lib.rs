//! Physics playground engine: falling glyphs and hand-drawn shapes.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the playground canvas: spawning entities from typed text
//! or freehand lasso strokes, advancing the per-frame physics simulation,
//! hit-testing and dragging entities with the pointer, and compositing every
//! frame with a difference blend against a black background so overlapping
//! white entities cancel to black. The host JavaScript layer is responsible
//! only for wiring DOM events and form inputs to [`playground::Playground`]
//! and for the layout around the canvas.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`playground`] | `#[wasm_bindgen]` facade driven by the JS host |
//! | [`engine`] | Canvas-owning engine and testable [`engine::EngineCore`] |
//! | [`entity`] | Entity records and the insertion-ordered scene |
//! | [`physics`] | Per-frame integration and canvas-bounds collisions |
//! | [`hit`] | Topmost-first AABB hit-testing |
//! | [`input`] | Pointer drag gesture state machine |
//! | [`ingest`] | Text/stroke ingestion and spawn placement |
//! | [`render`] | Difference-blend scene rendering |
//! | [`scheduler`] | Cancellable animation-frame loop |
//! | [`audio`] | Synthesized impact and placement cues |
//! | [`geometry`] | Point, velocity, and size value types |
//! | [`consts`] | Shared numeric constants (physics, spawning, audio) |

pub mod audio;
pub mod consts;
pub mod engine;
pub mod entity;
pub mod geometry;
pub mod hit;
pub mod ingest;
pub mod input;
pub mod physics;
pub mod playground;
pub mod render;
pub mod scheduler;

use std::sync::Once;

use wasm_bindgen::prelude::wasm_bindgen;

/// Install the console logger and panic hook exactly once.
pub(crate) fn ensure_diagnostics() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already installed".into());
        }
    });
}

/// Initialize engine diagnostics. Optional — the [`playground::Playground`]
/// constructor does this on first use.
#[wasm_bindgen]
pub fn init() {
    ensure_diagnostics();
}

/// Engine version string.
#[wasm_bindgen]
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
