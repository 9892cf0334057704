//! Rendering: composites the entity list onto a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. Every frame starts from an opaque
//! black fill, then the context switches to `difference` compositing so
//! overlapping white entities cancel to black. Because of that, draw order is
//! part of the visual contract: entities paint strictly in insertion order,
//! and later entities "erase" the overlap regions of earlier ones.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) reports them.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{CANVAS_BG, DEFAULT_FONT_FAMILY, ENTITY_COLOR};
use crate::entity::{Entity, EntityKind};
use crate::geometry::{Point, Size};
use crate::ingest::MeasureGlyph;

/// Draw one frame: black base, then every entity in difference mode.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device
/// pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    entities: &[Entity],
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    // Opaque black base. Difference against black leaves a color unchanged,
    // so the first paint of any entity shows as-is.
    ctx.set_global_composite_operation("source-over")?;
    ctx.set_fill_style_str(CANVAS_BG);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // From here on, overlapping white regions cancel to black.
    ctx.set_global_composite_operation("difference")?;
    for entity in entities {
        draw_entity(ctx, entity)?;
    }

    Ok(())
}

fn draw_entity(ctx: &CanvasRenderingContext2d, entity: &Entity) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(entity.x, entity.y)?;
    ctx.rotate(entity.rotation)?;

    ctx.set_fill_style_str(ENTITY_COLOR);
    match &entity.kind {
        EntityKind::Text { glyph, font_size, font_weight, font_family } => {
            ctx.set_font(&font_spec(*font_weight, *font_size, font_family));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(&glyph.to_string(), 0.0, 0.0)?;
        }
        EntityKind::Shape { points } => fill_polygon(ctx, points),
    }

    ctx.restore();
    Ok(())
}

fn fill_polygon(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let Some(first) = points.first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for point in &points[1..] {
        ctx.line_to(point.x, point.y);
    }
    ctx.close_path();
    ctx.fill();
}

/// CSS font shorthand shared by the renderer and the glyph measurer.
#[must_use]
pub fn font_spec(weight: u16, size: f64, family: &str) -> String {
    format!("{weight} {size}px {family}")
}

/// Glyph measurement backed by the live canvas context, using the same font
/// string the renderer sets at draw time.
pub struct CanvasMeasurer<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasMeasurer<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl MeasureGlyph for CanvasMeasurer<'_> {
    fn measure(&self, glyph: char, font_size: f64, font_weight: u16) -> Size {
        self.ctx.save();
        self.ctx.set_font(&font_spec(font_weight, font_size, DEFAULT_FONT_FAMILY));
        let size = match self.ctx.measure_text(&glyph.to_string()) {
            Ok(metrics) => {
                let height =
                    metrics.actual_bounding_box_ascent() + metrics.actual_bounding_box_descent();
                // Some engines report zero boxes for exotic glyphs; fall back
                // to the font size.
                Size::new(metrics.width(), if height > 0.0 { height } else { font_size })
            }
            Err(_) => Size::new(font_size, font_size),
        };
        self.ctx.restore();
        size
    }
}
