//! Shared numeric and style constants for the playground engine.

// ── Physics (canvas pixels, per frame) ──────────────────────────

/// Downward acceleration added to a free entity's vy each frame.
///
/// Doubles as the settling threshold: a post-bounce `|vy|` below this snaps
/// to zero so entities stop micro-bouncing on the floor.
pub const GRAVITY: f64 = 0.4;

/// Linear velocity decay applied each frame.
pub const AIR_RESISTANCE: f64 = 0.99;

/// Angular velocity decay applied each frame.
pub const SPIN_DAMPING: f64 = 0.98;

/// Fraction of speed retained (sign-flipped) when reflecting off the floor
/// or a wall.
pub const BOUNCE_FACTOR: f64 = 0.5;

/// Horizontal velocity scale while sliding along the floor.
pub const FLOOR_FRICTION: f64 = 0.8;

/// Angular velocity scale on floor contact.
pub const FLOOR_SPIN_DAMPING: f64 = 0.8;

/// Pre-reflection downward speed above which a floor impact event fires.
pub const IMPACT_SPEED_THRESHOLD: f64 = 2.0;

// ── Spawning ────────────────────────────────────────────────────

/// Entities spawn this far above the visible area.
pub const SPAWN_Y_OFFSET: f64 = -100.0;

/// Extra random drop height (0..this) subtracted from a glyph's spawn y.
pub const TEXT_SPAWN_DROP: f64 = 100.0;

/// Fraction of the viewport width over which glyph spawns scatter.
pub const SPAWN_SCATTER_FRACTION: f64 = 0.4;

/// Horizontal stagger between successive glyphs, as a fraction of font size.
pub const GLYPH_STAGGER: f64 = 0.5;

/// Total horizontal scatter (pixels) applied to a shape's spawn x.
pub const SHAPE_SPAWN_SCATTER: f64 = 100.0;

/// Minimum number of lasso points that form a usable shape.
pub const MIN_STROKE_POINTS: usize = 6;

// ── Typography ──────────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 64.0;
pub const DEFAULT_FONT_WEIGHT: u16 = 700;
pub const DEFAULT_FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

// ── Colors ──────────────────────────────────────────────────────

/// Frame background. Must stay pure black: difference blending against black
/// leaves a painted color unchanged.
pub const CANVAS_BG: &str = "#000000";

/// Entity fill. Pure white, so overlapping entities cancel to black.
pub const ENTITY_COLOR: &str = "#FFFFFF";

// ── Audio ───────────────────────────────────────────────────────

/// Minimum interval between impact sounds.
pub const IMPACT_DEBOUNCE_MS: f64 = 40.0;

/// Impact speed (px/frame) that maps to full loudness.
pub const IMPACT_SPEED_NORM: f64 = 25.0;

/// Impacts quieter than this are skipped entirely.
pub const MIN_IMPACT_INTENSITY: f64 = 0.1;
