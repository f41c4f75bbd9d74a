//! Shared numeric constants for the tabletop crate.

// ── Camera ──────────────────────────────────────────────────────

/// Lower bound for the camera zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper bound for the camera zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom factor change per wheel `delta_y` unit.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

// ── Grid & map ──────────────────────────────────────────────────

/// World pixels per grid cell.
pub const DEFAULT_GRID_SIZE: f64 = 70.0;

/// Map width in world pixels when no background image is set (25 cells).
pub const FALLBACK_MAP_WIDTH: u32 = 1750;

/// Map height in world pixels when no background image is set (18 cells).
pub const FALLBACK_MAP_HEIGHT: u32 = 1260;

// ── Fog of war ──────────────────────────────────────────────────

/// Vision radius granted by every token, in grid cells.
pub const VISION_RADIUS_CELLS: f64 = 3.0;

/// Near-opaque fog sheet drawn over the full map bounds.
pub const FOG_COLOR: &str = "rgba(2, 6, 23, 0.92)";
