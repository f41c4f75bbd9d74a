//! Fog-of-war visibility compositor.
//!
//! Runs once per frame, after all opaque content and inside the camera
//! transform: paint the near-opaque fog sheet over the full map bounds,
//! then erase a soft radial patch around every token with
//! `destination-out` compositing. Erase strength peaks at the token
//! center and falls to zero at the vision boundary, so each token reveals
//! a soft-edged circle and overlapping patches merge. The surrounding
//! save/restore returns compositing to `source-over` before anything else
//! draws.
//!
//! The geometry helpers are pure so the mask layout is testable without a
//! browser; the compositor keeps no cross-frame state, which makes
//! repeated renders of the same scene pixel-identical.

#[cfg(test)]
#[path = "fog_test.rs"]
mod fog_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::consts::{FOG_COLOR, VISION_RADIUS_CELLS};
use crate::scene::{SceneStore, Token};

/// Vision radius in world pixels.
#[must_use]
pub fn vision_radius_world(grid_size: f64) -> f64 {
    VISION_RADIUS_CELLS * grid_size
}

/// World-pixel center of a token's footprint.
#[must_use]
pub fn token_center_world(token: &Token, grid_size: f64) -> Point {
    Point::new(
        (token.x + token.size * 0.5) * grid_size,
        (token.y + token.size * 0.5) * grid_size,
    )
}

/// Draw the fog pass over the map bounds.
///
/// Must be called with the camera transform applied and after all opaque
/// content.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_fog(
    ctx: &CanvasRenderingContext2d,
    scene: &SceneStore,
    map_w: f64,
    map_h: f64,
) -> Result<(), JsValue> {
    ctx.save();

    ctx.set_fill_style_str(FOG_COLOR);
    ctx.fill_rect(0.0, 0.0, map_w, map_h);

    ctx.set_global_composite_operation("destination-out")?;
    let radius = vision_radius_world(scene.grid_size());
    for token in scene.sorted_tokens() {
        let center = token_center_world(token, scene.grid_size());
        let gradient = ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?;
        gradient.add_color_stop(0.0, "rgba(0, 0, 0, 1)")?;
        gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)")?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}
