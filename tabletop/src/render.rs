//! Rendering: draws the full tabletop scene to a 2D context.
//!
//! This module and [`crate::fog`] are the only places that touch
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of
//! scene and camera state and produces pixels; it does not mutate any
//! application state, so rendering the same state twice yields identical
//! frames.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::Camera;
use crate::fog;
use crate::scene::{SceneStore, Token};

/// Page background behind the map.
const BACKGROUND_COLOR: &str = "#0f172a";
/// Placeholder fill while the map image is missing or undecodable.
const MAP_PLACEHOLDER_COLOR: &str = "#1e293b";
/// Grid line color.
const GRID_LINE_COLOR: &str = "#334155";
/// Token outline color.
const TOKEN_OUTLINE_COLOR: &str = "#e2e8f0";
/// Selection ring color.
const SELECTION_COLOR: &str = "#6366f1";
/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;
/// Token disc radius as a fraction of the footprint half-side.
const TOKEN_RADIUS_RATIO: f64 = 0.9;
/// HP bar colors.
const HP_BAR_BACK_COLOR: &str = "#1e293b";
const HP_BAR_FILL_COLOR: &str = "#ef4444";

/// Draw the full scene: background, map, grid, tokens, selection, fog,
/// and the fixed status overlay.
///
/// `viewport_w` and `viewport_h` are in CSS pixels; `dpr` is the device
/// pixel ratio applied as the base transform.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &SceneStore,
    camera: &Camera,
    map_image: Option<&HtmlImageElement>,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and background fill in CSS pixel space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: world content under the camera transform — translate by the
    // pan offset, then scale by the zoom, in that order.
    ctx.save();
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    let (map_w, map_h) = scene.map().bounds_world();
    draw_map(ctx, map_image, map_w, map_h)?;
    draw_grid(ctx, scene.grid_size(), map_w, map_h, camera.zoom);
    for token in scene.sorted_tokens() {
        draw_token(ctx, token, scene.grid_size())?;
    }
    if let Some(id) = scene.selection() {
        if let Some(token) = scene.get(id) {
            draw_selection(ctx, token, scene.grid_size(), camera.zoom)?;
        }
    }
    fog::draw_fog(ctx, scene, map_w, map_h)?;
    ctx.restore();

    // Layer 3: fixed-position status overlay in screen space.
    draw_status_overlay(ctx, camera, viewport_h)?;
    Ok(())
}

// =============================================================
// Map & grid
// =============================================================

fn draw_map(
    ctx: &CanvasRenderingContext2d,
    map_image: Option<&HtmlImageElement>,
    map_w: f64,
    map_h: f64,
) -> Result<(), JsValue> {
    match map_image {
        Some(image) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, map_w, map_h)?;
        }
        None => {
            ctx.set_fill_style_str(MAP_PLACEHOLDER_COLOR);
            ctx.fill_rect(0.0, 0.0, map_w, map_h);
        }
    }
    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, grid_size: f64, map_w: f64, map_h: f64, zoom: f64) {
    ctx.set_stroke_style_str(GRID_LINE_COLOR);
    ctx.set_line_width(1.0 / zoom);

    let mut x = 0.0;
    while x <= map_w {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, map_h);
        ctx.stroke();
        x += grid_size;
    }

    let mut y = 0.0;
    while y <= map_h {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(map_w, y);
        ctx.stroke();
        y += grid_size;
    }
}

// =============================================================
// Tokens
// =============================================================

fn draw_token(ctx: &CanvasRenderingContext2d, token: &Token, grid_size: f64) -> Result<(), JsValue> {
    let center = fog::token_center_world(token, grid_size);
    let half_side = token.size * grid_size * 0.5;
    let radius = half_side * TOKEN_RADIUS_RATIO;

    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    ctx.set_fill_style_str(&token.color);
    ctx.fill();
    ctx.set_stroke_style_str(TOKEN_OUTLINE_COLOR);
    ctx.set_line_width(2.0);
    ctx.stroke();

    if !token.name.is_empty() {
        let font_size = (grid_size * 0.22).max(9.0);
        ctx.set_fill_style_str(TOKEN_OUTLINE_COLOR);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        ctx.set_font(&format!("{font_size:.0}px sans-serif"));
        ctx.fill_text(&token.name, center.x, center.y + half_side + 2.0)?;
    }

    if let Some(hp) = token.hp {
        let bar_w = token.size * grid_size * 0.8;
        let bar_h = 6.0;
        let bar_x = center.x - bar_w * 0.5;
        let bar_y = token.y * grid_size - bar_h - 4.0;
        ctx.set_fill_style_str(HP_BAR_BACK_COLOR);
        ctx.fill_rect(bar_x, bar_y, bar_w, bar_h);
        ctx.set_fill_style_str(HP_BAR_FILL_COLOR);
        ctx.fill_rect(bar_x, bar_y, bar_w * hp.fraction(), bar_h);
    }

    Ok(())
}

fn draw_selection(
    ctx: &CanvasRenderingContext2d,
    token: &Token,
    grid_size: f64,
    zoom: f64,
) -> Result<(), JsValue> {
    let center = fog::token_center_world(token, grid_size);
    let radius = token.size * grid_size * 0.5 + 4.0 / zoom;
    let dash_world = SELECTION_DASH_PX / zoom;

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(2.0 / zoom);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)?;

    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    ctx.stroke();

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Overlay
// =============================================================

fn draw_status_overlay(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    viewport_h: f64,
) -> Result<(), JsValue> {
    let readout = format!(
        "ZOOM {:.0}%  POS {:.0},{:.0}",
        camera.zoom * 100.0,
        camera.pan_x,
        camera.pan_y
    );
    ctx.set_fill_style_str("rgba(226, 232, 240, 0.7)");
    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");
    ctx.set_font("12px monospace");
    ctx.fill_text(&readout, 12.0, viewport_h - 12.0)?;
    Ok(())
}
