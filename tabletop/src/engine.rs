//! Top-level engine: the gesture state machine, optimistic mutation with
//! echo suppression, and the browser-facing wrapper.
//!
//! `EngineCore` is everything that does not depend on the canvas element,
//! so the interaction and synchronization rules are testable on the host.
//! Every mutation entry point carries an explicit `emit` flag: local
//! gestures pass `true` and enqueue exactly one outbound message, inbound
//! network handlers pass `false` and can never re-broadcast. The host
//! drains the queue with [`EngineCore::take_outbound`] after each input
//! event.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::{self, Camera, Point};
use crate::consts::WHEEL_ZOOM_SENSITIVITY;
use crate::hit;
use crate::input::{Button, DragState, WheelDelta};
use crate::protocol::ClientMessage;
use crate::render;
use crate::scene::{MapBackground, SceneStore, Token};

/// Core engine state, independent of the canvas element.
pub struct EngineCore {
    pub scene: SceneStore,
    pub camera: Camera,
    pub drag: DragState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    outbound: Vec<ClientMessage>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: SceneStore::new(),
            camera: Camera::default(),
            drag: DragState::Idle,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            outbound: Vec::new(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(1.0);
        self.viewport_height = height_css.max(1.0);
        self.dpr = dpr.max(1.0);
    }

    // --- Mutation entry points ---

    /// Move a token to a grid position.
    ///
    /// Applies to the scene immediately so the local render is
    /// latency-free. When `emit` is true the change is queued for the
    /// authority exactly once; inbound handlers pass `false` so a remote
    /// change is never echoed back.
    pub fn move_token(&mut self, id: &str, x: f64, y: f64, emit: bool) -> bool {
        if !self.scene.move_token(id, x, y) {
            return false;
        }
        if emit {
            self.outbound.push(ClientMessage::MoveToken { id: id.to_owned(), x, y });
        }
        true
    }

    /// Replace the map background, queueing a `change-map` when `emit`.
    pub fn set_map(&mut self, map: MapBackground, emit: bool) {
        if emit {
            self.outbound.push(ClientMessage::ChangeMap {
                url: map.url.clone(),
                width: map.width,
                height: map.height,
            });
        }
        self.scene.replace_map(map);
    }

    // --- Inbound network handlers ---

    /// Hydrate from the authoritative snapshot. Replaces tokens and map
    /// wholesale; never emits.
    pub fn apply_init_state(&mut self, tokens: Vec<Token>, map: MapBackground) {
        self.scene.load_snapshot(tokens, map);
    }

    /// Apply a remote token move without re-broadcasting it.
    pub fn apply_remote_move(&mut self, id: &str, x: f64, y: f64) {
        self.move_token(id, x, y, false);
    }

    /// Apply a remote map change without re-broadcasting it.
    pub fn apply_remote_map(&mut self, map: MapBackground) {
        self.set_map(map, false);
    }

    /// Drain the queued outbound messages for the transport to send.
    pub fn take_outbound(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outbound)
    }

    // --- Input events ---

    /// Pointer-down: middle/secondary buttons always pan; the primary
    /// button grabs the topmost token under the pointer or starts a pan on
    /// empty ground, clearing the selection.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button) {
        if matches!(button, Button::Middle | Button::Secondary) {
            self.start_pan(screen);
            return;
        }

        let world = self.camera.screen_to_world(screen);
        let grabbed = hit::token_at(world, &self.scene).map(|token| {
            let origin = camera::grid_to_world(Point::new(token.x, token.y), self.scene.grid_size());
            (
                token.id.clone(),
                Point::new(world.x - origin.x, world.y - origin.y),
            )
        });

        match grabbed {
            Some((id, grab_offset)) => {
                self.scene.select(Some(id.clone()));
                self.drag = DragState::DraggingToken { id, grab_offset };
            }
            None => {
                self.scene.select(None);
                self.start_pan(screen);
            }
        }
    }

    /// Pointer-move: recompute the active gesture from its fixed anchors.
    ///
    /// Panning derives the camera from the total delta since the down
    /// event, so any number of coalesced move events yields the identical
    /// camera. A drag whose token has vanished terminates to `Idle`.
    pub fn on_pointer_move(&mut self, screen: Point) {
        match self.drag.clone() {
            DragState::Idle => {}
            DragState::Panning { anchor_screen, anchor_pan } => {
                self.camera.pan_to(
                    anchor_pan.x + (screen.x - anchor_screen.x),
                    anchor_pan.y + (screen.y - anchor_screen.y),
                );
            }
            DragState::DraggingToken { id, grab_offset } => {
                if self.scene.get(&id).is_none() {
                    self.drag = DragState::Idle;
                    return;
                }
                let world = self.camera.screen_to_world(screen);
                let grid = camera::world_to_grid(
                    Point::new(world.x - grab_offset.x, world.y - grab_offset.y),
                    self.scene.grid_size(),
                );
                self.move_token(&id, grid.x, grid.y, true);
            }
        }
    }

    /// Pointer-up: a live token drag settles onto the nearest whole grid
    /// cell and that snapped position is pushed as the authoritative
    /// update. Either way the gesture resets to `Idle`.
    pub fn on_pointer_up(&mut self) {
        if let DragState::DraggingToken { id, .. } = self.drag.clone() {
            if let Some(token) = self.scene.get(&id) {
                let snapped = camera::snap_to_cell(Point::new(token.x, token.y));
                self.move_token(&id, snapped.x, snapped.y, true);
            }
        }
        self.drag = DragState::Idle;
    }

    /// Wheel: scale the zoom by the vertical delta and re-anchor the
    /// camera at the pointer. The camera is local-only and never emitted.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) {
        let target = Camera::clamp_zoom(self.camera.zoom * (1.0 - delta.dy * WHEEL_ZOOM_SENSITIVITY));
        self.camera.zoom_at(screen, target);
    }

    // --- Queries ---

    /// CSS cursor name reflecting the active gesture.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.drag {
            DragState::Idle => "default",
            DragState::Panning { .. } => "grabbing",
            DragState::DraggingToken { .. } => "move",
        }
    }

    fn start_pan(&mut self, screen: Point) {
        self.drag = DragState::Panning {
            anchor_screen: screen,
            anchor_pan: Point::new(self.camera.pan_x, self.camera.pan_y),
        };
    }
}

/// The full viewport engine: core state plus the browser surfaces it
/// paints to.
pub struct Engine {
    canvas: HtmlCanvasElement,
    map_image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, map_image: None, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn apply_init_state(&mut self, tokens: Vec<Token>, map: MapBackground) {
        self.core.apply_init_state(tokens, map);
        self.reload_map_image();
    }

    pub fn apply_remote_move(&mut self, id: &str, x: f64, y: f64) {
        self.core.apply_remote_move(id, x, y);
    }

    pub fn apply_remote_map(&mut self, map: MapBackground) {
        self.core.apply_remote_map(map);
        self.reload_map_image();
    }

    pub fn set_map(&mut self, map: MapBackground, emit: bool) {
        self.core.set_map(map, emit);
        self.reload_map_image();
    }

    pub fn take_outbound(&mut self) -> Vec<ClientMessage> {
        self.core.take_outbound()
    }

    // --- Delegated input events ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) {
        self.core.on_pointer_down(screen, button);
    }

    pub fn on_pointer_move(&mut self, screen: Point) {
        self.core.on_pointer_move(screen);
    }

    pub fn on_pointer_up(&mut self) {
        self.core.on_pointer_up();
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) {
        self.core.on_wheel(screen, delta);
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.core.cursor()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// Resizes the backing store to the viewport dimensions times the
    /// device pixel ratio when they have drifted, then paints the full
    /// scene. The map image is passed through only once decoded; before
    /// that (or after a decode failure) the renderer substitutes the
    /// placeholder.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call
    /// fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(&self) -> Result<(), JsValue> {
        let backing_w = (self.core.viewport_width * self.core.dpr).max(1.0) as u32;
        let backing_h = (self.core.viewport_height * self.core.dpr).max(1.0) as u32;
        if self.canvas.width() != backing_w {
            self.canvas.set_width(backing_w);
        }
        if self.canvas.height() != backing_h {
            self.canvas.set_height(backing_h);
        }

        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let map_image = self
            .map_image
            .as_ref()
            .filter(|image| image.complete() && image.natural_width() > 0);

        render::draw(
            &ctx,
            &self.core.scene,
            &self.core.camera,
            map_image,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    /// Start loading the scene's map image, fire-and-forget.
    ///
    /// Readiness is polled per frame in [`Engine::render`]; a decode
    /// failure simply leaves the placeholder in place.
    fn reload_map_image(&mut self) {
        self.map_image = self.core.scene.map().url.clone().and_then(|url| {
            match HtmlImageElement::new() {
                Ok(image) => {
                    image.set_src(&url);
                    Some(image)
                }
                Err(_) => None,
            }
        });
    }
}
