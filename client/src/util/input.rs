//! Pointer and wheel event mapping utilities.
//!
//! These helpers translate DOM event payloads into the engine's input
//! types. They are all `#[cfg(feature = "csr")]` because they depend on
//! `web_sys` types that only exist in the browser.

#[cfg(feature = "csr")]
use tabletop::camera::Point;
#[cfg(feature = "csr")]
use tabletop::input::{Button, WheelDelta};

/// Map a DOM `button` code to the engine's button type.
#[cfg(feature = "csr")]
pub fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Canvas-local position of a pointer event fired on the canvas itself.
#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Canvas-local position of a wheel event fired on the canvas itself.
#[cfg(feature = "csr")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Wheel delta in pixels.
#[cfg(feature = "csr")]
pub fn wheel_delta(ev: &leptos::ev::WheelEvent) -> WheelDelta {
    WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() }
}

/// Canvas-local position of a pointer event captured at window scope.
///
/// Window-scoped listeners keep a drag alive after the pointer leaves the
/// canvas, but their `offset_x`/`offset_y` are relative to whatever element
/// the pointer happens to be over, so the position is derived from client
/// coordinates and the canvas bounding rect instead.
#[cfg(feature = "csr")]
pub fn window_pointer_point(ev: &web_sys::PointerEvent, canvas: &web_sys::HtmlCanvasElement) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        f64::from(ev.client_x()) - rect.left(),
        f64::from(ev.client_y()) - rect.top(),
    )
}
