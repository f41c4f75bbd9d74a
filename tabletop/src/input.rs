//! Input model: mouse buttons, wheel deltas, and the gesture state machine.
//!
//! `DragState` is the active gesture being tracked between pointer-down and
//! pointer-up. It carries the fixed anchors needed to recompute the camera
//! or token position from the total pointer delta on every move event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::scene::TokenId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The active gesture between pointer-down and pointer-up.
///
/// Ephemeral by contract: never stored in the scene, never synchronized,
/// reset on every pointer-up. At most one gesture is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view.
    Panning {
        /// Screen position of the pointer at the down event. Fixed for the
        /// whole gesture; moves recompute the pan from the total delta
        /// rather than accumulating per-event increments.
        anchor_screen: Point,
        /// Camera pan offset at the down event.
        anchor_pan: Point,
    },
    /// Dragging a token across the grid.
    DraggingToken {
        /// Id of the token being dragged.
        id: TokenId,
        /// World-space delta from the token origin to the pointer at the
        /// down event, so the token keeps its grip point under the cursor.
        grab_offset: Point,
    },
}
