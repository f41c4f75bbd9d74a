use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_equality() {
    assert_eq!(Button::Primary, Button::Primary);
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Middle, Button::Secondary);
}

#[test]
fn button_all_variants_distinct() {
    let variants = [Button::Primary, Button::Middle, Button::Secondary];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

// =============================================================
// WheelDelta
// =============================================================

#[test]
fn wheel_delta_values() {
    let w = WheelDelta { dx: 1.5, dy: -3.0 };
    assert!((w.dx - 1.5).abs() < f64::EPSILON);
    assert!((w.dy + 3.0).abs() < f64::EPSILON);
}

#[test]
fn wheel_delta_is_copy() {
    let a = WheelDelta { dx: 1.0, dy: 2.0 };
    let b = a;
    assert!((a.dx - b.dx).abs() < f64::EPSILON);
}

// =============================================================
// DragState
// =============================================================

#[test]
fn drag_state_default_is_idle() {
    assert_eq!(DragState::default(), DragState::Idle);
}

#[test]
fn drag_state_panning_carries_fixed_anchors() {
    let state = DragState::Panning {
        anchor_screen: Point::new(100.0, 100.0),
        anchor_pan: Point::new(0.0, 0.0),
    };
    let DragState::Panning { anchor_screen, anchor_pan } = state else {
        panic!("expected Panning");
    };
    assert_eq!(anchor_screen, Point::new(100.0, 100.0));
    assert_eq!(anchor_pan, Point::new(0.0, 0.0));
}

#[test]
fn drag_state_dragging_token_carries_grab_offset() {
    let state = DragState::DraggingToken {
        id: "t1".to_owned(),
        grab_offset: Point::new(12.0, -3.0),
    };
    let DragState::DraggingToken { id, grab_offset } = state else {
        panic!("expected DraggingToken");
    };
    assert_eq!(id, "t1");
    assert_eq!(grab_offset, Point::new(12.0, -3.0));
}
