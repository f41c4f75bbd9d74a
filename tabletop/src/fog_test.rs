#![allow(clippy::float_cmp)]

use super::*;

use crate::consts::DEFAULT_GRID_SIZE;
use crate::scene::Token;

fn token(id: &str, x: f64, y: f64, size: f64) -> Token {
    Token {
        id: id.to_owned(),
        name: String::new(),
        x,
        y,
        size,
        color: "#ef4444".to_owned(),
        hp: None,
    }
}

#[test]
fn vision_radius_is_three_cells() {
    assert_eq!(vision_radius_world(DEFAULT_GRID_SIZE), 3.0 * DEFAULT_GRID_SIZE);
    assert_eq!(vision_radius_world(50.0), 150.0);
}

#[test]
fn token_center_is_middle_of_footprint() {
    let center = token_center_world(&token("t1", 2.0, 2.0, 1.0), 70.0);
    assert_eq!(center, Point::new(175.0, 175.0));
}

#[test]
fn token_center_scales_with_size() {
    let center = token_center_world(&token("big", 1.0, 1.0, 2.0), 70.0);
    assert_eq!(center, Point::new(140.0, 140.0));
}

#[test]
fn token_center_follows_fractional_positions() {
    let center = token_center_world(&token("t1", 2.5, -0.5, 1.0), 70.0);
    assert_eq!(center, Point::new(210.0, 0.0));
}

#[test]
fn mask_geometry_is_a_pure_function_of_inputs() {
    let t = token("t1", 3.0, 4.0, 1.0);
    let a = token_center_world(&t, DEFAULT_GRID_SIZE);
    let b = token_center_world(&t, DEFAULT_GRID_SIZE);
    assert_eq!(a, b);
    assert_eq!(
        vision_radius_world(DEFAULT_GRID_SIZE),
        vision_radius_world(DEFAULT_GRID_SIZE)
    );
}
