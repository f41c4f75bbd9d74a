//! Hit-testing pointer positions against token footprints.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::scene::{SceneStore, Token};

/// The topmost token whose axis-aligned footprint contains `world_pt`.
///
/// A token occupies the world-pixel square from its grid origin spanning
/// `size` cells. Draw order paints later tokens on top, so the scan keeps
/// the last match.
#[must_use]
pub fn token_at<'a>(world_pt: Point, scene: &'a SceneStore) -> Option<&'a Token> {
    let grid_size = scene.grid_size();
    let mut hit = None;
    for token in scene.sorted_tokens() {
        if footprint_contains(token, grid_size, world_pt) {
            hit = Some(token);
        }
    }
    hit
}

fn footprint_contains(token: &Token, grid_size: f64, world_pt: Point) -> bool {
    let min_x = token.x * grid_size;
    let min_y = token.y * grid_size;
    let side = token.size * grid_size;
    world_pt.x >= min_x && world_pt.x <= min_x + side && world_pt.y >= min_y && world_pt.y <= min_y + side
}
