use super::*;

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

fn scene_with(tokens: Vec<Token>) -> SceneStore {
    let mut scene = SceneStore::new();
    for t in tokens {
        scene.insert(t);
    }
    scene
}

#[test]
fn hits_point_inside_footprint() {
    // Grid size 70: token at (2, 2) spans world [140, 210] on both axes.
    let scene = scene_with(vec![token("t1", 2.0, 2.0, 1.0)]);
    let hit = token_at(Point::new(175.0, 175.0), &scene);
    assert_eq!(hit.map(|t| t.id.as_str()), Some("t1"));
}

#[test]
fn misses_point_outside_footprint() {
    let scene = scene_with(vec![token("t1", 2.0, 2.0, 1.0)]);
    assert!(token_at(Point::new(139.0, 175.0), &scene).is_none());
    assert!(token_at(Point::new(175.0, 211.0), &scene).is_none());
}

#[test]
fn footprint_edges_are_inclusive() {
    let scene = scene_with(vec![token("t1", 2.0, 2.0, 1.0)]);
    assert!(token_at(Point::new(140.0, 140.0), &scene).is_some());
    assert!(token_at(Point::new(210.0, 210.0), &scene).is_some());
}

#[test]
fn larger_footprint_scales_with_size() {
    // Size 2 spans two cells: world [70, 210].
    let scene = scene_with(vec![token("big", 1.0, 1.0, 2.0)]);
    assert!(token_at(Point::new(205.0, 205.0), &scene).is_some());
    assert!(token_at(Point::new(215.0, 205.0), &scene).is_none());
}

#[test]
fn topmost_token_wins_on_overlap() {
    // Same footprint; "b" draws after "a", so it is on top.
    let scene = scene_with(vec![token("a", 2.0, 2.0, 1.0), token("b", 2.0, 2.0, 1.0)]);
    let hit = token_at(Point::new(175.0, 175.0), &scene);
    assert_eq!(hit.map(|t| t.id.as_str()), Some("b"));
}

#[test]
fn empty_scene_hits_nothing() {
    let scene = SceneStore::new();
    assert!(token_at(Point::new(0.0, 0.0), &scene).is_none());
}
