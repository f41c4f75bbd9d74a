//! Scene model: tokens, the map background, and the in-memory store.
//!
//! This module defines the data types that describe what is on the table
//! (`Token`, `MapBackground`) and the runtime store that owns them
//! (`SceneStore`). Data flows into this layer from the network (serde
//! deserialization) and from the input engine (mutations). The renderer
//! reads from `SceneStore` via `sorted_tokens` for a deterministic draw
//! order.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_SIZE, FALLBACK_MAP_HEIGHT, FALLBACK_MAP_WIDTH};

/// Unique identifier for a token. Assigned by the authority; immutable.
pub type TokenId = String;

/// Current and maximum hit points for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
}

impl HitPoints {
    /// Remaining fraction in `0.0..=1.0`; zero when `max` is not positive.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max <= 0 {
            return 0.0;
        }
        (f64::from(self.current) / f64::from(self.max)).clamp(0.0, 1.0)
    }
}

/// A positional token, as stored and as carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier for this token.
    pub id: TokenId,
    /// Display name.
    pub name: String,
    /// Grid-unit x of the token's top-left corner. Fractional while a drag
    /// is live, whole once settled.
    pub x: f64,
    /// Grid-unit y of the token's top-left corner.
    pub y: f64,
    /// Grid-unit footprint; a size of 1 covers one cell.
    pub size: f64,
    /// CSS color for the token disc.
    pub color: String,
    /// Hit points, when the token tracks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<HitPoints>,
}

/// Playable map bounds and optional background image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapBackground {
    pub url: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl MapBackground {
    /// Declared bounds in world pixels, falling back to the default extent
    /// when either dimension is zero.
    #[must_use]
    pub fn bounds_world(&self) -> (f64, f64) {
        if self.width == 0 || self.height == 0 {
            (f64::from(FALLBACK_MAP_WIDTH), f64::from(FALLBACK_MAP_HEIGHT))
        } else {
            (f64::from(self.width), f64::from(self.height))
        }
    }
}

/// In-memory store of the shared session state.
///
/// Tokens and the map background are synchronized with the authority; the
/// selection is local. The grid size is constant for the session.
pub struct SceneStore {
    tokens: HashMap<TokenId, Token>,
    selection: Option<TokenId>,
    grid_size: f64,
    map: MapBackground,
}

impl SceneStore {
    /// Create an empty store with the default grid size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            selection: None,
            grid_size: DEFAULT_GRID_SIZE,
            map: MapBackground::default(),
        }
    }

    /// World pixels per grid cell.
    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// The current map background.
    #[must_use]
    pub fn map(&self) -> &MapBackground {
        &self.map
    }

    /// Replace the map background.
    pub fn replace_map(&mut self, map: MapBackground) {
        self.map = map;
    }

    /// Insert or replace a token. An existing token with the same `id` is
    /// overwritten.
    pub fn insert(&mut self, token: Token) {
        self.tokens.insert(token.id.clone(), token);
    }

    /// Remove a token by id, returning it if it was present. A selection
    /// referencing the removed token is cleared.
    pub fn remove(&mut self, id: &str) -> Option<Token> {
        let removed = self.tokens.remove(id);
        if removed.is_some() && self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        removed
    }

    /// Return a reference to a token by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Update a token's grid position. Returns false when the token does
    /// not exist or the position is not finite.
    pub fn move_token(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Some(token) = self.tokens.get_mut(id) else {
            return false;
        };
        token.x = x;
        token.y = y;
        true
    }

    /// Set or clear the selection. Selecting an id with no matching token
    /// clears the selection instead, preserving the no-dangling invariant.
    pub fn select(&mut self, id: Option<TokenId>) {
        self.selection = id.filter(|id| self.tokens.contains_key(id));
    }

    /// The currently selected token id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Replace all tokens and the map background with an authoritative
    /// snapshot. The selection is re-validated against the new collection.
    pub fn load_snapshot(&mut self, tokens: Vec<Token>, map: MapBackground) {
        self.tokens.clear();
        for token in tokens {
            self.tokens.insert(token.id.clone(), token);
        }
        self.map = map;
        let selection = self.selection.take();
        self.select(selection);
    }

    /// All tokens sorted by id for a deterministic draw order.
    #[must_use]
    pub fn sorted_tokens(&self) -> Vec<&Token> {
        let mut tokens: Vec<&Token> = self.tokens.values().collect();
        tokens.sort_by(|a, b| a.id.cmp(&b.id));
        tokens
    }

    /// Number of tokens currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the store contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
