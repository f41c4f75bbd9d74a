//! Network layer: the WebSocket transport adapter.

pub mod socket;
