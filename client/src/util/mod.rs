//! DOM-to-engine mapping helpers shared by the viewport host.

pub mod input;
pub mod viewport;
