//! Feed module
//!
//! RSS 2.0 rendering on top of a minimal XML builder.

pub mod renderer;
pub mod xml;

pub use renderer::{render_feed, render_item, RSS_CONTENT_TYPE};
