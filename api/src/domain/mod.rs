//! Domain layer
//!
//! Contains the feed object model and the ports the pipeline depends on.
//! - `entities`: Per-request feed and item models
//! - `ports`: Trait definitions for upstream dependencies

pub mod entities;
pub mod ports;
