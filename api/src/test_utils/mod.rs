//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks instead of mockall: the port traits take `&str` and a
//! borrowed cancellation token, and the mocks also need to record timing
//! details (in-flight counts, received tokens) that tests assert on.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
