//! Test utilities
//!
//! Manual in-memory implementations of the port traits and fixtures for
//! service tests. Filesystem adapters are tested against temp directories
//! instead.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
