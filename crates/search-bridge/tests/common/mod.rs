//! Test infrastructure for the search bridge.
//!
//! Provides record fixtures, a recording transport and an in-memory record
//! store so the engine can be exercised without a running search cluster.

#![allow(dead_code)]

pub mod doubles;
pub mod fixtures;

pub use doubles::*;
pub use fixtures::*;
