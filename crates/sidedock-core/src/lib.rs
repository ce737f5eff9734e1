//! Sidedock Core
//!
//! Shared utilities for the sidedock layout engine: logging bootstrap,
//! profiling scopes, integer geometry and fast hash collections.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
