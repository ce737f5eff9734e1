//! Hash collections used across sidedock.
//!
//! Re-exports the AHash-backed map. Use these for lookups where
//! iteration order does not matter; ordered registries use `indexmap`.

pub use ahash::AHashMap as HashMap;
