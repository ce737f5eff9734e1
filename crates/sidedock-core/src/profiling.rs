//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are compiled in everywhere but only record once enabled with
//! [`set_enabled`]. Hosts that run a puffin viewer call [`new_frame`] once
//! per UI frame.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Turn scope recording on or off.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
    tracing::info!(enabled, "puffin scopes toggled");
}

/// Whether scopes are currently recorded.
pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Mark the start of a new profiling frame.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
