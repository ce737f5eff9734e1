//! Cosmetic visual-state flags for the renderer.
//!
//! The engine toggles these at gesture boundaries so the renderer can pick
//! styles (drag cursors, translucency while placing). They never affect layout.

use bitflags::bitflags;

bitflags! {
    /// Visual state of a single panel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelVisualFlags: u8 {
        const NONE          = 0;
        /// Panel renders in its compact form.
        const MINIMIZED     = 1 << 0;
        /// Panel has no height handles.
        const FIXED_HEIGHT  = 1 << 1;
        /// Panel follows the pointer during a placement drag.
        const PLACING       = 1 << 2;
        /// Width handle is being dragged.
        const WIDTH_DRAG    = 1 << 3;
        /// Height handle is being dragged.
        const HEIGHT_DRAG   = 1 << 4;
        /// Corner handle is being dragged.
        const CORNER_DRAG   = 1 << 5;
    }
}

impl PanelVisualFlags {
    /// Flags that only live for the duration of a gesture.
    pub const GESTURE: Self = Self::PLACING
        .union(Self::WIDTH_DRAG)
        .union(Self::HEIGHT_DRAG)
        .union(Self::CORNER_DRAG);
}

bitflags! {
    /// Visual state of a container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContainerVisualFlags: u8 {
        const NONE      = 0;
        /// A panel of this container is being resized or placed.
        const DRAGGING  = 1 << 0;
    }
}
