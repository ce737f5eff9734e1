//! Placement preview geometry.

use crate::types::Orientation;

/// Transient drop preview shown inside a container during a placement drag.
///
/// `offset` is measured from the container's anchored edge. `length` is the
/// bar height for [`Orientation::Vertical`] and the bar width for
/// [`Orientation::Horizontal`]. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacingHighlight {
    pub visible: bool,
    pub orientation: Orientation,
    pub offset: i32,
    pub top: i32,
    pub length: i32,
    /// Insertion index the preview stands for.
    pub index: usize,
}

impl PlacingHighlight {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn vertical(index: usize, offset: i32, top: i32, height: i32) -> Self {
        Self {
            visible: true,
            orientation: Orientation::Vertical,
            offset,
            top,
            length: height,
            index,
        }
    }

    pub fn horizontal(index: usize, offset: i32, top: i32, width: i32) -> Self {
        Self {
            visible: true,
            orientation: Orientation::Horizontal,
            offset,
            top,
            length: width,
            index,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
