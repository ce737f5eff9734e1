//! Shared types for the layout engine.

use serde::{Deserialize, Serialize};
use sidedock_core::geometry::{Pos, Size};
use sidedock_core::math::IVec2;

/// Handle to a panel owned by a [`LayoutSystem`](crate::LayoutSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(pub(crate) u32);

impl PanelId {
    /// Registration index of the panel.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a container owned by a [`LayoutSystem`](crate::LayoutSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(pub(crate) u32);

impl ContainerId {
    /// Registration index of the container.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Host edge a container is docked against.
///
/// Panel x coordinates are measured from this edge, growing inwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    #[default]
    Left,
    Right,
}

impl AnchorSide {
    pub fn is_left(&self) -> bool {
        matches!(self, AnchorSide::Left)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, AnchorSide::Right)
    }

    /// Convert a screen-space horizontal delta into growth away from the anchored edge.
    pub fn inward(&self, dx: i32) -> i32 {
        match self {
            AnchorSide::Left => dx,
            AnchorSide::Right => -dx,
        }
    }
}

/// Orientation of a placement highlight bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Thin vertical bar between minimized panels of a row.
    #[default]
    Vertical,
    /// Thin horizontal bar between stacked panels.
    Horizontal,
}

/// The layout parent a container is positioned in.
///
/// Pointer positions arrive in host coordinates; `origin` is the parent's
/// offset in that space. The parent width bounds panel widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostArea {
    pub origin: Pos<i32>,
    pub size: Size<i32>,
}

impl HostArea {
    pub fn new(origin: Pos<i32>, size: Size<i32>) -> Self {
        Self { origin, size }
    }

    /// Host area at the origin with the given size.
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(Pos::new(0, 0), Size::new(width, height))
    }

    /// Transform a pointer into container-local space, mirroring x for right anchoring.
    pub fn to_local(&self, pointer: IVec2, anchor: AnchorSide) -> IVec2 {
        let mut local = pointer - IVec2::from(self.origin);
        if anchor.is_right() {
            local.x = self.size.width - local.x;
        }
        local
    }
}
