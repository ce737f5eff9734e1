//! Renderer-facing frame snapshots.
//!
//! The engine never paints. After a mutation the host pulls
//! [`LayoutSystem::frames`](crate::LayoutSystem::frames) or pushes them into a
//! [`LayoutRenderer`] and applies the geometry to its own widgets. All
//! coordinates are measured from the container's anchored edge.

use crate::config::LayoutConfig;
use crate::container::Container;
use crate::highlight::PlacingHighlight;
use crate::panel::Panel;
use crate::types::{AnchorSide, ContainerId, HostArea, Orientation, PanelId};
use crate::visual::{ContainerVisualFlags, PanelVisualFlags};

/// Geometry and state of one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    pub id: PanelId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Height left for content below the header.
    pub content_height: i32,
    pub minimized: bool,
    pub fixed_height: bool,
    pub flags: PanelVisualFlags,
}

impl PanelFrame {
    fn new(id: PanelId, panel: &Panel, layout: &LayoutConfig) -> Self {
        let bounds = panel.bounds(layout);
        Self {
            id,
            name: panel.name().to_string(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            content_height: panel.content_height(layout),
            minimized: panel.is_minimized(),
            fixed_height: panel.is_fixed_height(),
            flags: panel.flags(),
        }
    }
}

/// Placement preview bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightFrame {
    pub visible: bool,
    pub orientation: Orientation,
    pub offset: i32,
    pub top: i32,
    pub length: i32,
}

impl From<&PlacingHighlight> for HighlightFrame {
    fn from(highlight: &PlacingHighlight) -> Self {
        Self {
            visible: highlight.visible,
            orientation: highlight.orientation,
            offset: highlight.offset,
            top: highlight.top,
            length: highlight.length,
        }
    }
}

/// Everything a renderer needs to draw one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFrame {
    pub id: ContainerId,
    pub name: String,
    pub anchor: AnchorSide,
    pub host: HostArea,
    pub content_height: i32,
    pub flags: ContainerVisualFlags,
    /// Owned panels in visual order.
    pub panels: Vec<PanelFrame>,
    pub highlight: HighlightFrame,
}

impl ContainerFrame {
    pub(crate) fn new(id: ContainerId, container: &Container, panels: &[Panel], layout: &LayoutConfig) -> Self {
        Self {
            id,
            name: container.name().to_string(),
            anchor: container.anchor(),
            host: container.host(),
            content_height: container.content_height(),
            flags: container.flags(),
            panels: container
                .panels()
                .iter()
                .map(|&panel| PanelFrame::new(panel, &panels[panel.index()], layout))
                .collect(),
            highlight: container.highlight().into(),
        }
    }

    pub fn panel(&self, name: &str) -> Option<&PanelFrame> {
        self.panels.iter().find(|p| p.name == name)
    }
}

/// Sink for container frames, implemented by the host's view layer.
pub trait LayoutRenderer {
    fn apply(&mut self, frame: &ContainerFrame);
}

impl<F: FnMut(&ContainerFrame)> LayoutRenderer for F {
    fn apply(&mut self, frame: &ContainerFrame) {
        self(frame)
    }
}
