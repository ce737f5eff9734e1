//! Edge-anchored panel container.
//!
//! A [`Container`] owns an ordered sequence of panel ids. The order is the
//! visual order and the persisted order: expanded panels stack top to bottom
//! and each run of consecutive minimized panels packs into horizontal rows
//! that wrap at the container's flow width threshold.
//!
//! Minimized rows are laid out so that the collection order reads left to
//! right on screen. Since x is measured from the anchored edge, right-anchored
//! containers lay their rows out in reverse collection order.

use crate::config::{ContainerConfig, LayoutConfig};
use crate::highlight::PlacingHighlight;
use crate::panel::Panel;
use crate::types::{AnchorSide, HostArea, PanelId};
use crate::visual::ContainerVisualFlags;
use sidedock_core::geometry::Pos;
use sidedock_core::math::IVec2;
use sidedock_core::profiling::profile_function;

#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    anchor: AnchorSide,
    flow_width_threshold: i32,
    host: HostArea,
    pub(crate) panels: Vec<PanelId>,
    highlight: PlacingHighlight,
    content_height: i32,
    pub(crate) flags: ContainerVisualFlags,
}

impl Container {
    pub(crate) fn new(config: &ContainerConfig) -> Self {
        Self {
            name: config.name.clone(),
            anchor: config.anchor_side,
            flow_width_threshold: config.flow_width_threshold,
            host: config.host,
            panels: Vec::new(),
            highlight: PlacingHighlight::hidden(),
            content_height: 0,
            flags: ContainerVisualFlags::NONE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor(&self) -> AnchorSide {
        self.anchor
    }

    pub fn flow_width_threshold(&self) -> i32 {
        self.flow_width_threshold
    }

    pub fn host(&self) -> HostArea {
        self.host
    }

    /// Panels in visual order.
    pub fn panels(&self) -> &[PanelId] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn index_of(&self, panel: PanelId) -> Option<usize> {
        self.panels.iter().position(|&p| p == panel)
    }

    pub fn highlight(&self) -> &PlacingHighlight {
        &self.highlight
    }

    /// Total height covered by the last reflow.
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    pub fn flags(&self) -> ContainerVisualFlags {
        self.flags
    }

    /// Width of the layout parent. Panel widths are bounded by it.
    pub fn max_width(&self) -> i32 {
        self.host.size.width
    }

    pub(crate) fn set_host(&mut self, host: HostArea) {
        self.host = host;
    }

    /// Remove a panel from the sequence, returning the index it occupied.
    pub(crate) fn remove_panel(&mut self, panel: PanelId) -> Option<usize> {
        let index = self.index_of(panel)?;
        self.panels.remove(index);
        Some(index)
    }

    /// Insert a panel, appending when `index` is past the end. Returns the final index.
    pub(crate) fn insert_panel(&mut self, index: usize, panel: PanelId) -> usize {
        if index < self.panels.len() {
            self.panels.insert(index, panel);
            index
        } else {
            self.panels.push(panel);
            self.panels.len() - 1
        }
    }

    pub(crate) fn take_panels(&mut self) -> Vec<PanelId> {
        std::mem::take(&mut self.panels)
    }

    /// Recompute the position of every owned panel.
    ///
    /// Single pass keeping a vertical cursor. Expanded panels are placed at
    /// the cursor across the full width. Minimized panels collect into a
    /// pending row that is flushed when an expanded panel follows or when the
    /// next minimized panel would push the row past the flow width threshold.
    /// A row always holds at least one panel.
    pub(crate) fn reorder_panels(&mut self, panels: &mut [Panel], layout: &LayoutConfig) {
        profile_function!();
        let mut top = 0;
        let mut row: Vec<PanelId> = Vec::new();
        let mut row_width = 0;
        let mut row_height = 0;

        for &id in &self.panels {
            let panel = &panels[id.index()];
            let minimized = panel.is_minimized();
            let width = panel.rendered_width();
            let height = panel.rendered_height(layout);

            if !row.is_empty() && (!minimized || row_width + width > self.flow_width_threshold) {
                self.layout_minimized_row(top, &row, panels);
                top += row_height;
                row.clear();
                row_width = 0;
            }

            if minimized {
                row.push(id);
                row_width += width;
                // Rows advance by the height of their last panel.
                row_height = height;
            } else {
                panels[id.index()].set_position(Pos::new(0, top));
                top += height;
            }
        }

        if !row.is_empty() {
            self.layout_minimized_row(top, &row, panels);
            top += row_height;
        }
        self.content_height = top;
        tracing::trace!(container = %self.name, panels = self.panels.len(), height = top, "reflow");
    }

    fn layout_minimized_row(&self, top: i32, row: &[PanelId], panels: &mut [Panel]) {
        let mut x = 0;
        for i in 0..row.len() {
            let id = match self.anchor {
                AnchorSide::Left => row[i],
                AnchorSide::Right => row[row.len() - 1 - i],
            };
            let panel = &mut panels[id.index()];
            panel.set_position(Pos::new(x, top));
            x += panel.rendered_width();
        }
    }

    /// Find where `dragged` would be inserted for a pointer in host coordinates.
    ///
    /// Returns `None` when the pointer is not over a valid target or when the
    /// insertion would leave the dragged panel where it already is.
    pub fn placing_index(
        &self,
        pointer: IVec2,
        dragged: PanelId,
        panels: &[Panel],
        layout: &LayoutConfig,
    ) -> Option<usize> {
        let local = self.host.to_local(pointer, self.anchor);
        if self.panels.is_empty() {
            return (local.x < layout.empty_capture_width).then_some(0);
        }

        let mut dest = None;
        for (i, &id) in self.panels.iter().enumerate() {
            if id == dragged {
                continue;
            }
            let panel = &panels[id.index()];
            let bounds = panel.bounds(layout);
            let minimized = panel.is_minimized();
            let (pad_x, pad_y) = if minimized {
                (layout.hit_padding, 0)
            } else {
                (0, layout.hit_padding)
            };
            if !bounds.inflate(pad_x, pad_y).contains(local) {
                continue;
            }

            // Compare against the midpoint without truncating odd sizes.
            let before = if minimized {
                2 * local.x < 2 * bounds.x + bounds.width
            } else {
                2 * local.y < 2 * bounds.y + bounds.height
            };
            // Right-anchored rows run against the collection order.
            let reversed = minimized && self.anchor.is_right();
            dest = Some(if before != reversed { i } else { i + 1 });
            break;
        }

        let dest = dest?;
        let holds_dragged = |index: usize| self.panels.get(index) == Some(&dragged);
        if holds_dragged(dest) || (dest > 0 && holds_dragged(dest - 1)) {
            return None;
        }
        Some(dest)
    }

    /// Show the preview bar for inserting `dragged_minimized` at `index`.
    ///
    /// The bar sits before the panel at `index`. At the end of the sequence,
    /// or where the minimized state changes, it sits after the previous panel
    /// instead.
    pub(crate) fn show_placing_highlight(
        &mut self,
        index: usize,
        dragged_minimized: bool,
        panels: &[Panel],
        layout: &LayoutConfig,
    ) {
        if self.panels.is_empty() {
            let height = if self.host.size.height > 0 {
                self.host.size.height
            } else {
                layout.fallback_highlight_height
            };
            self.highlight = PlacingHighlight::vertical(0, 0, 0, height);
            return;
        }

        let mut anchor_index = index.min(self.panels.len());
        let mut end = false;
        if anchor_index == self.panels.len()
            || (anchor_index > 0
                && dragged_minimized != panels[self.panels[anchor_index].index()].is_minimized())
        {
            end = true;
            anchor_index -= 1;
        }

        let panel = &panels[self.panels[anchor_index].index()];
        let bounds = panel.bounds(layout);
        self.highlight = if panel.is_minimized() {
            // The trailing edge of a minimized panel is on the far side for left anchoring.
            let offset = if end == self.anchor.is_left() {
                bounds.right()
            } else {
                bounds.x
            };
            PlacingHighlight::vertical(index, offset, bounds.y, bounds.height)
        } else {
            let top = if end { bounds.bottom() } else { bounds.y };
            PlacingHighlight::horizontal(index, bounds.x, top, bounds.width)
        };
    }

    pub(crate) fn clear_placing_highlight(&mut self) {
        self.highlight.hide();
    }
}
