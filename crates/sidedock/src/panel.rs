//! Sizing and state model for a single dockable panel.
//!
//! A [`Panel`] stores the last explicitly set width and height and its
//! minimized state. Its position is derived: the owning container's reflow
//! rewrites it, and a placement drag overrides it temporarily. Operations
//! that need the owner (clamping against the host width, reflowing) live on
//! [`LayoutSystem`](crate::LayoutSystem); this type only holds the local
//! transitions.

use crate::config::{LayoutConfig, PanelConfig, PanelMetrics};
use crate::persistence::PanelRecord;
use crate::types::ContainerId;
use crate::visual::PanelVisualFlags;
use sidedock_core::geometry::{Pos, Rect, Size};

#[derive(Debug, Clone)]
pub struct Panel {
    name: String,
    pub(crate) container: Option<ContainerId>,
    width: i32,
    height: i32,
    minimized: bool,
    fixed_height: bool,
    position: Option<Pos<i32>>,
    metrics: PanelMetrics,
    pub(crate) flags: PanelVisualFlags,
}

impl Panel {
    pub(crate) fn new(config: &PanelConfig, layout: &LayoutConfig) -> Self {
        let metrics = config.metrics(layout);
        let height = if config.fixed_height {
            metrics.intrinsic_height
        } else {
            layout.default_panel_height
        };
        let mut flags = PanelVisualFlags::NONE;
        flags.set(PanelVisualFlags::FIXED_HEIGHT, config.fixed_height);
        Self {
            name: config.name.clone(),
            container: None,
            width: layout.default_panel_width,
            height,
            minimized: false,
            fixed_height: config.fixed_height,
            position: None,
            metrics,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current owner, `None` while detached.
    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Stored width, kept while minimized so it can be restored.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Stored height.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_fixed_height(&self) -> bool {
        self.fixed_height
    }

    pub fn metrics(&self) -> PanelMetrics {
        self.metrics
    }

    pub fn flags(&self) -> PanelVisualFlags {
        self.flags
    }

    /// Position relative to the owner's anchored edge; the origin if none was computed.
    pub fn position(&self) -> Pos<i32> {
        self.position.unwrap_or_default()
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// Width as laid out. Minimized panels use their compact width.
    pub fn rendered_width(&self) -> i32 {
        if self.minimized {
            self.metrics.minimized_width
        } else {
            self.width
        }
    }

    /// Height as laid out.
    ///
    /// Fixed-height panels always use their intrinsic height; other minimized
    /// panels collapse to the header.
    pub fn rendered_height(&self, layout: &LayoutConfig) -> i32 {
        if self.fixed_height {
            self.metrics.intrinsic_height
        } else if self.minimized {
            layout.chrome_height()
        } else {
            self.height
        }
    }

    /// Height available to the panel content below the header.
    pub fn content_height(&self, layout: &LayoutConfig) -> i32 {
        (self.rendered_height(layout) - layout.chrome_height()).max(0)
    }

    pub fn bounds(&self, layout: &LayoutConfig) -> Rect<i32> {
        Rect::from_pos_size(
            self.position(),
            Size::new(self.rendered_width(), self.rendered_height(layout)),
        )
    }

    /// Clamp and store a width. Returns whether the change is visible (not minimized).
    pub(crate) fn store_width(&mut self, width: i32, min: i32, max: i32) -> bool {
        // `max` may drop below `min` on narrow hosts; the minimum wins.
        self.width = width.min(max).max(min);
        !self.minimized
    }

    /// Store a height. Returns `false` for fixed-height panels, which ignore it.
    pub(crate) fn store_height(&mut self, height: i32) -> bool {
        if self.fixed_height {
            return false;
        }
        self.height = height;
        true
    }

    /// Switch minimized state. Returns `false` when the state is unchanged.
    pub(crate) fn set_minimized(&mut self, minimized: bool) -> bool {
        if self.minimized == minimized {
            return false;
        }
        self.minimized = minimized;
        self.flags.set(PanelVisualFlags::MINIMIZED, minimized);
        true
    }

    pub(crate) fn set_metrics(&mut self, metrics: PanelMetrics) {
        self.metrics = metrics;
    }

    pub(crate) fn set_position(&mut self, position: Pos<i32>) {
        self.position = Some(position);
    }

    /// Drop the position override so stale geometry is not shown before the next reflow.
    pub(crate) fn clear_position(&mut self) {
        self.position = None;
    }

    pub fn save_data(&self) -> PanelRecord {
        PanelRecord {
            name: self.name.clone(),
            minimized: self.minimized,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutConfig {
        LayoutConfig::default().chrome(24, 2)
    }

    #[test]
    fn test_new_panel_defaults() {
        let panel = Panel::new(&PanelConfig::new("explorer"), &layout());
        assert_eq!(panel.name(), "explorer");
        assert_eq!(panel.width(), 300);
        assert_eq!(panel.height(), 100);
        assert!(!panel.is_minimized());
        assert!(panel.container().is_none());
        assert!(!panel.has_position());
    }

    #[test]
    fn test_store_width_clamps() {
        let mut panel = Panel::new(&PanelConfig::new("p"), &layout());
        assert!(panel.store_width(10, 120, 750));
        assert_eq!(panel.width(), 120);
        panel.store_width(5000, 120, 750);
        assert_eq!(panel.width(), 750);
        panel.store_width(400, 120, 60);
        assert_eq!(panel.width(), 120);
    }

    #[test]
    fn test_fixed_height_ignores_height() {
        let config = PanelConfig::new("toolbar").fixed_height(40);
        let mut panel = Panel::new(&config, &layout());
        assert!(!panel.store_height(500));
        assert_eq!(panel.height(), 40);
        assert_eq!(panel.rendered_height(&layout()), 40);
        assert!(panel.flags().contains(PanelVisualFlags::FIXED_HEIGHT));
    }

    #[test]
    fn test_minimized_rendering() {
        let mut panel = Panel::new(&PanelConfig::new("p").minimized_width(80), &layout());
        panel.store_width(420, 120, 750);
        assert!(panel.set_minimized(true));
        assert!(!panel.set_minimized(true));
        assert_eq!(panel.rendered_width(), 80);
        assert_eq!(panel.rendered_height(&layout()), 26);
        assert_eq!(panel.content_height(&layout()), 0);
        // Stored width survives for restore.
        assert_eq!(panel.width(), 420);
        assert!(!panel.store_width(500, 120, 750));
        assert_eq!(panel.width(), 500);
    }

    #[test]
    fn test_content_height() {
        let mut panel = Panel::new(&PanelConfig::new("p"), &layout());
        panel.store_height(180);
        assert_eq!(panel.content_height(&layout()), 154);
    }

    #[test]
    fn test_clear_position() {
        let mut panel = Panel::new(&PanelConfig::new("p"), &layout());
        panel.set_position(Pos::new(0, 120));
        assert_eq!(panel.position(), Pos::new(0, 120));
        panel.clear_position();
        assert!(!panel.has_position());
        assert_eq!(panel.position(), Pos::new(0, 0));
    }
}
