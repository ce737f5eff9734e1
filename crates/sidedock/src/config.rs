//! Layout configuration.
//!
//! [`LayoutConfig`] holds the engine-wide constants (header height, hit
//! padding, thresholds). Hosts either build it with the setters or load it
//! from JSON. [`ContainerConfig`] and [`PanelConfig`] describe the objects
//! registered with [`LayoutSystem`](crate::LayoutSystem).

use crate::types::{AnchorSide, HostArea};
use serde::{Deserialize, Serialize};

/// Default height of a panel header in layout units.
pub const DEFAULT_HEADER_HEIGHT: i32 = 24;
/// Default vertical padding around the panel content.
pub const DEFAULT_VERTICAL_PADDING: i32 = 2;
/// Smallest width a panel can be resized to.
pub const DEFAULT_MIN_PANEL_WIDTH: i32 = 120;
/// Gap kept between the widest panel and the far edge of the host.
pub const DEFAULT_MAX_WIDTH_MARGIN: i32 = 50;
/// Hit-test tolerance around panels during placement drags.
pub const DEFAULT_HIT_PADDING: i32 = 32;
/// Width of the capture zone along the anchored edge of an empty container.
pub const DEFAULT_EMPTY_CAPTURE_WIDTH: i32 = 300;
/// Manhattan distance a header press must travel before it becomes a placement drag.
pub const DEFAULT_DRAG_THRESHOLD: i32 = 12;
pub const DEFAULT_PANEL_WIDTH: i32 = 300;
pub const DEFAULT_PANEL_HEIGHT: i32 = 100;
/// Highlight height for an empty container whose host reports no height.
pub const DEFAULT_FALLBACK_HIGHLIGHT_HEIGHT: i32 = 300;
pub const DEFAULT_STORAGE_KEY: &str = "sidedock.layout";

/// Engine-wide layout constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of the panel header, also the compact height of minimized panels.
    pub header_height: i32,
    /// Vertical padding between the panel frame and its content.
    pub vertical_padding: i32,
    pub min_panel_width: i32,
    pub max_width_margin: i32,
    pub hit_padding: i32,
    pub empty_capture_width: i32,
    pub drag_threshold: i32,
    pub default_panel_width: i32,
    pub default_panel_height: i32,
    pub fallback_highlight_height: i32,
    /// Save the layout after every completed pointer gesture.
    pub autosave: bool,
    /// Key the layout state is stored under.
    pub storage_key: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            min_panel_width: DEFAULT_MIN_PANEL_WIDTH,
            max_width_margin: DEFAULT_MAX_WIDTH_MARGIN,
            hit_padding: DEFAULT_HIT_PADDING,
            empty_capture_width: DEFAULT_EMPTY_CAPTURE_WIDTH,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            default_panel_width: DEFAULT_PANEL_WIDTH,
            default_panel_height: DEFAULT_PANEL_HEIGHT,
            fallback_highlight_height: DEFAULT_FALLBACK_HIGHLIGHT_HEIGHT,
            autosave: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set the header height and content padding reported by the renderer.
    pub fn chrome(mut self, header_height: i32, vertical_padding: i32) -> Self {
        self.header_height = header_height;
        self.vertical_padding = vertical_padding;
        self
    }

    /// Set the minimum panel width and the far-edge margin.
    pub fn width_bounds(mut self, min_panel_width: i32, max_width_margin: i32) -> Self {
        self.min_panel_width = min_panel_width;
        self.max_width_margin = max_width_margin;
        self
    }

    /// Set the hit-test tolerance.
    pub fn hit_padding(mut self, padding: i32) -> Self {
        self.hit_padding = padding;
        self
    }

    /// Set the empty-container capture width.
    pub fn empty_capture_width(mut self, width: i32) -> Self {
        self.empty_capture_width = width;
        self
    }

    /// Set the click/drag threshold.
    pub fn drag_threshold(mut self, threshold: i32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the size used for panels that do not configure one.
    pub fn default_panel_size(mut self, width: i32, height: i32) -> Self {
        self.default_panel_width = width;
        self.default_panel_height = height;
        self
    }

    /// Enable or disable autosave.
    pub fn autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Set the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Height of the frame around the content (header plus padding).
    pub fn chrome_height(&self) -> i32 {
        self.header_height + self.vertical_padding
    }
}

/// Registration parameters for a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    #[serde(default)]
    pub anchor_side: AnchorSide,
    /// Row width minimized panels accumulate before wrapping.
    #[serde(default)]
    pub flow_width_threshold: i32,
    #[serde(default)]
    pub host: HostArea,
}

impl ContainerConfig {
    pub fn new(name: impl Into<String>, anchor_side: AnchorSide) -> Self {
        Self {
            name: name.into(),
            anchor_side,
            flow_width_threshold: 0,
            host: HostArea::default(),
        }
    }

    pub fn left(name: impl Into<String>) -> Self {
        Self::new(name, AnchorSide::Left)
    }

    pub fn right(name: impl Into<String>) -> Self {
        Self::new(name, AnchorSide::Right)
    }

    pub fn flow_width_threshold(mut self, threshold: i32) -> Self {
        self.flow_width_threshold = threshold;
        self
    }

    pub fn host(mut self, host: HostArea) -> Self {
        self.host = host;
        self
    }
}

/// Content measurements the renderer supplies for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMetrics {
    /// Width of the compact rendering used while minimized.
    pub minimized_width: i32,
    /// Natural height of a fixed-height panel.
    pub intrinsic_height: i32,
}

/// Registration parameters for a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    #[serde(default)]
    pub fixed_height: bool,
    #[serde(default)]
    pub default_width: Option<i32>,
    #[serde(default)]
    pub default_height: Option<i32>,
    #[serde(default)]
    pub minimized_width: Option<i32>,
    #[serde(default)]
    pub intrinsic_height: Option<i32>,
}

impl PanelConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_height: false,
            default_width: None,
            default_height: None,
            minimized_width: None,
            intrinsic_height: None,
        }
    }

    /// Mark the panel as fixed-height with the given natural height.
    pub fn fixed_height(mut self, intrinsic_height: i32) -> Self {
        self.fixed_height = true;
        self.intrinsic_height = Some(intrinsic_height);
        self
    }

    pub fn default_width(mut self, width: i32) -> Self {
        self.default_width = Some(width);
        self
    }

    pub fn default_height(mut self, height: i32) -> Self {
        self.default_height = Some(height);
        self
    }

    pub fn default_size(self, width: i32, height: i32) -> Self {
        self.default_width(width).default_height(height)
    }

    pub fn minimized_width(mut self, width: i32) -> Self {
        self.minimized_width = Some(width);
        self
    }

    /// Resolve the renderer metrics, filling gaps from the layout config.
    pub(crate) fn metrics(&self, layout: &LayoutConfig) -> PanelMetrics {
        PanelMetrics {
            minimized_width: self.minimized_width.unwrap_or(layout.min_panel_width),
            intrinsic_height: self
                .intrinsic_height
                .unwrap_or(layout.default_panel_height),
        }
    }
}
