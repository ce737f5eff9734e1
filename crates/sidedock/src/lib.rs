//! Sidedock - edge-anchored dockable panel layout engine
//!
//! This crate computes the layout of panels docked against the left or right
//! edge of a host view:
//! - Expanded panels stack vertically, minimized panels pack into wrapping rows
//! - Resizing through width, height and corner handles
//! - Drag-and-drop reordering within and across containers
//! - Click-to-minimize on the panel header
//! - Serializable layout state with pluggable storage
//!
//! The engine never paints. A renderer forwards pointer events and applies
//! the [`ContainerFrame`]s the engine produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use sidedock::{ContainerConfig, DragHandle, HostArea, LayoutConfig, LayoutSystem, PanelConfig};
//! use sidedock_core::math::IVec2;
//!
//! let mut layout = LayoutSystem::new(LayoutConfig::default());
//! let left = layout
//!     .add_container(ContainerConfig::left("left").host(HostArea::sized(1280, 720)))
//!     .unwrap();
//! let files = layout.add_panel(left, PanelConfig::new("files")).unwrap();
//! layout.add_panel(left, PanelConfig::new("outline")).unwrap();
//!
//! // A click on the header minimizes the panel.
//! layout.pointer_down(files, DragHandle::Header, IVec2::new(10, 5)).unwrap();
//! layout.pointer_up(IVec2::new(10, 5)).unwrap();
//! assert!(layout.panel(files).unwrap().is_minimized());
//!
//! // Apply frame.panels and frame.highlight to the host widgets.
//! let frames = layout.frames();
//! assert_eq!(frames[0].panels.len(), 2);
//! ```

pub mod config;
pub mod container;
pub mod drag;
pub mod error;
pub mod events;
pub mod highlight;
pub mod panel;
pub mod persistence;
pub mod placement;
pub mod registry;
pub mod render;
pub mod system;
pub mod types;
pub mod visual;

pub use config::{ContainerConfig, LayoutConfig, PanelConfig, PanelMetrics};
pub use container::Container;
pub use drag::{DragController, DragHandle, DragKind, DragPhase, DragState, PointerEvent};
pub use error::{LayoutError, LayoutResult};
pub use events::{ListenerId, PanelChangeReason, PanelEvent, PanelListener};
pub use highlight::PlacingHighlight;
pub use panel::Panel;
pub use persistence::{FileStore, LayoutState, MemoryStore, PanelRecord, StateStore};
pub use placement::PlacementTarget;
pub use registry::PanelRegistry;
pub use render::{ContainerFrame, HighlightFrame, LayoutRenderer, PanelFrame};
pub use system::LayoutSystem;
pub use types::{AnchorSide, ContainerId, HostArea, Orientation, PanelId};
pub use visual::{ContainerVisualFlags, PanelVisualFlags};
