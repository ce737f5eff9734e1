//! Test utilities for sidedock.
//!
//! Shared fixtures for the integration tests and benches:
//!
//! - [`Fixture`] - a left and a right container on an 800x600 host
//! - [`EventRecorder`] - collects [`PanelEvent`]s from a listener
//! - [`FailingStore`] - a [`StateStore`] whose every call fails
//! - [`RecordingRenderer`] - keeps the last frame applied per container
//! - [`click`] / [`drag`] - scripted pointer gestures
//!
//! Recorders use `Mutex` for interior mutability so the listener closure and
//! the test can both hold a handle.

use parking_lot::Mutex;
use sidedock::{
    ContainerConfig, ContainerFrame, ContainerId, DragHandle, HostArea, LayoutConfig, LayoutRenderer,
    LayoutResult, LayoutSystem, PanelChangeReason, PanelConfig, PanelEvent, PanelId, StateStore,
};
use sidedock_core::math::IVec2;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const HOST_WIDTH: i32 = 800;
pub const HOST_HEIGHT: i32 = 600;

/// Layout config used by every fixture: 24 unit headers with 2 units of padding.
pub fn test_config() -> LayoutConfig {
    LayoutConfig::default().chrome(24, 2)
}

/// A system with a left and a right container sharing one 800x600 host.
pub struct Fixture {
    pub system: LayoutSystem,
    pub left: ContainerId,
    pub right: ContainerId,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        let mut system = LayoutSystem::new(config);
        let host = HostArea::sized(HOST_WIDTH, HOST_HEIGHT);
        let left = system
            .add_container(ContainerConfig::left("left").flow_width_threshold(200).host(host))
            .expect("left container");
        let right = system
            .add_container(ContainerConfig::right("right").flow_width_threshold(200).host(host))
            .expect("right container");
        Self {
            system,
            left,
            right,
        }
    }

    /// Add `count` default panels named `<prefix>0..` to a container.
    pub fn add_panels(&mut self, container: ContainerId, prefix: &str, count: usize) -> Vec<PanelId> {
        (0..count)
            .map(|i| {
                self.system
                    .add_panel(container, PanelConfig::new(format!("{}{}", prefix, i)).minimized_width(80))
                    .expect("panel registration")
            })
            .collect()
    }

    /// Panel names of a container in visual order.
    pub fn names(&self, container: ContainerId) -> Vec<String> {
        let system = &self.system;
        system
            .container(container)
            .expect("container")
            .panels()
            .iter()
            .map(|&id| system.panel(id).expect("panel").name().to_string())
            .collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Press and release the header without moving.
pub fn click(system: &mut LayoutSystem, panel: PanelId, at: IVec2) -> LayoutResult<()> {
    system.pointer_down(panel, DragHandle::Header, at)?;
    system.pointer_up(at)
}

/// Press a handle at `from`, move through `path`, release at the last point
/// (or at `from` when `path` is empty).
pub fn drag(
    system: &mut LayoutSystem,
    panel: PanelId,
    handle: DragHandle,
    from: IVec2,
    path: &[IVec2],
) -> LayoutResult<()> {
    system.pointer_down(panel, handle, from)?;
    for &pos in path {
        system.pointer_move(pos)?;
    }
    system.pointer_up(path.last().copied().unwrap_or(from))
}

/// Collects panel events. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<PanelEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener closure feeding this recorder.
    pub fn listener(&self) -> impl FnMut(&PanelEvent) + 'static {
        let events = self.events.clone();
        move |event: &PanelEvent| events.lock().push(event.clone())
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn count(&self, reason: PanelChangeReason) -> usize {
        self.events.lock().iter().filter(|e| e.reason == reason).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Store whose reads and writes always fail, counting the attempts.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    loads: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl StateStore for FailingStore {
    fn load(&self, _key: &str) -> io::Result<Option<String>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage unavailable"))
    }

    fn save(&mut self, _key: &str, _value: &str) -> io::Result<()> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage unavailable"))
    }
}

/// Renderer keeping every frame it was given.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<ContainerFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame applied for a container name.
    pub fn last(&self, name: &str) -> Option<&ContainerFrame> {
        self.frames.iter().rev().find(|f| f.name == name)
    }
}

impl LayoutRenderer for RecordingRenderer {
    fn apply(&mut self, frame: &ContainerFrame) {
        self.frames.push(frame.clone());
    }
}
