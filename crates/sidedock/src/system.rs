//! The owning layout context.
//!
//! [`LayoutSystem`] holds every panel and container, the name registry, the
//! single drag slot, the listeners and the optional state store. All layout
//! mutation goes through it so that ownership transfers stay atomic: a panel
//! is removed from its old owner and inserted into its new one within the
//! same call, and no reflow ever observes it in both or in neither.

use crate::config::{ContainerConfig, LayoutConfig, PanelConfig, PanelMetrics};
use crate::container::Container;
use crate::drag::{DragController, DragHandle, DragPhase, PointerEvent};
use crate::error::{LayoutError, LayoutResult};
use crate::events::{EventDispatcher, ListenerId, PanelChangeReason, PanelEvent};
use crate::panel::Panel;
use crate::persistence::{LayoutState, StateStore};
use crate::placement::{self, PlacementTarget};
use crate::registry::PanelRegistry;
use crate::render::{ContainerFrame, LayoutRenderer};
use crate::types::{ContainerId, HostArea, PanelId};
use sidedock_core::alloc::HashMap;
use sidedock_core::math::IVec2;
use sidedock_core::profiling::{profile_function, profile_scope};
use std::fmt;

pub struct LayoutSystem {
    config: LayoutConfig,
    panels: Vec<Panel>,
    containers: Vec<Container>,
    container_names: HashMap<String, ContainerId>,
    registry: PanelRegistry,
    pub(crate) drag: DragController,
    events: EventDispatcher,
    store: Option<Box<dyn StateStore>>,
}

impl fmt::Debug for LayoutSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSystem")
            .field("config", &self.config)
            .field("panels", &self.panels.len())
            .field("containers", &self.containers.len())
            .field("drag", &self.drag)
            .field("events", &self.events)
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Default for LayoutSystem {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutSystem {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            panels: Vec::new(),
            containers: Vec::new(),
            container_names: HashMap::new(),
            registry: PanelRegistry::new(),
            drag: DragController::new(),
            events: EventDispatcher::default(),
            store: None,
        }
    }

    /// Attach a state store used by [`save_state`](Self::save_state) and
    /// [`restore_state`](Self::restore_state).
    pub fn with_store(mut self, store: impl StateStore + 'static) -> Self {
        self.set_store(store);
        self
    }

    pub fn set_store(&mut self, store: impl StateStore + 'static) {
        self.store = Some(Box::new(store));
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // ---- registration ----

    /// Register a container. Names must be unique.
    pub fn add_container(&mut self, config: ContainerConfig) -> LayoutResult<ContainerId> {
        if self.container_names.contains_key(&config.name) {
            return Err(LayoutError::DuplicateContainerName(config.name));
        }
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(Container::new(&config));
        self.container_names.insert(config.name.clone(), id);
        tracing::debug!(container = %config.name, anchor = ?config.anchor_side, "container registered");
        Ok(id)
    }

    /// Register a panel and append it to `container`.
    ///
    /// Fails with [`LayoutError::DuplicatePanelName`] when the name is taken;
    /// nothing is registered in that case.
    pub fn add_panel(&mut self, container: ContainerId, config: PanelConfig) -> LayoutResult<PanelId> {
        self.container(container)?;
        let id = PanelId(self.panels.len() as u32);
        self.registry.register(&config.name, id)?;
        self.panels.push(Panel::new(&config, &self.config));
        self.place_panel(container, usize::MAX, id)?;

        // Initial sizes go through the setters so they are clamped like user input.
        let width = config.default_width.unwrap_or(self.config.default_panel_width);
        self.set_panel_width(id, width)?;
        if !config.fixed_height {
            let height = config.default_height.unwrap_or(self.config.default_panel_height);
            self.set_panel_height(id, height)?;
        }
        tracing::debug!(panel = %config.name, ?container, "panel registered");
        Ok(id)
    }

    // ---- lookup ----

    pub fn panel(&self, id: PanelId) -> LayoutResult<&Panel> {
        self.panels.get(id.index()).ok_or(LayoutError::InvalidPanel(id))
    }

    pub(crate) fn panel_mut(&mut self, id: PanelId) -> LayoutResult<&mut Panel> {
        self.panels
            .get_mut(id.index())
            .ok_or(LayoutError::InvalidPanel(id))
    }

    pub fn container(&self, id: ContainerId) -> LayoutResult<&Container> {
        self.containers
            .get(id.index())
            .ok_or(LayoutError::InvalidContainer(id))
    }

    pub(crate) fn container_mut(&mut self, id: ContainerId) -> LayoutResult<&mut Container> {
        self.containers
            .get_mut(id.index())
            .ok_or(LayoutError::InvalidContainer(id))
    }

    /// All panels, indexed by [`PanelId::index`].
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// All containers in registration order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn panel_id(&self, name: &str) -> LayoutResult<PanelId> {
        self.registry.require(name)
    }

    pub fn container_id(&self, name: &str) -> LayoutResult<ContainerId> {
        self.container_names
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::UnknownContainer(name.to_string()))
    }

    // ---- sizing ----

    /// Width bounds for a panel: the configured minimum and the owner's host
    /// width minus the margin. Detached panels and unmeasured hosts have no
    /// upper bound.
    fn width_bounds(&self, id: PanelId) -> LayoutResult<(i32, i32)> {
        let min = self.config.min_panel_width;
        let max = match self.panel(id)?.container {
            Some(owner) => {
                let host_width = self.container(owner)?.max_width();
                if host_width > 0 {
                    host_width - self.config.max_width_margin
                } else {
                    i32::MAX
                }
            }
            None => i32::MAX,
        };
        Ok((min, max))
    }

    /// Set a panel's width, clamped to its bounds.
    ///
    /// The clamped value is stored even while minimized so it can be restored.
    pub fn set_panel_width(&mut self, id: PanelId, width: i32) -> LayoutResult<()> {
        let (min, max) = self.width_bounds(id)?;
        if self.panel_mut(id)?.store_width(width, min, max) {
            self.reflow_owner(id)?;
        }
        Ok(())
    }

    /// Set a panel's height. Ignored for fixed-height panels.
    pub fn set_panel_height(&mut self, id: PanelId, height: i32) -> LayoutResult<()> {
        if self.panel_mut(id)?.store_height(height) {
            self.reflow_owner(id)?;
        }
        Ok(())
    }

    /// Minimize or restore a panel. Returns whether the state changed.
    pub fn set_panel_minimized(&mut self, id: PanelId, minimized: bool) -> LayoutResult<bool> {
        if !self.panel_mut(id)?.set_minimized(minimized) {
            return Ok(false);
        }
        if !minimized {
            // The host may have shrunk while the panel was compact.
            let width = self.panel(id)?.width();
            let (min, max) = self.width_bounds(id)?;
            self.panel_mut(id)?.store_width(width, min, max);
        }
        self.reflow_owner(id)?;
        Ok(true)
    }

    /// Feed fresh content measurements from the renderer.
    pub fn set_panel_metrics(&mut self, id: PanelId, metrics: PanelMetrics) -> LayoutResult<()> {
        self.panel_mut(id)?.set_metrics(metrics);
        self.reflow_owner(id)
    }

    /// Update the layout parent of a container after the host was resized or moved.
    pub fn set_host_area(&mut self, id: ContainerId, host: HostArea) -> LayoutResult<()> {
        self.container_mut(id)?.set_host(host);
        self.reorder_panels(id)
    }

    // ---- layout ----

    /// Recompute the geometry of every panel in a container.
    pub fn reorder_panels(&mut self, id: ContainerId) -> LayoutResult<()> {
        let container = self
            .containers
            .get_mut(id.index())
            .ok_or(LayoutError::InvalidContainer(id))?;
        container.reorder_panels(&mut self.panels, &self.config);
        Ok(())
    }

    /// Reflow the current owner of a panel, if any.
    pub(crate) fn reflow_owner(&mut self, id: PanelId) -> LayoutResult<()> {
        match self.panel(id)?.container {
            Some(owner) => self.reorder_panels(owner),
            None => Ok(()),
        }
    }

    /// Move a panel into `container` at `index`, appending when `index` is
    /// past the end. Returns the index the panel ended up at.
    ///
    /// `index` is an insertion slot in the sequence as it was before the
    /// move. Within the same container, a slot past the panel's current one is
    /// shifted down by one to account for the removal: placing `p1` of
    /// `[p0, p1, p2, p3, p4]` at slot 4 (before `p4`) yields
    /// `[p0, p2, p3, p1, p4]` and returns 3.
    pub fn place_panel(&mut self, container: ContainerId, index: usize, id: PanelId) -> LayoutResult<usize> {
        profile_function!();
        self.container(container)?;
        let previous = self.panel(id)?.container;

        let mut index = index;
        if let Some(owner) = previous {
            let removed = self.container_mut(owner)?.remove_panel(id);
            if let Some(removed) = removed
                && owner == container
                && index > removed
            {
                index -= 1;
            }
        }

        let panel = self.panel_mut(id)?;
        panel.clear_position();
        panel.container = Some(container);
        let placed = self.container_mut(container)?.insert_panel(index, id);

        if let Some(owner) = previous
            && owner != container
        {
            self.reorder_panels(owner)?;
        }
        self.reorder_panels(container)?;
        tracing::debug!(panel = ?id, from = ?previous, to = ?container, index = placed, "panel placed");
        Ok(placed)
    }

    /// Remove every panel from a container, leaving them detached.
    ///
    /// Detached panels are skipped by the renderer frames until re-placed.
    pub fn detach_panels(&mut self, id: ContainerId) -> LayoutResult<Vec<PanelId>> {
        let detached = self.container_mut(id)?.take_panels();
        for &panel in &detached {
            let panel = self.panel_mut(panel)?;
            panel.container = None;
            panel.clear_position();
        }
        self.reorder_panels(id)?;
        tracing::debug!(container = ?id, count = detached.len(), "panels detached");
        Ok(detached)
    }

    /// Hit-test one container for a dragged panel.
    pub fn placing_index(&self, container: ContainerId, pointer: IVec2, dragged: PanelId) -> LayoutResult<Option<usize>> {
        self.panel(dragged)?;
        Ok(self
            .container(container)?
            .placing_index(pointer, dragged, &self.panels, &self.config))
    }

    pub fn show_placing_highlight(&mut self, container: ContainerId, index: usize, dragged: PanelId) -> LayoutResult<()> {
        let minimized = self.panel(dragged)?.is_minimized();
        let target = self
            .containers
            .get_mut(container.index())
            .ok_or(LayoutError::InvalidContainer(container))?;
        target.show_placing_highlight(index, minimized, &self.panels, &self.config);
        Ok(())
    }

    pub fn clear_placing_highlight(&mut self, container: ContainerId) -> LayoutResult<()> {
        self.container_mut(container)?.clear_placing_highlight();
        Ok(())
    }

    /// Probe every container and refresh its highlight for the pointer.
    pub fn update_highlights(&mut self, pointer: IVec2, dragged: PanelId) -> LayoutResult<Option<PlacementTarget>> {
        self.panel(dragged)?;
        Ok(placement::update_highlights(
            &mut self.containers,
            &self.panels,
            pointer,
            dragged,
            &self.config,
        ))
    }

    /// Drop `dragged` at the pointer: clear every highlight and place the
    /// panel in the last container that accepts it. Returns the target, or
    /// `None` when no container accepted the drop.
    pub fn resolve_placement(&mut self, pointer: IVec2, dragged: PanelId) -> LayoutResult<Option<PlacementTarget>> {
        profile_function!();
        self.panel(dragged)?;
        let target = placement::find_placement(&self.containers, &self.panels, pointer, dragged, &self.config);
        placement::clear_highlights(&mut self.containers);
        if let Some(target) = target {
            self.place_panel(target.container, target.index, dragged)?;
        }
        Ok(target)
    }

    // ---- pointer input ----

    /// Feed a raw pointer event. Autosaves after a release when enabled.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> LayoutResult<()> {
        let was_active = self.drag.is_active();
        DragController::step(self, event)?;
        if was_active && matches!(event, PointerEvent::Release { .. }) && self.config.autosave {
            self.save_state();
        }
        Ok(())
    }

    pub fn pointer_down(&mut self, panel: PanelId, handle: DragHandle, pos: IVec2) -> LayoutResult<()> {
        self.handle_pointer(PointerEvent::Press { panel, handle, pos })
    }

    pub fn pointer_move(&mut self, pos: IVec2) -> LayoutResult<()> {
        self.handle_pointer(PointerEvent::Move { pos })
    }

    pub fn pointer_up(&mut self, pos: IVec2) -> LayoutResult<()> {
        self.handle_pointer(PointerEvent::Release { pos })
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    // ---- notifications ----

    /// Subscribe to changes of every panel.
    pub fn on_panel_changed(&mut self, listener: impl FnMut(&PanelEvent) + 'static) -> ListenerId {
        self.events.subscribe(None, Box::new(listener))
    }

    /// Subscribe to changes of the panel registered as `name`.
    pub fn add_panel_listener(
        &mut self,
        name: &str,
        listener: impl FnMut(&PanelEvent) + 'static,
    ) -> LayoutResult<ListenerId> {
        let id = self.registry.require(name)?;
        Ok(self.events.subscribe(Some(id), Box::new(listener)))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit_change(&mut self, id: PanelId, reason: PanelChangeReason) {
        let Some(panel) = self.panels.get(id.index()) else {
            return;
        };
        let event = PanelEvent {
            panel: id,
            name: panel.name().to_string(),
            reason,
            minimized: panel.is_minimized(),
            width: panel.width(),
            height: panel.height(),
        };
        self.events.emit(&event);
    }

    // ---- persistence ----

    /// Snapshot of every container's panel order and panel sizes.
    pub fn save_data(&self) -> LayoutState {
        let mut state = LayoutState::new();
        for container in &self.containers {
            let records = container
                .panels()
                .iter()
                .map(|id| self.panels[id.index()].save_data())
                .collect();
            state.insert(container.name(), records);
        }
        state
    }

    /// Apply a saved layout.
    ///
    /// Unknown container and panel names are skipped. Records are applied in
    /// order, each one placing the panel at the next slot of its container
    /// and then setting minimized state, width and height. Containers absent
    /// from the state keep their current layout.
    pub fn load_state(&mut self, state: &LayoutState) -> LayoutResult<()> {
        profile_scope!("load_state");
        for (name, records) in state.iter() {
            let Some(&container) = self.container_names.get(name) else {
                tracing::debug!(container = name, "saved container not registered, skipping");
                continue;
            };
            let mut slot = 0;
            for record in records {
                let Some(id) = self.registry.get(&record.name) else {
                    tracing::debug!(panel = %record.name, "saved panel not registered, skipping");
                    continue;
                };
                // Width bounds depend on the owner, so move the panel first.
                self.place_panel(container, slot, id)?;
                slot += 1;
                if self.set_panel_minimized(id, record.minimized)? {
                    self.emit_change(id, PanelChangeReason::MinimizedChanged);
                }
                self.set_panel_width(id, record.width)?;
                self.set_panel_height(id, record.height)?;
            }
        }
        tracing::info!(containers = state.len(), "layout state loaded");
        Ok(())
    }

    /// Write the current layout to the attached store.
    ///
    /// Returns `false` when there is no store or the write failed; failures
    /// are logged and never propagated.
    pub fn save_state(&mut self) -> bool {
        let json = match self.save_data().to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode layout state");
                return false;
            }
        };
        let key = self.config.storage_key.clone();
        let Some(store) = self.store.as_mut() else {
            return false;
        };
        match store.save(&key, &json) {
            Ok(()) => {
                tracing::info!(key = %key, "layout state saved");
                true
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to save layout state");
                false
            }
        }
    }

    /// Load the layout from the attached store.
    ///
    /// Returns `true` when a saved layout was applied. A missing store, a
    /// missing entry, an unreadable store and malformed data all leave the
    /// current layout in place.
    pub fn restore_state(&mut self) -> LayoutResult<bool> {
        let key = &self.config.storage_key;
        let Some(store) = self.store.as_ref() else {
            return Ok(false);
        };
        let json = match store.load(key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::debug!(key = %key, "no saved layout state");
                return Ok(false);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read layout state");
                return Ok(false);
            }
        };
        let state = match LayoutState::from_json(&json) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring malformed layout state");
                return Ok(false);
            }
        };
        self.load_state(&state)?;
        Ok(true)
    }

    // ---- rendering ----

    /// Geometry of every container and its panels, in registration order.
    pub fn frames(&self) -> Vec<ContainerFrame> {
        self.containers
            .iter()
            .enumerate()
            .map(|(i, container)| ContainerFrame::new(ContainerId(i as u32), container, &self.panels, &self.config))
            .collect()
    }

    /// Push every container frame to a renderer.
    pub fn render(&self, renderer: &mut impl LayoutRenderer) {
        for frame in self.frames() {
            renderer.apply(&frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use sidedock_core::geometry::Pos;

    fn system() -> (LayoutSystem, ContainerId, ContainerId) {
        let mut system = LayoutSystem::new(LayoutConfig::default().chrome(24, 2));
        let left = system
            .add_container(ContainerConfig::left("left").host(HostArea::sized(800, 600)))
            .unwrap();
        let right = system
            .add_container(ContainerConfig::right("right").host(HostArea::sized(800, 600)))
            .unwrap();
        (system, left, right)
    }

    #[test]
    fn test_add_panel_appends_and_reflows() {
        let (mut system, left, _) = system();
        let a = system.add_panel(left, PanelConfig::new("a").default_height(150)).unwrap();
        let b = system.add_panel(left, PanelConfig::new("b")).unwrap();

        assert_eq!(system.container(left).unwrap().panels(), &[a, b]);
        assert_eq!(system.panel(b).unwrap().position(), Pos::new(0, 150));
        assert_eq!(system.container(left).unwrap().content_height(), 250);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (mut system, left, right) = system();
        system.add_panel(left, PanelConfig::new("a")).unwrap();
        assert_eq!(
            system.add_panel(right, PanelConfig::new("a")),
            Err(LayoutError::DuplicatePanelName("a".to_string()))
        );
        assert_eq!(system.panels().len(), 1);
        assert_eq!(
            system.add_container(ContainerConfig::left("left")),
            Err(LayoutError::DuplicateContainerName("left".to_string()))
        );
    }

    #[test]
    fn test_invalid_ids() {
        let (mut system, left, _) = system();
        assert_eq!(
            system.add_panel(ContainerId(9), PanelConfig::new("x")).unwrap_err(),
            LayoutError::InvalidContainer(ContainerId(9))
        );
        assert_eq!(
            system.place_panel(left, 0, PanelId(3)).unwrap_err(),
            LayoutError::InvalidPanel(PanelId(3))
        );
        assert_eq!(
            system.container_id("nowhere").unwrap_err(),
            LayoutError::UnknownContainer("nowhere".to_string())
        );
    }

    #[test]
    fn test_restore_clamps_to_current_host() {
        let (mut system, left, _) = system();
        let a = system.add_panel(left, PanelConfig::new("a").default_width(700)).unwrap();
        system.set_panel_minimized(a, true).unwrap();
        system.set_host_area(left, HostArea::sized(400, 600)).unwrap();
        assert_eq!(system.panel(a).unwrap().width(), 700);

        assert!(system.set_panel_minimized(a, false).unwrap());
        assert_eq!(system.panel(a).unwrap().width(), 350);
        assert!(!system.set_panel_minimized(a, false).unwrap());
    }

    #[test]
    fn test_unmeasured_host_has_no_upper_bound() {
        let mut system = LayoutSystem::default();
        let c = system.add_container(ContainerConfig::left("c")).unwrap();
        let a = system.add_panel(c, PanelConfig::new("a").default_width(900)).unwrap();
        assert_eq!(system.panel(a).unwrap().width(), 900);
        system.set_panel_width(a, 40).unwrap();
        assert_eq!(system.panel(a).unwrap().width(), 120);
    }

    #[test]
    fn test_detach_panels() {
        let (mut system, left, right) = system();
        let a = system.add_panel(left, PanelConfig::new("a")).unwrap();
        let b = system.add_panel(left, PanelConfig::new("b")).unwrap();

        assert_eq!(system.detach_panels(left).unwrap(), vec![a, b]);
        assert!(system.container(left).unwrap().is_empty());
        assert_eq!(system.panel(a).unwrap().container(), None);
        assert_eq!(system.container(left).unwrap().content_height(), 0);

        system.place_panel(right, 0, b).unwrap();
        assert_eq!(system.container(right).unwrap().panels(), &[b]);
        assert_eq!(system.frames()[0].panels.len(), 0);
        assert_eq!(system.frames()[1].panels.len(), 1);
    }

    #[test]
    fn test_save_without_store_is_noop() {
        let (mut system, left, _) = system();
        system.add_panel(left, PanelConfig::new("a")).unwrap();
        assert!(!system.save_state());
        assert!(!system.restore_state().unwrap());
    }

    #[test]
    fn test_save_and_restore_through_store() {
        let store = MemoryStore::new();
        let (system, left, right) = system();
        let mut system = system.with_store(store.clone());
        let a = system.add_panel(left, PanelConfig::new("a")).unwrap();
        let b = system.add_panel(left, PanelConfig::new("b")).unwrap();
        system.place_panel(right, 0, a).unwrap();
        assert!(system.save_state());
        assert!(store.get("sidedock.layout").is_some());

        system.place_panel(left, 0, a).unwrap();
        assert!(system.restore_state().unwrap());
        assert_eq!(system.container(left).unwrap().panels(), &[b]);
        assert_eq!(system.container(right).unwrap().panels(), &[a]);
    }
}
