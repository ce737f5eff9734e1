//! Pointer gesture state machine.
//!
//! A press on a panel handle starts a drag. Resize handles apply every move
//! immediately. A header press stays pending until the pointer travels more
//! than the drag threshold (Manhattan distance); releasing before that
//! toggles the panel's minimized state, releasing after it places the panel
//! wherever the pointer ended up.
//!
//! ```text
//! Idle ──press(bar)──▶ Resizing{Width,Height,Corner} ──release──▶ Idle
//! Idle ──press(header)──▶ PendingMove ──move > threshold──▶ ActivePlace
//! PendingMove ──release──▶ Idle (toggle minimized)
//! ActivePlace ──release──▶ Idle (resolve placement)
//! ```
//!
//! Only one drag exists at a time. A press arriving while a drag is active
//! is ignored. There is no cancel path; a drag ends on release.

use crate::error::LayoutResult;
use crate::events::PanelChangeReason;
use crate::system::LayoutSystem;
use crate::types::{AnchorSide, ContainerId, PanelId};
use crate::visual::{ContainerVisualFlags, PanelVisualFlags};
use sidedock_core::geometry::Pos;
use sidedock_core::math::{IVec2, manhattan};

/// Which part of a panel received the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// Header: click toggles minimized, drag moves the panel.
    Header,
    /// Vertical bar on the inner edge: resizes width.
    WidthBar,
    /// Horizontal bar at the bottom: resizes height.
    HeightBar,
    /// Corner grip: resizes both.
    CornerBar,
}

/// Raw pointer input forwarded by the renderer, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press {
        panel: PanelId,
        handle: DragHandle,
        pos: IVec2,
    },
    Move {
        pos: IVec2,
    },
    Release {
        pos: IVec2,
    },
}

/// Kind of drag with its kind-specific starting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    ResizeWidth {
        start_x: i32,
        start_width: i32,
    },
    ResizeHeight {
        start_y: i32,
        start_height: i32,
    },
    ResizeCorner {
        start: IVec2,
        start_width: i32,
        start_height: i32,
    },
    Move {
        start: IVec2,
        start_pos: Pos<i32>,
        /// Set once the pointer has passed the drag threshold.
        moved: bool,
    },
}

/// Observable state of the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    ResizingWidth,
    ResizingHeight,
    ResizingCorner,
    PendingMove,
    ActivePlace,
}

/// State of the drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub panel: PanelId,
    /// Owner at press time.
    pub owner: ContainerId,
    /// Anchor of the owner at press time; decides the sign of horizontal deltas.
    pub anchor: AnchorSide,
    pub kind: DragKind,
    pub current: IVec2,
}

impl DragState {
    pub fn phase(&self) -> DragPhase {
        match self.kind {
            DragKind::ResizeWidth { .. } => DragPhase::ResizingWidth,
            DragKind::ResizeHeight { .. } => DragPhase::ResizingHeight,
            DragKind::ResizeCorner { .. } => DragPhase::ResizingCorner,
            DragKind::Move { moved: false, .. } => DragPhase::PendingMove,
            DragKind::Move { moved: true, .. } => DragPhase::ActivePlace,
        }
    }

    fn gesture_flag(&self) -> PanelVisualFlags {
        match self.kind {
            DragKind::ResizeWidth { .. } => PanelVisualFlags::WIDTH_DRAG,
            DragKind::ResizeHeight { .. } => PanelVisualFlags::HEIGHT_DRAG,
            DragKind::ResizeCorner { .. } => PanelVisualFlags::CORNER_DRAG,
            DragKind::Move { .. } => PanelVisualFlags::PLACING,
        }
    }
}

/// Holds the single drag slot of a [`LayoutSystem`].
#[derive(Debug, Default)]
pub struct DragController {
    state: Option<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self { state: None }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.state.map_or(DragPhase::Idle, |s| s.phase())
    }

    /// Whether a press is being tracked, pending or not.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn dragged_panel(&self) -> Option<PanelId> {
        self.state.map(|s| s.panel)
    }

    /// Feed one pointer event through the state machine.
    pub(crate) fn step(system: &mut LayoutSystem, event: PointerEvent) -> LayoutResult<()> {
        let current = system.drag.state.take();
        let next = match (current, event) {
            (None, PointerEvent::Press { panel, handle, pos }) => press(system, panel, handle, pos)?,
            (Some(state), PointerEvent::Press { panel, .. }) => {
                tracing::debug!(?panel, active = ?state.panel, "press ignored while a drag is active");
                Some(state)
            }
            (Some(state), PointerEvent::Move { pos }) => Some(drag_move(system, state, pos)?),
            (Some(state), PointerEvent::Release { pos }) => {
                release(system, state, pos)?;
                None
            }
            (None, _) => None,
        };
        system.drag.state = next;
        Ok(())
    }
}

fn press(
    system: &mut LayoutSystem,
    panel_id: PanelId,
    handle: DragHandle,
    pos: IVec2,
) -> LayoutResult<Option<DragState>> {
    let panel = system.panel(panel_id)?;
    let Some(owner) = panel.container() else {
        tracing::warn!(panel = panel.name(), "press on a detached panel ignored");
        return Ok(None);
    };
    let start_width = panel.rendered_width();
    let start_height = panel.rendered_height(system.config());
    let kind = match handle {
        DragHandle::Header => DragKind::Move {
            start: pos,
            start_pos: panel.position(),
            moved: false,
        },
        DragHandle::WidthBar => DragKind::ResizeWidth {
            start_x: pos.x,
            start_width,
        },
        DragHandle::HeightBar => DragKind::ResizeHeight {
            start_y: pos.y,
            start_height,
        },
        DragHandle::CornerBar => DragKind::ResizeCorner {
            start: pos,
            start_width,
            start_height,
        },
    };
    let anchor = system.container(owner)?.anchor();
    let state = DragState {
        panel: panel_id,
        owner,
        anchor,
        kind,
        current: pos,
    };

    // Placement flags wait for the threshold.
    if !matches!(kind, DragKind::Move { .. }) {
        set_gesture_flags(system, &state, true)?;
    }
    tracing::debug!(panel = ?panel_id, phase = ?state.phase(), "drag started");
    Ok(Some(state))
}

fn drag_move(system: &mut LayoutSystem, mut state: DragState, pos: IVec2) -> LayoutResult<DragState> {
    state.current = pos;
    let id = state.panel;
    match &mut state.kind {
        DragKind::ResizeWidth {
            start_x,
            start_width,
        } => {
            let dx = pos.x - *start_x;
            system.set_panel_width(id, *start_width + state.anchor.inward(dx))?;
            system.emit_change(id, PanelChangeReason::Resized);
        }
        DragKind::ResizeHeight {
            start_y,
            start_height,
        } => {
            system.set_panel_height(id, *start_height + pos.y - *start_y)?;
            system.emit_change(id, PanelChangeReason::Resized);
        }
        DragKind::ResizeCorner {
            start,
            start_width,
            start_height,
        } => {
            let delta = pos - *start;
            system.set_panel_width(id, *start_width + state.anchor.inward(delta.x))?;
            system.set_panel_height(id, *start_height + delta.y)?;
            system.emit_change(id, PanelChangeReason::Resized);
        }
        DragKind::Move {
            start,
            start_pos,
            moved,
        } => {
            let delta = pos - *start;
            if !*moved && manhattan(delta) > system.config().drag_threshold {
                *moved = true;
                tracing::debug!(panel = ?id, "placement drag activated");
            }
            if *moved {
                let follow = *start_pos + Pos::new(state.anchor.inward(delta.x), delta.y);
                system.panel_mut(id)?.set_position(follow);
                system.update_highlights(pos, id)?;
            }
        }
    }
    if state.phase() == DragPhase::ActivePlace {
        set_gesture_flags(system, &state, true)?;
    }
    Ok(state)
}

fn release(system: &mut LayoutSystem, state: DragState, pos: IVec2) -> LayoutResult<()> {
    let id = state.panel;
    set_gesture_flags(system, &state, false)?;
    match state.kind {
        DragKind::Move { moved: false, .. } => {
            let minimized = !system.panel(id)?.is_minimized();
            system.set_panel_minimized(id, minimized)?;
            system.emit_change(id, PanelChangeReason::MinimizedChanged);
            tracing::debug!(panel = ?id, minimized, "click toggled minimized");
        }
        DragKind::Move { moved: true, .. } => {
            // Snap back first so a drop nowhere leaves the layout intact.
            system.reflow_owner(id)?;
            let target = system.resolve_placement(pos, id)?;
            tracing::debug!(panel = ?id, ?target, "placement drag released");
        }
        _ => tracing::debug!(panel = ?id, phase = ?state.phase(), "resize finished"),
    }
    Ok(())
}

fn set_gesture_flags(system: &mut LayoutSystem, state: &DragState, on: bool) -> LayoutResult<()> {
    let flags = &mut system.panel_mut(state.panel)?.flags;
    if on {
        flags.insert(state.gesture_flag());
    } else {
        flags.remove(PanelVisualFlags::GESTURE);
    }
    system
        .container_mut(state.owner)?
        .flags
        .set(ContainerVisualFlags::DRAGGING, on);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(kind: DragKind) -> DragState {
        DragState {
            panel: PanelId(0),
            owner: ContainerId(0),
            anchor: AnchorSide::Left,
            kind,
            current: IVec2::ZERO,
        }
    }

    #[test]
    fn test_phase_mapping() {
        let pending = state(DragKind::Move {
            start: IVec2::ZERO,
            start_pos: Pos::new(0, 0),
            moved: false,
        });
        assert_eq!(pending.phase(), DragPhase::PendingMove);

        let active = state(DragKind::Move {
            start: IVec2::ZERO,
            start_pos: Pos::new(0, 0),
            moved: true,
        });
        assert_eq!(active.phase(), DragPhase::ActivePlace);

        let corner = state(DragKind::ResizeCorner {
            start: IVec2::ZERO,
            start_width: 300,
            start_height: 100,
        });
        assert_eq!(corner.phase(), DragPhase::ResizingCorner);
        assert_eq!(corner.gesture_flag(), PanelVisualFlags::CORNER_DRAG);
    }

    #[test]
    fn test_idle_controller() {
        let controller = DragController::new();
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(!controller.is_active());
        assert_eq!(controller.dragged_panel(), None);
    }
}
