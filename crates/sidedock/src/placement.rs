//! Cross-container placement resolution.
//!
//! During a placement drag every container is probed with the pointer. The
//! probes run in container registration order, and when several containers
//! accept the pointer the last one scanned wins.

use crate::config::LayoutConfig;
use crate::container::Container;
use crate::panel::Panel;
use crate::types::{ContainerId, PanelId};
use sidedock_core::math::IVec2;
use sidedock_core::profiling::profile_function;

/// A container and the index a dragged panel would be inserted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTarget {
    pub container: ContainerId,
    pub index: usize,
}

/// Probe every container, showing a highlight where the drop is valid and
/// clearing it elsewhere. Returns the target a release would resolve to.
pub(crate) fn update_highlights(
    containers: &mut [Container],
    panels: &[Panel],
    pointer: IVec2,
    dragged: PanelId,
    layout: &LayoutConfig,
) -> Option<PlacementTarget> {
    profile_function!();
    let dragged_minimized = panels[dragged.index()].is_minimized();
    let mut target = None;
    for (i, container) in containers.iter_mut().enumerate() {
        match container.placing_index(pointer, dragged, panels, layout) {
            Some(index) => {
                container.show_placing_highlight(index, dragged_minimized, panels, layout);
                target = Some(PlacementTarget {
                    container: ContainerId(i as u32),
                    index,
                });
            }
            None => container.clear_placing_highlight(),
        }
    }
    target
}

/// Find the drop target for a pointer without touching any highlight.
pub(crate) fn find_placement(
    containers: &[Container],
    panels: &[Panel],
    pointer: IVec2,
    dragged: PanelId,
    layout: &LayoutConfig,
) -> Option<PlacementTarget> {
    profile_function!();
    // Scanning backwards and stopping at the first hit keeps "last wins".
    containers
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, container)| {
            container
                .placing_index(pointer, dragged, panels, layout)
                .map(|index| PlacementTarget {
                    container: ContainerId(i as u32),
                    index,
                })
        })
}

pub(crate) fn clear_highlights(containers: &mut [Container]) {
    for container in containers {
        container.clear_placing_highlight();
    }
}
