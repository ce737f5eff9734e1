//! Container ordering, ownership transfer and cross-container placement.

use sidedock::{LayoutError, Orientation, PlacementTarget};
use sidedock_core::geometry::Pos;
use sidedock_core::math::IVec2;
use sidedock_test_utils::{Fixture, RecordingRenderer};

#[test]
fn test_same_container_reorder_compensates_removal() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 5);

    // Slot 4 is "before p4" in the sequence as it was before the move.
    let placed = fx.system.place_panel(fx.left, 4, p[1]).unwrap();
    assert_eq!(placed, 3);
    assert_eq!(fx.names(fx.left), vec!["p0", "p2", "p3", "p1", "p4"]);
    assert_eq!(fx.system.panel(p[1]).unwrap().position(), Pos::new(0, 300));

    // Slot 3 is "before p3", which is index 2 once p1 has been removed.
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 5);
    assert_eq!(fx.system.place_panel(fx.left, 3, p[1]).unwrap(), 2);
    assert_eq!(fx.names(fx.left), vec!["p0", "p2", "p1", "p3", "p4"]);
}

#[test]
fn test_place_before_own_slot_is_not_shifted() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 4);
    assert_eq!(fx.system.place_panel(fx.left, 0, p[3]).unwrap(), 0);
    assert_eq!(fx.names(fx.left), vec!["p3", "p0", "p1", "p2"]);
}

#[test]
fn test_place_past_end_appends() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 3);
    assert_eq!(fx.system.place_panel(fx.left, 99, p[0]).unwrap(), 2);
    assert_eq!(fx.names(fx.left), vec!["p1", "p2", "p0"]);
}

#[test]
fn test_cross_container_move_reflows_both() {
    let mut fx = Fixture::new();
    let a = fx.add_panels(fx.left, "a", 2);
    let b = fx.add_panels(fx.right, "b", 1);

    fx.system.place_panel(fx.right, 0, a[0]).unwrap();

    assert_eq!(fx.names(fx.left), vec!["a1"]);
    assert_eq!(fx.names(fx.right), vec!["a0", "b0"]);
    assert_eq!(fx.system.panel(a[0]).unwrap().container(), Some(fx.right));
    assert_eq!(fx.system.panel(a[1]).unwrap().position(), Pos::new(0, 0));
    assert_eq!(fx.system.panel(b[0]).unwrap().position(), Pos::new(0, 100));
    assert_eq!(fx.system.container(fx.left).unwrap().content_height(), 100);
}

#[test]
fn test_moving_last_panel_empties_previous_owner() {
    let mut fx = Fixture::new();
    let a = fx.add_panels(fx.left, "a", 1);
    fx.system.place_panel(fx.right, 0, a[0]).unwrap();
    let left = fx.system.container(fx.left).unwrap();
    assert!(left.is_empty());
    assert_eq!(left.content_height(), 0);
}

#[test]
fn test_ownership_is_exclusive() {
    let mut fx = Fixture::new();
    let mut ids = fx.add_panels(fx.left, "a", 3);
    ids.extend(fx.add_panels(fx.right, "b", 3));
    let (left, right) = (fx.left, fx.right);

    let moves = [
        (right, 0, 0),
        (left, 5, 4),
        (left, 1, 0),
        (right, 2, 1),
        (right, 3, 2),
        (left, 0, 5),
        (left, 2, 5),
        (right, 0, 3),
        (left, 9, 3),
    ];
    for (container, index, panel) in moves {
        fx.system.place_panel(container, index, ids[panel]).unwrap();

        for &id in &ids {
            let owner = fx.system.panel(id).unwrap().container().unwrap();
            let memberships: usize = fx
                .system
                .containers()
                .iter()
                .map(|c| c.panels().iter().filter(|&&p| p == id).count())
                .sum();
            assert_eq!(memberships, 1, "{:?} must be in exactly one container", id);
            assert!(fx.system.container(owner).unwrap().panels().contains(&id));
        }
        let total: usize = fx.system.containers().iter().map(|c| c.len()).sum();
        assert_eq!(total, ids.len());
    }
}

#[test]
fn test_width_clamped_to_host() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 1);

    fx.system.set_panel_width(p[0], 10).unwrap();
    assert_eq!(fx.system.panel(p[0]).unwrap().width(), 120);

    fx.system.set_panel_width(p[0], 5000).unwrap();
    assert_eq!(fx.system.panel(p[0]).unwrap().width(), 750);
}

#[test]
fn test_minimized_width_is_stored_for_restore() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 1);
    fx.system.set_panel_minimized(p[0], true).unwrap();
    fx.system.set_panel_width(p[0], 480).unwrap();

    let panel = fx.system.panel(p[0]).unwrap();
    assert_eq!(panel.rendered_width(), 80);
    assert_eq!(panel.width(), 480);

    fx.system.set_panel_minimized(p[0], false).unwrap();
    assert_eq!(fx.system.panel(p[0]).unwrap().rendered_width(), 480);
}

#[test]
fn test_three_minimized_panels_wrap() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 3);
    for &id in &p {
        fx.system.set_panel_minimized(id, true).unwrap();
    }
    assert_eq!(fx.system.panel(p[0]).unwrap().position(), Pos::new(0, 0));
    assert_eq!(fx.system.panel(p[1]).unwrap().position(), Pos::new(80, 0));
    assert_eq!(fx.system.panel(p[2]).unwrap().position(), Pos::new(0, 26));
}

#[test]
fn test_self_placement_guard() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 3);
    // Lower half of p0 and upper half of p2 both leave p1 where it is.
    assert_eq!(fx.system.placing_index(fx.left, IVec2::new(50, 80), p[1]).unwrap(), None);
    assert_eq!(fx.system.placing_index(fx.left, IVec2::new(50, 220), p[1]).unwrap(), None);
    assert_eq!(fx.system.placing_index(fx.left, IVec2::new(50, 260), p[1]).unwrap(), Some(3));
}

#[test]
fn test_last_matching_container_wins() {
    let mut fx = Fixture::new();
    let l = fx.add_panels(fx.left, "l", 2);
    fx.system.set_panel_width(l[0], 700).unwrap();

    // Over l0 in the left container and inside the capture zone of the
    // empty right container (800 - 600 = 200 from its edge).
    let pointer = IVec2::new(600, 20);
    assert_eq!(fx.system.placing_index(fx.left, pointer, l[1]).unwrap(), Some(0));
    assert_eq!(fx.system.placing_index(fx.right, pointer, l[1]).unwrap(), Some(0));

    let target = fx.system.update_highlights(pointer, l[1]).unwrap();
    assert_eq!(
        target,
        Some(PlacementTarget {
            container: fx.right,
            index: 0
        })
    );
    assert!(fx.system.container(fx.left).unwrap().highlight().visible);
    assert!(fx.system.container(fx.right).unwrap().highlight().visible);

    let resolved = fx.system.resolve_placement(pointer, l[1]).unwrap();
    assert_eq!(resolved, target);
    assert_eq!(fx.names(fx.left), vec!["l0"]);
    assert_eq!(fx.names(fx.right), vec!["l1"]);
    assert!(!fx.system.container(fx.left).unwrap().highlight().visible);
    assert!(!fx.system.container(fx.right).unwrap().highlight().visible);
}

#[test]
fn test_resolve_without_target_keeps_layout() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 2);
    fx.system.update_highlights(IVec2::new(10, 20), p[1]).unwrap();
    assert!(fx.system.container(fx.left).unwrap().highlight().visible);

    let resolved = fx.system.resolve_placement(IVec2::new(400, 590), p[1]).unwrap();
    assert_eq!(resolved, None);
    assert_eq!(fx.names(fx.left), vec!["p0", "p1"]);
    assert!(!fx.system.container(fx.left).unwrap().highlight().visible);
}

#[test]
fn test_empty_container_highlight_spans_host() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 1);
    fx.system.update_highlights(IVec2::new(700, 10), p[0]).unwrap();

    let highlight = *fx.system.container(fx.right).unwrap().highlight();
    assert!(highlight.visible);
    assert_eq!(highlight.orientation, Orientation::Vertical);
    assert_eq!((highlight.offset, highlight.top, highlight.length), (0, 0, 600));
}

#[test]
fn test_detached_panels_can_be_replaced() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 2);
    let detached = fx.system.detach_panels(fx.left).unwrap();
    assert_eq!(detached, p);
    assert!(fx.system.panel(p[0]).unwrap().container().is_none());

    fx.system.place_panel(fx.right, 0, p[1]).unwrap();
    fx.system.place_panel(fx.right, 1, p[0]).unwrap();
    assert_eq!(fx.names(fx.right), vec!["p1", "p0"]);
}

#[test]
fn test_unknown_names() {
    let fx = Fixture::new();
    assert_eq!(
        fx.system.panel_id("ghost"),
        Err(LayoutError::UnknownPanel("ghost".to_string()))
    );
    assert_eq!(fx.system.container_id("right"), Ok(fx.right));
}

#[test]
fn test_renderer_receives_every_container() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 2);
    fx.system.set_panel_minimized(p[1], true).unwrap();

    let mut renderer = RecordingRenderer::new();
    fx.system.render(&mut renderer);

    assert_eq!(renderer.frames.len(), 2);
    let left = renderer.last("left").unwrap();
    let names: Vec<_> = left.panels.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["p0", "p1"]);
    let p1 = left.panel("p1").unwrap();
    assert_eq!((p1.x, p1.y, p1.width, p1.height), (0, 100, 80, 26));
    assert!(renderer.last("right").unwrap().panels.is_empty());
}
