//! Panel change notifications.

use sidedock::{DragHandle, LayoutError, PanelChangeReason};
use sidedock_core::math::IVec2;
use sidedock_test_utils::{EventRecorder, Fixture, click, drag};

#[test]
fn test_click_emits_minimized_changed() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 1);
    let events = EventRecorder::new();
    fx.system.on_panel_changed(events.listener());

    click(&mut fx.system, p[0], IVec2::new(10, 5)).unwrap();

    let recorded = events.events();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].panel, p[0]);
    assert_eq!(recorded[0].name, "p0");
    assert_eq!(recorded[0].reason, PanelChangeReason::MinimizedChanged);
    assert!(recorded[0].minimized);
}

#[test]
fn test_programmatic_changes_are_silent() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 2);
    let events = EventRecorder::new();
    fx.system.on_panel_changed(events.listener());

    fx.system.set_panel_width(p[0], 400).unwrap();
    fx.system.set_panel_height(p[0], 200).unwrap();
    fx.system.set_panel_minimized(p[1], true).unwrap();
    fx.system.place_panel(fx.right, 0, p[0]).unwrap();

    assert!(events.is_empty());
}

#[test]
fn test_panel_listener_is_filtered() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 2);
    let only_p1 = EventRecorder::new();
    fx.system.add_panel_listener("p1", only_p1.listener()).unwrap();

    click(&mut fx.system, p[0], IVec2::new(10, 5)).unwrap();
    assert!(only_p1.is_empty());

    drag(&mut fx.system, p[1], DragHandle::HeightBar, IVec2::new(10, 126), &[IVec2::new(10, 176)]).unwrap();
    assert_eq!(only_p1.count(PanelChangeReason::Resized), 1);
    assert_eq!(only_p1.events()[0].height, 150);
}

#[test]
fn test_listener_for_unknown_panel_fails() {
    let mut fx = Fixture::new();
    let result = fx.system.add_panel_listener("ghost", |_| {});
    assert_eq!(result.unwrap_err(), LayoutError::UnknownPanel("ghost".to_string()));
}

#[test]
fn test_remove_listener() {
    let mut fx = Fixture::new();
    let p = fx.add_panels(fx.left, "p", 1);
    let events = EventRecorder::new();
    let id = fx.system.on_panel_changed(events.listener());

    click(&mut fx.system, p[0], IVec2::new(10, 5)).unwrap();
    assert!(fx.system.remove_listener(id));
    assert!(!fx.system.remove_listener(id));
    click(&mut fx.system, p[0], IVec2::new(10, 5)).unwrap();

    assert_eq!(events.len(), 1);
}
