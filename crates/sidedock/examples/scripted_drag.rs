//! Scripted Drag Example - replays a pointer script against two docks
//!
//! Builds a left and a right dock on a 1280x720 host, then replays a click,
//! a width resize and a cross-dock placement drag, printing the frames the
//! renderer would receive after each step.
//!
//! Run with `RUST_LOG=sidedock=debug` to see the drag state transitions.

use sidedock::{
    ContainerConfig, ContainerFrame, DragHandle, HostArea, LayoutConfig, LayoutResult, LayoutSystem, MemoryStore,
    PanelConfig,
};
use sidedock_core::logging;
use sidedock_core::math::IVec2;

fn print_frames(step: &str, system: &LayoutSystem) {
    println!("== {}", step);
    system.render(&mut |frame: &ContainerFrame| {
        println!("  [{}] {:?} height={}", frame.name, frame.anchor, frame.content_height);
        for panel in &frame.panels {
            println!(
                "    {:<10} x={:<4} y={:<4} {}x{}{}",
                panel.name,
                panel.x,
                panel.y,
                panel.width,
                panel.height,
                if panel.minimized { " (minimized)" } else { "" }
            );
        }
    });
}

fn main() -> LayoutResult<()> {
    logging::init();

    let store = MemoryStore::new();
    let config = LayoutConfig::default().autosave(true);
    let mut system = LayoutSystem::new(config).with_store(store.clone());

    let host = HostArea::sized(1280, 720);
    let left = system.add_container(ContainerConfig::left("left").flow_width_threshold(300).host(host))?;
    let right = system.add_container(ContainerConfig::right("right").flow_width_threshold(300).host(host))?;

    let files = system.add_panel(left, PanelConfig::new("files").default_height(240))?;
    system.add_panel(left, PanelConfig::new("search").minimized_width(90))?;
    system.add_panel(left, PanelConfig::new("toolbar").fixed_height(36))?;
    let outline = system.add_panel(right, PanelConfig::new("outline"))?;

    system.on_panel_changed(|event| {
        println!("  event: {} {:?} -> {}x{}", event.name, event.reason, event.width, event.height);
    });
    print_frames("initial", &system);

    // Click the search header to minimize it.
    let search = system.panel_id("search")?;
    system.pointer_down(search, DragHandle::Header, IVec2::new(20, 250))?;
    system.pointer_up(IVec2::new(20, 250))?;
    print_frames("search minimized", &system);

    // Widen the files panel by 80 units.
    system.pointer_down(files, DragHandle::WidthBar, IVec2::new(300, 100))?;
    for x in [320, 350, 380] {
        system.pointer_move(IVec2::new(x, 100))?;
    }
    system.pointer_up(IVec2::new(380, 100))?;
    print_frames("files widened", &system);

    // Drag the outline panel from the right dock onto the top of the left dock.
    system.pointer_down(outline, DragHandle::Header, IVec2::new(1200, 10))?;
    for pos in [IVec2::new(1100, 20), IVec2::new(600, 30), IVec2::new(100, 20)] {
        system.pointer_move(pos)?;
    }
    system.pointer_up(IVec2::new(100, 20))?;
    print_frames("outline moved", &system);

    if let Some(saved) = store.get(&system.config().storage_key) {
        println!("== saved state\n  {}", saved);
    }
    Ok(())
}
