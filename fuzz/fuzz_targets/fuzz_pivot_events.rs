#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paneflow::{
    InputEvent, NavigationMode, PaneflowConfig, PanelId, PivotView, PointerEvent, Rect,
    WheelEvent,
};

#[derive(Arbitrary, Debug)]
enum Step {
    Down { x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up { x: i16, y: i16 },
    Cancel,
    Wheel { dx: i16, dy: i16 },
    Select(u8),
    SetItems(u8),
    Resize { width: u16 },
    Poll,
    Frame,
}

#[derive(Arbitrary, Debug)]
struct Input {
    looping: bool,
    items: u8,
    radius: u8,
    steps: Vec<(u8, Step)>,
}

fn ids(count: u8) -> Vec<PanelId> {
    (0..count).map(|i| PanelId::from(format!("tab{i}"))).collect()
}

fuzz_target!(|input: Input| {
    if input.steps.len() > 512 {
        return;
    }
    let mode = if input.looping {
        NavigationMode::Loop
    } else {
        NavigationMode::Linear
    };
    let mut config = PaneflowConfig::default();
    config.pivot.slot_radius = usize::from(input.radius % 4);
    let count = input.items % 9 + 1;
    let Ok(mut view) = PivotView::new(ids(count), 0, mode, config, Rect::from_size(400.0, 600.0))
    else {
        return;
    };

    let mut now = 0.0;
    for (dt, step) in input.steps {
        now += f64::from(dt);
        let pointer = |x: i16, y: i16| PointerEvent::new(f64::from(x), f64::from(y), now);
        match step {
            Step::Down { x, y } => {
                view.handle_input(&InputEvent::PointerDown(pointer(x, y)));
            }
            Step::Move { x, y } => {
                view.handle_input(&InputEvent::PointerMove(pointer(x, y)));
            }
            Step::Up { x, y } => {
                view.handle_input(&InputEvent::PointerUp(pointer(x, y)));
            }
            Step::Cancel => {
                view.handle_input(&InputEvent::PointerCancel(pointer(0, 0)));
            }
            Step::Wheel { dx, dy } => {
                let wheel = WheelEvent::new(f64::from(dx), f64::from(dy), now);
                view.handle_input(&InputEvent::Wheel(wheel));
            }
            Step::Select(i) => {
                view.select(usize::from(i % 12));
            }
            Step::SetItems(n) => {
                let _ = view.set_items(ids(n % 9));
            }
            Step::Resize { width } => {
                view.resize(Rect::from_size(f64::from(width), 600.0));
            }
            Step::Poll => {
                view.poll(now);
            }
            Step::Frame => {
                let out = view.frame(now);
                let mut keys: Vec<&PanelId> = out.panels.iter().map(|p| &p.key).collect();
                keys.sort();
                keys.dedup();
                assert_eq!(keys.len(), out.panels.len(), "duplicate frame keys");
                for panel in &out.panels {
                    assert!(panel.position.is_finite());
                }
            }
        }
        let state = view.state();
        assert!(state.active_index() < state.item_count());
    }
});
