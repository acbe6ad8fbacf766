#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paneflow::{
    InputEvent, PaneflowConfig, PanelId, PointerEvent, Rect, StackView, WheelEvent,
};

#[derive(Arbitrary, Debug)]
enum Step {
    Down { x: i16, y: i16, id: u8 },
    Move { x: i16, y: i16, id: u8 },
    Up { x: i16, y: i16, id: u8 },
    Cancel { id: u8 },
    Wheel { dx: i16, dy: i16 },
    Push(u8),
    Go(i8),
    MoveTo(u8),
    Replace(u8),
    AnimateBack,
    Resize { width: u16 },
    Poll,
    Frame,
}

#[derive(Arbitrary, Debug)]
struct Input {
    overswipe: bool,
    wheel: bool,
    steps: Vec<(u8, Step)>,
}

fuzz_target!(|input: Input| {
    if input.steps.len() > 512 {
        return;
    }
    let config = PaneflowConfig::default()
        .with_commit_on_overswipe(input.overswipe)
        .with_forward_wheel(input.wheel);
    let Ok(mut view) = StackView::new(
        [PanelId::from("root")],
        config,
        Rect::from_size(400.0, 800.0),
    ) else {
        return;
    };

    let mut now = 0.0;
    for (dt, step) in input.steps {
        now += f64::from(dt);
        let pointer = |x: i16, y: i16, id: u8| {
            PointerEvent::new(f64::from(x), f64::from(y), now).with_id(i32::from(id % 3))
        };
        match step {
            Step::Down { x, y, id } => {
                view.handle_input(&InputEvent::PointerDown(pointer(x, y, id)));
            }
            Step::Move { x, y, id } => {
                view.handle_input(&InputEvent::PointerMove(pointer(x, y, id)));
            }
            Step::Up { x, y, id } => {
                view.handle_input(&InputEvent::PointerUp(pointer(x, y, id)));
            }
            Step::Cancel { id } => {
                view.handle_input(&InputEvent::PointerCancel(pointer(0, 0, id)));
            }
            Step::Wheel { dx, dy } => {
                let wheel = WheelEvent::new(f64::from(dx), f64::from(dy), now);
                view.handle_input(&InputEvent::Wheel(wheel));
            }
            Step::Push(n) => {
                view.push(format!("p{}", n % 16));
            }
            Step::Go(d) => {
                view.go(i32::from(d));
            }
            Step::MoveTo(d) => {
                view.move_to(usize::from(d % 8));
            }
            Step::Replace(n) => {
                view.replace(format!("p{}", n % 16));
            }
            Step::AnimateBack => {
                view.animate_back(now);
            }
            Step::Resize { width } => {
                view.resize(Rect::from_size(f64::from(width), 800.0));
            }
            Step::Poll => {
                view.poll(now);
            }
            Step::Frame => {
                let out = view.frame(now);
                for panel in &out.panels {
                    assert!(panel.position.is_finite(), "non-finite position {panel:?}");
                    assert!(panel.scale.is_finite() && panel.scale > 0.0);
                }
            }
        }

        // Stack ids stay unique and the root never leaves.
        let stack = view.state().stack();
        assert!(!stack.is_empty());
        for (i, id) in stack.iter().enumerate() {
            assert!(!stack[..i].contains(id), "duplicate id {id}");
        }
        assert_eq!(view.depth(), stack.len() - 1);
    }
});
