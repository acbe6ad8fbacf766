//! Benchmarks for the continuity update loop.
//!
//! Run with: cargo bench -p paneflow-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paneflow_core::operation::{ContinuousOperationState, OperationPhase};
use paneflow_core::{Axis, PanelId, Vector2};
use paneflow_layout::{
    ContinuityConfig, ContinuityController, PivotTransform, PivotTransformConfig, StackTransform,
    StackTransformConfig,
};
use paneflow_nav::{NavigationMode, PivotState, StackState};
use std::hint::black_box;

fn operating(dx: f64) -> ContinuousOperationState {
    ContinuousOperationState {
        phase: OperationPhase::Operating,
        displacement: Vector2::new(dx, 0.0),
        velocity: Vector2::ZERO,
    }
}

fn bench_stack_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("continuity/stack_gesture");
    for depth in [2usize, 8, 32] {
        let state =
            StackState::new((0..depth).map(|i| PanelId::new(format!("p{i}")))).expect("stack");
        let transform =
            StackTransform::new(StackTransformConfig::default(), Axis::Horizontal, 400.0, &state);
        group.bench_with_input(BenchmarkId::new("drag_release", depth), &transform, |b, t| {
            b.iter(|| {
                let mut cc = ContinuityController::new(ContinuityConfig::default());
                cc.update(t, &ContinuousOperationState::IDLE, 0.0);
                for i in 0..30 {
                    let now = f64::from(i) * 16.0;
                    black_box(cc.update(t, &operating(f64::from(i) * 10.0), now));
                }
                for i in 30..50 {
                    let now = f64::from(i) * 16.0;
                    black_box(cc.update(t, &ContinuousOperationState::IDLE, now));
                }
            })
        });
    }
    group.finish();
}

fn bench_pivot_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("continuity/pivot_slots");
    for radius in [1usize, 2, 4] {
        let items: Vec<PanelId> = (0..12).map(|i| PanelId::new(format!("tab{i}"))).collect();
        let state = PivotState::new(items.len(), 0, NavigationMode::Loop).expect("pivot");
        let config = PivotTransformConfig::default().with_slot_radius(radius);
        let transform = PivotTransform::new(config, Axis::Horizontal, 400.0, &items, state);
        group.bench_with_input(BenchmarkId::new("drag", radius), &transform, |b, t| {
            let mut cc = ContinuityController::new(ContinuityConfig::default());
            cc.update(t, &ContinuousOperationState::IDLE, 0.0);
            let mut now = 0.0;
            b.iter(|| {
                now += 16.0;
                black_box(cc.update(t, &operating(-120.0), now))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stack_gesture, bench_pivot_slots);
criterion_main!(benches);
