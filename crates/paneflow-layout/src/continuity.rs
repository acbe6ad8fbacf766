#![forbid(unsafe_code)]

//! Continuity: rendered positions never jump.
//!
//! [`ContinuityController`] owns one record per rendered panel key (last
//! committed position, last-known role, motion state) and reconciles it
//! with a [`PanelPositioner`] snapshot and the live operation on every
//! [`update`](ContinuityController::update).
//!
//! # Rules
//!
//! 1. While operating, a panel tracks `target + displacement` directly.
//! 2. When the operation ends and the new target is within the snap
//!    tolerance (1px) of the last rendered position, the panel commits
//!    instantly.
//! 3. Otherwise it animates from exactly the last rendered position.
//! 4. Panels tracked by a gesture keep the positioning rules captured when
//!    the gesture began, even if navigation changes mid-gesture; the new
//!    rules apply from gesture end.
//! 5. A new gesture interrupts animations; a changed target restarts
//!    interpolation from the current interpolated value.
//! 6. Panels leaving the rendered set move to the positioner's exit
//!    position for the navigation that removed them, or else to the nearer
//!    off-screen side (`-size` if last seen left of 0, else `+size`).
//!    Already there, or hidden and at rest: the record is dropped at once.
//!    Otherwise they animate outward and the record is dropped on arrival.
//! 7. A container size change snaps every panel to its new target.
//!
//! The first update after construction also snaps (no mount animation).
//! Panels appearing later start from the positioner's entry position,
//! computed against the snapshot rendered on the previous update.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use paneflow_core::PanelId;
use paneflow_core::animation::{AnimationFrameInterpolator, EasingKind, InterpolatorFrame};
use paneflow_core::operation::ContinuousOperationState;

use crate::frame::{FrameOutput, MotionState, PanelFrame};
use crate::positioner::PanelPositioner;
use crate::role::PanelRole;

/// Default transition duration (ms).
pub const DEFAULT_DURATION_MS: f64 = 300.0;
/// Default snap tolerance (px).
pub const DEFAULT_SNAP_TOLERANCE: f64 = 1.0;

const SIZE_EPSILON: f64 = 0.5;

/// Continuity configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuityConfig {
    pub duration_ms: f64,
    pub easing: EasingKind,
    /// Distance under which a settle commits instantly (px).
    pub snap_tolerance: f64,
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: EasingKind::EaseOutCubic,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
        }
    }
}

impl ContinuityConfig {
    #[must_use]
    pub fn with_duration_ms(mut self, ms: f64) -> Self {
        self.duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: EasingKind) -> Self {
        self.easing = easing;
        self
    }

    /// Clamp the duration to `[0, 5000]` and the tolerance to `>= 0`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let duration = if self.duration_ms.is_finite() {
            self.duration_ms.clamp(0.0, 5_000.0)
        } else {
            DEFAULT_DURATION_MS
        };
        if duration != self.duration_ms {
            tracing::warn!(
                message = "config.clamped",
                key = "duration_ms",
                value = self.duration_ms,
                clamped = duration
            );
        }
        self.duration_ms = duration;
        if !self.snap_tolerance.is_finite() || self.snap_tolerance < 0.0 {
            self.snap_tolerance = DEFAULT_SNAP_TOLERANCE;
        }
        self
    }
}

#[derive(Debug, Clone)]
struct ContinuityRecord {
    position: f64,
    role: PanelRole,
    motion: MotionState,
    scale: f64,
    visible: bool,
    interpolator: AnimationFrameInterpolator,
    /// Off-screen destination once the panel left the rendered set.
    exit_to: Option<f64>,
}

impl ContinuityRecord {
    fn at(position: f64, role: PanelRole) -> Self {
        Self {
            position,
            role,
            motion: MotionState::AtRest,
            scale: 1.0,
            visible: false,
            interpolator: AnimationFrameInterpolator::new(),
            exit_to: None,
        }
    }

    fn frame(&self, key: &PanelId) -> PanelFrame {
        PanelFrame {
            key: key.clone(),
            role: self.role,
            position: self.position,
            scale: self.scale,
            visible: self.visible,
            motion: self.motion,
        }
    }
}

/// Reconciles positioning snapshots into continuous per-panel frames.
#[derive(Debug, Clone)]
pub struct ContinuityController<P: PanelPositioner> {
    config: ContinuityConfig,
    records: FxHashMap<PanelId, ContinuityRecord>,
    /// Positioning rules captured when the current gesture began.
    latched: Option<P>,
    /// Snapshot rendered by the last update.
    previous: Option<P>,
    snap_next: bool,
    last_size: Option<f64>,
}

impl<P: PanelPositioner> Default for ContinuityController<P> {
    fn default() -> Self {
        Self::new(ContinuityConfig::default())
    }
}

impl<P: PanelPositioner> ContinuityController<P> {
    #[must_use]
    pub fn new(config: ContinuityConfig) -> Self {
        Self {
            config: config.validated(),
            records: FxHashMap::default(),
            latched: None,
            previous: None,
            snap_next: true,
            last_size: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ContinuityConfig {
        &self.config
    }

    /// Capture `positioner` as the rules of the gesture that is starting.
    ///
    /// Owners call this when a gesture begins and navigation may commit
    /// before the next update. Without it the rules are captured by the
    /// first operating update. Cleared by the first update that is not
    /// operating.
    pub fn latch(&mut self, positioner: &P) {
        self.latched = Some(positioner.clone());
        tracing::trace!(message = "continuity.latch", source = "owner");
    }

    /// Whether gesture rules are currently latched.
    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.latched.is_some()
    }

    /// Snap every panel on the next update.
    pub fn request_snap(&mut self) {
        self.snap_next = true;
    }

    /// Whether any panel is mid-animation.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.records
            .values()
            .any(|r| r.motion == MotionState::Animating)
    }

    /// Number of live records (rendered or exiting panels).
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Last committed position and motion of `key`.
    #[must_use]
    pub fn last_position(&self, key: &PanelId) -> Option<(f64, MotionState)> {
        self.records.get(key).map(|r| (r.position, r.motion))
    }

    /// Reconcile with `positioner` and `op` at `now_ms`.
    pub fn update(
        &mut self,
        positioner: &P,
        op: &ContinuousOperationState,
        now_ms: f64,
    ) -> FrameOutput {
        let operating = op.is_operating();
        let size = positioner.size();
        let resized = self
            .last_size
            .is_some_and(|last| (last - size).abs() > SIZE_EPSILON);
        let snap_all = self.snap_next || resized;
        if resized {
            tracing::debug!(message = "continuity.resize", size);
        }

        if !operating {
            self.latched = None;
        } else if resized || self.latched.is_none() {
            self.latched = Some(positioner.clone());
            tracing::trace!(message = "continuity.latch");
        }

        let keys = positioner.panels();
        let live: FxHashSet<&PanelId> = keys.iter().collect();
        let mut panels = Vec::with_capacity(keys.len() + 2);

        for key in &keys {
            let frame = self.update_live(key, positioner, op, now_ms, snap_all);
            panels.push(frame);
        }

        let mut leaving: Vec<PanelId> = self
            .records
            .keys()
            .filter(|key| !live.contains(key))
            .cloned()
            .collect();
        leaving.sort();
        for key in leaving {
            if let Some(frame) = self.update_leaving(&key, positioner, op, now_ms, snap_all) {
                panels.push(frame);
            }
        }

        self.snap_next = false;
        self.last_size = Some(size);
        self.previous = Some(positioner.clone());

        FrameOutput {
            needs_frame: self.is_animating(),
            panels,
        }
    }

    /// Drop all records; the next update snaps.
    pub fn reset(&mut self) {
        self.records.clear();
        self.latched = None;
        self.previous = None;
        self.snap_next = true;
    }

    fn rules_for<'a>(&'a self, key: &PanelId, current: &'a P, operating: bool) -> &'a P {
        match &self.latched {
            Some(latched)
                if operating
                    && self.records.contains_key(key)
                    && latched.role_of(key).is_rendered() =>
            {
                latched
            }
            _ => current,
        }
    }

    fn update_live(
        &mut self,
        key: &PanelId,
        positioner: &P,
        op: &ContinuousOperationState,
        now_ms: f64,
        snap_all: bool,
    ) -> PanelFrame {
        let operating = op.is_operating();
        let rules = self.rules_for(key, positioner, operating);
        let role = rules.role_of(key);
        let target = rules.position(key, op).unwrap_or(0.0);
        let scale = rules.scale(key, op);
        let config = self.config;

        let entering = !snap_all && !operating && !self.records.contains_key(key);
        let start = match &self.previous {
            Some(previous) if entering => positioner
                .entry_position(key, previous)
                .unwrap_or(target),
            _ => target,
        };
        let record = self.records.entry(key.clone()).or_insert_with(|| {
            tracing::trace!(message = "continuity.enter", key = %key, start, target);
            ContinuityRecord::at(start, role)
        });
        record.role = role;
        record.scale = scale;
        record.exit_to = None;

        if snap_all {
            record.interpolator.cancel();
            record.position = target;
            record.motion = if operating {
                MotionState::Operating
            } else {
                MotionState::AtRest
            };
        } else if operating {
            if record.motion == MotionState::Animating {
                tracing::trace!(message = "continuity.interrupt", key = %key);
            }
            record.interpolator.cancel();
            record.position = target;
            record.motion = MotionState::Operating;
        } else {
            settle(record, target, &config, now_ms);
        }

        record.visible = record.motion == MotionState::Animating
            || positioner.is_visible(key, record.position, op);
        record.frame(key)
    }

    fn update_leaving(
        &mut self,
        key: &PanelId,
        positioner: &P,
        op: &ContinuousOperationState,
        now_ms: f64,
        snap_all: bool,
    ) -> Option<PanelFrame> {
        let operating = op.is_operating();
        let config = self.config;
        let size = positioner.size();
        let role = positioner.role_of(key);
        let exit_hint = self
            .previous
            .as_ref()
            .and_then(|previous| positioner.exit_position(key, previous));

        // Still under a gesture's latched rules: keep tracking the finger.
        let latched_target = match &self.latched {
            Some(latched) if operating && latched.role_of(key).is_rendered() => latched
                .position(key, op)
                .map(|target| (target, latched.scale(key, op))),
            _ => None,
        };

        let record = self.records.get_mut(key)?;
        record.role = role;

        if let Some((target, scale)) = latched_target
            && !snap_all
        {
            record.interpolator.cancel();
            record.position = target;
            record.scale = scale;
            record.motion = MotionState::Operating;
            return Some(record.frame(key));
        }

        if snap_all {
            self.records.remove(key);
            tracing::trace!(message = "continuity.discard", key = %key, reason = "snap");
            return None;
        }

        let running = record.interpolator.is_running();
        if record.exit_to.is_none() && !record.visible && !running {
            self.records.remove(key);
            tracing::trace!(message = "continuity.discard", key = %key, reason = "hidden");
            return None;
        }

        let nearer = if record.position < 0.0 { -size } else { size };
        let destination = *record.exit_to.get_or_insert(exit_hint.unwrap_or(nearer));
        let beyond = if destination < 0.0 {
            record.position <= destination + config.snap_tolerance
        } else {
            record.position >= destination - config.snap_tolerance
        };
        if beyond && !running {
            self.records.remove(key);
            tracing::trace!(message = "continuity.discard", key = %key, reason = "offscreen");
            return None;
        }

        settle(record, destination, &config, now_ms);
        let frame = record.frame(key);
        if record.motion == MotionState::AtRest {
            self.records.remove(key);
            tracing::trace!(message = "continuity.discard", key = %key, reason = "arrived");
        }
        Some(frame)
    }
}

/// Move a record toward `target` outside of any operation.
fn settle(record: &mut ContinuityRecord, target: f64, config: &ContinuityConfig, now_ms: f64) {
    let running = record.interpolator.is_running();
    if running {
        let retarget = record
            .interpolator
            .target()
            .is_some_and(|current| (current - target).abs() > f64::EPSILON);
        if retarget {
            record.interpolator.start(
                record.position,
                target,
                config.duration_ms,
                config.easing.function(),
                now_ms,
            );
        }
    } else if (target - record.position).abs() <= config.snap_tolerance {
        record.position = target;
        record.motion = MotionState::AtRest;
        return;
    } else {
        record.interpolator.start(
            record.position,
            target,
            config.duration_ms,
            config.easing.function(),
            now_ms,
        );
    }

    match record.interpolator.frame(now_ms) {
        Some(InterpolatorFrame::Value(value)) => {
            record.position = value;
            record.motion = MotionState::Animating;
        }
        Some(InterpolatorFrame::Complete(value)) => {
            record.position = value;
            record.motion = MotionState::AtRest;
        }
        None => {
            record.position = target;
            record.motion = MotionState::AtRest;
        }
    }
}
