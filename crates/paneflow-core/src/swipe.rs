#![forbid(unsafe_code)]

//! Swipe recognition: pointer and wheel input merged into one swipe state.
//!
//! [`SwipeRecognizer`] is a stateful processor fed with [`InputEvent`]s. It
//! exposes a [`SwipeInputState`] snapshot for live visual feedback and
//! returns a [`SwipeEnd`] when a gesture completes as a swipe.
//!
//! # State Machine
//!
//! Two channels feed one state:
//!
//! - **Pointer channel**: `Idle → Tracking` on down. Once the directional lock
//!   engages on the configured axis the phase becomes `Swiping` with
//!   `direction = sign(axis displacement)`. A lock on the other axis keeps the
//!   gesture in `Tracking` with direction 0 until release.
//! - **Wheel channel**: wheel deltas are accumulated (sign-inverted, because
//!   a wheel delta is a scroll direction, not a finger direction) and run
//!   through the same lock. After `wheel_idle_timeout_ms` without a wheel
//!   event, [`poll`](SwipeRecognizer::poll) closes the wheel gesture.
//!
//! The pointer channel has priority: wheel events are ignored while a
//! pointer is down, and a pointer-down discards any open wheel gesture.
//!
//! # Invariants
//!
//! 1. `direction != 0` only when `phase` is `Swiping` or `Ended` and the
//!    locked axis equals the configured axis.
//! 2. A canceled pointer gesture never produces a [`SwipeEnd`], whatever
//!    its displacement.
//! 3. A release is a swipe iff the lock engaged on the configured axis and
//!    the [`TriggerRule`] accepts the axis displacement/velocity.
//!
//! # Failure Modes
//!
//! - Release before the lock engaged: the gesture ends with direction 0 and
//!   no [`SwipeEnd`], however fast it was (taps with jitter never navigate).
//! - Zero elapsed time: velocity is reported as zero.

use serde::{Deserialize, Serialize};

use crate::event::{InputEvent, PointerEvent, WheelEvent};
use crate::geometry::{Axis, Vector2};
use crate::lock::{DirectionalLock, LockState};
use crate::pointer::{PointerTracker, PointerTrackerConfig, PointerTrackingState};
use crate::threshold::Threshold;

/// Default release distance threshold (px).
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 100.0;
/// Default release velocity threshold (px/ms).
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.5;
/// Default axis-lock threshold (px).
pub const DEFAULT_LOCK_THRESHOLD: f64 = 10.0;
/// Default wheel idle timeout (ms).
pub const DEFAULT_WHEEL_IDLE_TIMEOUT_MS: f64 = 150.0;

const MIN_WHEEL_IDLE_TIMEOUT_MS: f64 = 16.0;
const MAX_WHEEL_IDLE_TIMEOUT_MS: f64 = 2_000.0;

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Phase of the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    /// Input is active but not (or not yet) a swipe on the configured axis.
    Tracking,
    /// Locked to the configured axis.
    Swiping,
    /// The last gesture finished.
    Ended,
}

/// Sign of the axis displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeDirection {
    /// Toward smaller coordinates (left/up).
    Negative,
    #[default]
    None,
    /// Toward larger coordinates (right/down).
    Positive,
}

impl SwipeDirection {
    /// Direction of a signed displacement.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::None
        }
    }

    /// `-1`, `0`, or `1`.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::None => 0,
            Self::Positive => 1,
        }
    }
}

/// Live swipe snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeInputState {
    pub phase: SwipePhase,
    /// px
    pub displacement: Vector2,
    /// px/ms
    pub velocity: Vector2,
    pub direction: SwipeDirection,
}

impl SwipeInputState {
    /// The idle state.
    pub const IDLE: Self = Self {
        phase: SwipePhase::Idle,
        displacement: Vector2::ZERO,
        velocity: Vector2::ZERO,
        direction: SwipeDirection::None,
    };

    /// Whether input is currently active (tracking or swiping).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, SwipePhase::Tracking | SwipePhase::Swiping)
    }
}

/// Which channel produced a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeSource {
    Pointer,
    Wheel,
}

/// A completed swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEnd {
    /// Never [`SwipeDirection::None`].
    pub direction: SwipeDirection,
    pub displacement: Vector2,
    pub velocity: Vector2,
    pub source: SwipeSource,
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// How distance and velocity combine at release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerRule {
    /// Distance OR velocity (default). A fast short flick still triggers;
    /// this is permissive and known to feel "too sensitive" on some devices.
    #[default]
    Either,
    /// Distance AND velocity.
    Both,
}

/// Release and lock thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeInputThresholds {
    /// px
    pub distance_threshold: f64,
    /// px/ms
    pub velocity_threshold: f64,
    /// px
    pub lock_threshold: f64,
}

impl Default for SwipeInputThresholds {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
        }
    }
}

/// Whether a release with the given axis displacement/velocity is a swipe.
#[must_use]
pub fn is_swipe_triggered(
    axis_displacement: f64,
    axis_velocity: f64,
    thresholds: &SwipeInputThresholds,
    rule: TriggerRule,
) -> bool {
    let far = axis_displacement.abs() >= thresholds.distance_threshold;
    let fast = axis_velocity.abs() >= thresholds.velocity_threshold;
    match rule {
        TriggerRule::Either => far || fast,
        TriggerRule::Both => far && fast,
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Recognizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Axis that counts as a swipe (default: horizontal).
    pub axis: Axis,
    pub thresholds: SwipeInputThresholds,
    pub trigger_rule: TriggerRule,
    /// Idle time that closes a wheel gesture (default: 150ms).
    pub wheel_idle_timeout_ms: f64,
    /// Whether wheel input drives swipes (default: true).
    pub enable_wheel: bool,
    pub pointer: PointerTrackerConfig,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            thresholds: SwipeInputThresholds::default(),
            trigger_rule: TriggerRule::Either,
            wheel_idle_timeout_ms: DEFAULT_WHEEL_IDLE_TIMEOUT_MS,
            enable_wheel: true,
            pointer: PointerTrackerConfig::default(),
        }
    }
}

impl SwipeConfig {
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SwipeInputThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_trigger_rule(mut self, rule: TriggerRule) -> Self {
        self.trigger_rule = rule;
        self
    }

    #[must_use]
    pub fn with_wheel_idle_timeout_ms(mut self, ms: f64) -> Self {
        self.wheel_idle_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn with_wheel(mut self, enabled: bool) -> Self {
        self.enable_wheel = enabled;
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerTrackerConfig) -> Self {
        self.pointer = pointer;
        self
    }

    /// Load config from environment variables on top of the defaults.
    ///
    /// Reads:
    /// - `PANEFLOW_DISTANCE_THRESHOLD`: release distance in px (`"120"`,
    ///   `"120px"`); a percentage is left for the container owner to resolve
    /// - `PANEFLOW_VELOCITY_THRESHOLD`: release velocity in px/ms
    /// - `PANEFLOW_LOCK_THRESHOLD`: axis-lock distance in px
    /// - `PANEFLOW_WHEEL_IDLE_MS`: wheel idle timeout in ms
    /// - `PANEFLOW_TRIGGER_RULE`: `either` or `both`
    ///
    /// Values are clamped by [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `PANEFLOW_*` environment overrides to this config.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var("PANEFLOW_DISTANCE_THRESHOLD") {
            match raw.parse::<Threshold>() {
                Ok(Threshold::Px(px)) => self.thresholds.distance_threshold = px,
                // Resolved against the container by the owner of the bounds.
                Ok(Threshold::Ratio(_)) => {
                    tracing::debug!(
                        message = "config.deferred",
                        key = "PANEFLOW_DISTANCE_THRESHOLD"
                    );
                }
                Err(_) => tracing::warn!(
                    message = "config.ignored",
                    key = "PANEFLOW_DISTANCE_THRESHOLD",
                    value = raw.as_str()
                ),
            }
        }
        if let Some(v) = env_f64("PANEFLOW_VELOCITY_THRESHOLD") {
            self.thresholds.velocity_threshold = v;
        }
        if let Some(v) = env_f64("PANEFLOW_LOCK_THRESHOLD") {
            self.thresholds.lock_threshold = v;
        }
        if let Some(v) = env_f64("PANEFLOW_WHEEL_IDLE_MS") {
            self.wheel_idle_timeout_ms = v;
        }
        if let Ok(val) = std::env::var("PANEFLOW_TRIGGER_RULE") {
            match val.trim().to_ascii_lowercase().as_str() {
                "either" | "or" => self.trigger_rule = TriggerRule::Either,
                "both" | "and" => self.trigger_rule = TriggerRule::Both,
                other => tracing::warn!(
                    message = "config.ignored",
                    key = "PANEFLOW_TRIGGER_RULE",
                    value = other
                ),
            }
        }
        self.validated()
    }

    /// Clamp values to safe ranges.
    ///
    /// - thresholds: non-finite → default, negative → 0
    /// - `wheel_idle_timeout_ms`: clamped to 16–2000ms
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = SwipeInputThresholds::default();
        self.thresholds.distance_threshold = sane(
            "distance_threshold",
            self.thresholds.distance_threshold,
            defaults.distance_threshold,
        );
        self.thresholds.velocity_threshold = sane(
            "velocity_threshold",
            self.thresholds.velocity_threshold,
            defaults.velocity_threshold,
        );
        self.thresholds.lock_threshold =
            sane("lock_threshold", self.thresholds.lock_threshold, defaults.lock_threshold);

        let timeout = sane(
            "wheel_idle_timeout_ms",
            self.wheel_idle_timeout_ms,
            DEFAULT_WHEEL_IDLE_TIMEOUT_MS,
        );
        let clamped = timeout.clamp(MIN_WHEEL_IDLE_TIMEOUT_MS, MAX_WHEEL_IDLE_TIMEOUT_MS);
        if clamped != timeout {
            tracing::warn!(
                message = "config.clamped",
                key = "wheel_idle_timeout_ms",
                value = timeout,
                clamped
            );
        }
        self.wheel_idle_timeout_ms = clamped;
        self
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(message = "config.ignored", key, value = raw.as_str());
            None
        }
    }
}

fn sane(key: &'static str, value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        tracing::warn!(message = "config.clamped", key, value, clamped = default);
        return default;
    }
    if value < 0.0 {
        tracing::warn!(message = "config.clamped", key, value, clamped = 0.0);
        return 0.0;
    }
    value
}

// ---------------------------------------------------------------------------
// Container props
// ---------------------------------------------------------------------------

/// What the host applies to the gesture container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerProps {
    /// CSS `touch-action` value leaving the cross axis to native scrolling.
    pub touch_action: &'static str,
}

// ---------------------------------------------------------------------------
// Wheel channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct WheelChannel {
    accumulated: Vector2,
    first_ms: Option<f64>,
    last_ms: Option<f64>,
    lock: DirectionalLock,
}

impl WheelChannel {
    fn new(lock_threshold: f64) -> Self {
        Self {
            lock: DirectionalLock::new(lock_threshold),
            ..Self::default()
        }
    }

    fn is_open(&self) -> bool {
        self.last_ms.is_some()
    }

    fn velocity(&self) -> Vector2 {
        match (self.first_ms, self.last_ms) {
            (Some(first), Some(last)) => self.accumulated.per(last - first),
            _ => Vector2::ZERO,
        }
    }

    fn reset(&mut self) {
        self.accumulated = Vector2::ZERO;
        self.first_ms = None;
        self.last_ms = None;
        self.lock.reset();
    }
}

// ---------------------------------------------------------------------------
// SwipeRecognizer
// ---------------------------------------------------------------------------

/// Stateful swipe recognizer.
///
/// Feed events through [`handle`](SwipeRecognizer::handle) and call
/// [`poll`](SwipeRecognizer::poll) from a timer or animation frame so wheel
/// gestures can close after their idle timeout.
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    tracker: PointerTracker,
    lock: DirectionalLock,
    wheel: WheelChannel,
    state: SwipeInputState,
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl SwipeRecognizer {
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        let lock_threshold = config.thresholds.lock_threshold;
        Self {
            tracker: PointerTracker::new(config.pointer.clone()),
            lock: DirectionalLock::new(lock_threshold),
            wheel: WheelChannel::new(lock_threshold),
            state: SwipeInputState::IDLE,
            config,
        }
    }

    /// Current swipe snapshot.
    #[inline]
    #[must_use]
    pub fn state(&self) -> SwipeInputState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Replace thresholds (e.g. after a container-relative threshold was
    /// re-resolved on resize). Takes effect for the next gesture's lock.
    pub fn set_thresholds(&mut self, thresholds: SwipeInputThresholds) {
        self.config.thresholds = thresholds;
        if !self.tracker.is_tracking() {
            self.lock = DirectionalLock::new(thresholds.lock_threshold);
        }
        if !self.wheel.is_open() {
            self.wheel = WheelChannel::new(thresholds.lock_threshold);
        }
    }

    /// Props for the container element.
    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        ContainerProps {
            touch_action: match self.config.axis {
                Axis::Horizontal => "pan-y",
                Axis::Vertical => "pan-x",
            },
        }
    }

    /// Whether a pointer gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Whether document-level pointer listeners should be attached.
    #[inline]
    #[must_use]
    pub fn wants_document_events(&self) -> bool {
        self.tracker.wants_document_events()
    }

    /// Raw pointer snapshot.
    #[must_use]
    pub fn pointer_state(&self) -> &PointerTrackingState {
        self.tracker.state()
    }

    /// Time at which an open wheel gesture will close, if any.
    #[must_use]
    pub fn wheel_deadline(&self) -> Option<f64> {
        self.wheel
            .last_ms
            .map(|last| last + self.config.wheel_idle_timeout_ms)
    }

    /// Process one event. Returns a swipe end when a pointer gesture
    /// completes as a swipe.
    pub fn handle(&mut self, event: &InputEvent) -> Option<SwipeEnd> {
        match event {
            InputEvent::PointerDown(e) => {
                self.on_pointer_down(e);
                None
            }
            InputEvent::PointerMove(e) => {
                self.on_pointer_move(e);
                None
            }
            InputEvent::PointerUp(e) => self.on_pointer_up(e),
            InputEvent::PointerCancel(e) => {
                self.on_pointer_cancel(e);
                None
            }
            InputEvent::Wheel(e) => {
                self.on_wheel(e);
                None
            }
        }
    }

    /// Returns `true` if the pointer started a gesture.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        if !self.tracker.on_pointer_down(event) {
            return false;
        }
        if self.wheel.is_open() {
            tracing::trace!(message = "swipe.wheel_discarded", reason = "pointer_down");
            self.wheel.reset();
        }
        self.lock.reset();
        self.state = SwipeInputState {
            phase: SwipePhase::Tracking,
            ..SwipeInputState::IDLE
        };
        true
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !self.tracker.on_pointer_move(event) {
            return;
        }
        let tracking = *self.tracker.state();
        let lock = self.lock.update(&tracking);
        self.state = self.classify(lock, tracking.displacement(), tracking.velocity());
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Option<SwipeEnd> {
        let snapshot = self.tracker.on_pointer_up(event)?;
        let lock = self.lock.update_displacement(snapshot.displacement());
        self.lock.reset();
        self.finish(
            lock,
            snapshot.displacement(),
            snapshot.velocity(),
            SwipeSource::Pointer,
        )
    }

    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) {
        if let Some(snapshot) = self.tracker.on_pointer_cancel(event) {
            self.finish_canceled(snapshot);
        }
    }

    pub fn on_wheel(&mut self, event: &WheelEvent) {
        if !self.config.enable_wheel {
            return;
        }
        if self.tracker.is_tracking() {
            tracing::trace!(message = "swipe.wheel_ignored", reason = "pointer_down");
            return;
        }
        let wheel = &mut self.wheel;
        wheel.accumulated = wheel.accumulated - Vector2::new(event.delta_x, event.delta_y);
        wheel.first_ms.get_or_insert(event.timestamp);
        wheel.last_ms = Some(event.timestamp);
        let lock = wheel.lock.update_displacement(wheel.accumulated);
        let (displacement, velocity) = (wheel.accumulated, wheel.velocity());
        self.state = self.classify(lock, displacement, velocity);
    }

    /// Close the wheel gesture if it has been idle long enough.
    pub fn poll(&mut self, now_ms: f64) -> Option<SwipeEnd> {
        let deadline = self.wheel_deadline()?;
        if now_ms < deadline {
            return None;
        }
        let lock = self.wheel.lock.state();
        let displacement = self.wheel.accumulated;
        let velocity = self.wheel.velocity();
        self.wheel.reset();
        self.finish(lock, displacement, velocity, SwipeSource::Wheel)
    }

    /// Drop all gesture state without reporting anything.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.lock.reset();
        self.wheel.reset();
        self.state = SwipeInputState::IDLE;
    }

    fn classify(
        &self,
        lock: LockState,
        displacement: Vector2,
        velocity: Vector2,
    ) -> SwipeInputState {
        let (phase, direction) = match lock.locked_axis {
            Some(axis) if axis == self.config.axis => (
                SwipePhase::Swiping,
                SwipeDirection::of(displacement.along(axis)),
            ),
            _ => (SwipePhase::Tracking, SwipeDirection::None),
        };
        SwipeInputState {
            phase,
            displacement,
            velocity,
            direction,
        }
    }

    fn finish(
        &mut self,
        lock: LockState,
        displacement: Vector2,
        velocity: Vector2,
        source: SwipeSource,
    ) -> Option<SwipeEnd> {
        let axis = self.config.axis;
        let on_axis = lock.locked_axis == Some(axis);
        let triggered = on_axis
            && is_swipe_triggered(
                displacement.along(axis),
                velocity.along(axis),
                &self.config.thresholds,
                self.config.trigger_rule,
            );
        let direction = if triggered {
            SwipeDirection::of(displacement.along(axis))
        } else {
            SwipeDirection::None
        };
        self.state = SwipeInputState {
            phase: SwipePhase::Ended,
            displacement,
            velocity,
            direction,
        };
        tracing::debug!(
            message = "swipe.end",
            source = ?source,
            triggered,
            on_axis,
            displacement = displacement.along(axis),
            velocity = velocity.along(axis),
            direction = direction.sign()
        );
        if direction == SwipeDirection::None {
            return None;
        }
        Some(SwipeEnd {
            direction,
            displacement,
            velocity,
            source,
        })
    }

    fn finish_canceled(&mut self, snapshot: PointerTrackingState) {
        self.lock.reset();
        self.state = SwipeInputState {
            phase: SwipePhase::Ended,
            displacement: snapshot.displacement(),
            velocity: snapshot.velocity(),
            direction: SwipeDirection::None,
        };
        tracing::debug!(
            message = "swipe.canceled",
            displacement_x = snapshot.displacement().x,
            displacement_y = snapshot.displacement().y
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
