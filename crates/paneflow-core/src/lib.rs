// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: pointer tracking, gesture classification, and frame interpolation.
//!
//! # Role in paneflow
//! `paneflow-core` is the input layer. It turns raw pointer and wheel events
//! into a classified, thresholded swipe and exposes that swipe through a
//! driver-agnostic [`operation::ContinuousOperationState`].
//!
//! # Primary responsibilities
//! - **PointerTracker**: one active pointer, start/current samples.
//! - **DirectionalLock**: permanent axis lock once a threshold is crossed.
//! - **SwipeRecognizer**: merged pointer + wheel channels, release thresholds.
//! - **EdgeGate**: back-style swipes that must start near a container edge.
//! - **Animation**: easing curves and the frame interpolator.
//!
//! # How it fits in the system
//! The navigators (`paneflow-nav`) consume [`swipe::SwipeEnd`] values, and
//! the layout crate (`paneflow-layout`) consumes operation snapshots to place
//! panels. Nothing in this crate knows about panels or navigation.

pub mod animation;
pub mod edge;
pub mod event;
pub mod geometry;
pub mod lock;
pub mod operation;
pub mod panel_id;
pub mod pointer;
pub mod swipe;
pub mod threshold;
pub mod time;

pub use geometry::{Axis, Edge, Rect, TimestampedPoint, Vector2};
pub use panel_id::PanelId;
