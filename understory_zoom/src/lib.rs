// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: a headless zoom/pan controller.
//!
//! This crate maps pointer and wheel input onto a uniform scale plus
//! translation of some hosted content. It focuses on:
//! - Anchored zoom: the content under the cursor (or under a zoom box's
//!   center) lands exactly where it should after the zoom.
//! - Gesture modes: drag to pan, Alt-drag to zoom into a box.
//! - Animated transitions that compose when zooms overlap.
//! - Named layout modes that fill the viewport or restore 1:1 scale.
//!
//! It does **not** render, hit-test or own any scene. Callers are expected
//! to:
//! - Feed pointer, wheel and size notifications into a [`ZoomControl`].
//! - Capture and release the pointer as told by [`PointerOutcome`].
//! - Call [`ZoomControl::tick`] once per frame while
//!   [`ZoomControl::is_animating`] is `true`.
//! - Apply [`ZoomControl::view_transform`] to the content.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//!
//! use kurbo::{Point, Size};
//! use understory_zoom::{Modifiers, PointerDispatch, PointerOutcome, ZoomConfig, ZoomControl};
//!
//! let mut zc = ZoomControl::new(ZoomConfig::default()).unwrap();
//! zc.set_viewport_size(Size::new(800.0, 600.0));
//! zc.attach_content(Size::new(400.0, 300.0), Size::new(400.0, 300.0));
//!
//! // Fill the viewport and let the transition run to its end.
//! zc.zoom_to_fill();
//! let mut now = Duration::ZERO;
//! while zc.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(zc.zoom(), 2.0);
//!
//! // Drag to pan.
//! let down = zc.on_pointer_down(
//!     Point::new(10.0, 10.0),
//!     Modifiers::empty(),
//!     PointerDispatch::Bubble,
//! );
//! assert_eq!(down, PointerOutcome::Capture);
//! zc.on_pointer_move(Point::new(60.0, 10.0));
//! assert_eq!(zc.on_pointer_up(), PointerOutcome::Release);
//! assert_eq!(zc.translate().x, 50.0);
//! ```
//!
//! ## Coordinates
//!
//! Translations are measured in view space from the viewport center. A
//! layout-space point `p` is shown at `origin + (p - origin) * zoom +
//! translate`. [`ZoomControl::view_to_layout_point`] inverts this for pointer
//! positions.
//!
//! ## Animations
//!
//! Zoom transitions animate zoom and translation together over
//! [`ZoomConfig::animation_length`]. A new transition supersedes the running
//! one and starts from the current values. Zooming ends when the last started
//! zoom run has completed; see [`Animator`] for the exact rules. Direct writes
//! through [`ZoomControl::set_zoom`] or [`ZoomControl::set_translate`] cancel
//! the affected animations.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with `std`.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//! - `tracing`: emit `tracing` events for gestures, zoom requests and commits.
//! - `serde`: derive `Serialize`/`Deserialize` for [`ZoomConfig`] and the mode
//!   enums.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod anchor;
mod animation;
mod clamp;
mod config;
mod control;
mod gesture;
mod interaction;
mod layout;
mod modes;
mod state;

pub use anchor::{ZoomAnchor, ZoomTarget, compute_zoom, rect_delta_zoom, wheel_delta_zoom};
pub use animation::{AnimatedProperty, AnimationRun, Animator, Frame};
pub use clamp::{ContentMetrics, TranslateClamp};
pub use config::{ConfigError, ZoomConfig};
pub use control::{ZoomControl, ZoomControlDebugInfo};
pub use gesture::GestureSession;
pub use interaction::{
    GestureEnd, InteractionState, Modifiers, MoveEffect, PointerDispatch, PointerOutcome,
    mode_for_pointer_down,
};
pub use layout::{fill_target, original_target, padding_offset};
pub use modes::{InteractionMode, LayoutMode};
pub use state::{ViewportState, WriteSource};
