// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored zoom: pick a new zoom and translation so a chosen screen point
//! keeps (or moves to) a chosen position.

use kurbo::{Point, Rect, Size, Vec2};

use crate::clamp::{ContentMetrics, TranslateClamp};
use crate::state::ViewportState;

/// Screen-space handles of an anchored zoom.
///
/// The content point under `start_handle` before the zoom ends up under
/// `target_handle` afterwards. Both are in view coordinates; `origin` is the
/// viewport center the translation is measured from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnchor {
    /// Viewport center.
    pub origin: Point,
    /// Screen point whose content is tracked.
    pub start_handle: Point,
    /// Screen point the tracked content should land on.
    pub target_handle: Point,
}

impl ZoomAnchor {
    /// Zoom that keeps the viewport center fixed.
    #[must_use]
    pub fn center(origin: Point) -> Self {
        Self::fixed(origin, origin)
    }

    /// Zoom that keeps `point` fixed, as for a wheel zoom under the cursor.
    #[must_use]
    pub fn fixed(origin: Point, point: Point) -> Self {
        Self {
            origin,
            start_handle: point,
            target_handle: point,
        }
    }

    /// Zoom that moves the content under `start_handle` to `target_handle`.
    #[must_use]
    pub fn moving(origin: Point, start_handle: Point, target_handle: Point) -> Self {
        Self {
            origin,
            start_handle,
            target_handle,
        }
    }
}

/// Zoom factor and translation an anchored zoom resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTarget {
    /// Target zoom, already clamped to the zoom limits (or NaN).
    pub zoom: f64,
    /// Target translation, already passed through the clamp policy.
    pub translate: Vec2,
}

impl ZoomTarget {
    /// Returns `true` if both the zoom and the translation are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.zoom.is_finite() && self.translate.is_finite()
    }
}

/// Computes the result of multiplying the current zoom by `delta_zoom` about
/// `anchor`.
///
/// The new zoom is clamped to the state's limits before the translation is
/// solved for, so the anchor holds for the zoom that will actually be shown.
/// An infinite `delta_zoom` therefore lands on a zoom limit, while NaN stays
/// NaN.
#[must_use]
pub fn compute_zoom(
    state: &ViewportState,
    anchor: ZoomAnchor,
    delta_zoom: f64,
    clamp: TranslateClamp,
    metrics: Option<&ContentMetrics>,
) -> ZoomTarget {
    let start_zoom = state.zoom();
    let start_translate = state.translate();
    let zoom = state.clamp_zoom(start_zoom * delta_zoom);

    let v = anchor.start_handle - anchor.origin;
    let v_target = anchor.target_handle - anchor.origin;

    let content_point = (v - start_translate) / start_zoom;
    let projected = content_point * zoom + start_translate;
    let end_delta = v_target - projected;

    ZoomTarget {
        zoom,
        translate: clamp.coerce_vec(start_translate + end_delta, zoom, metrics),
    }
}

/// Converts a raw wheel delta into a bounded multiplicative zoom change.
///
/// The result lies in `[1 / max_zoom_delta, max_zoom_delta]`, so a single
/// tick's effect is bounded regardless of device sensitivity. A
/// `max_zoom_delta` below `1.0` (or NaN) is treated as `1.0`.
#[must_use]
pub fn wheel_delta_zoom(raw_delta: f64, multiplier: f64, max_zoom_delta: f64) -> f64 {
    let delta = raw_delta / 10_000.0 * multiplier + 1.0;
    if delta.is_nan() {
        return 1.0;
    }
    let max_zoom_delta = max_zoom_delta.max(1.0);
    delta.clamp(1.0 / max_zoom_delta, max_zoom_delta)
}

/// Zoom factor change that makes `rect` fill a viewport of size `viewport`.
#[must_use]
pub fn rect_delta_zoom(rect: Rect, viewport: Size) -> f64 {
    (viewport.width / rect.width()).min(viewport.height / rect.height())
}
