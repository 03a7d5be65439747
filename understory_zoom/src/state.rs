// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::modes::LayoutMode;

/// Origin of a write to [`ViewportState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteSource {
    /// User interaction or programmatic control by the host.
    ///
    /// These writes leave any named layout mode and switch to
    /// [`LayoutMode::Custom`].
    User,
    /// Per-frame writes of the animation sequencer.
    Animation,
}

/// Current zoom factor, translation and layout mode of a view.
///
/// The translation is expressed in view space relative to the viewport
/// center: a layout-space point `p` is displayed at
/// `origin + (p - origin) * zoom + translate`, where `origin` is the viewport
/// center.
///
/// The zoom factor always lies within the configured limits; every write is
/// clamped.
#[derive(Clone, Debug)]
pub struct ViewportState {
    zoom: f64,
    translate: Vec2,
    mode: LayoutMode,
    min_zoom: f64,
    max_zoom: f64,
}

impl ViewportState {
    /// Creates a state at zoom `1.0`, zero translation and [`LayoutMode::Custom`].
    ///
    /// Limits are normalized so that `min_zoom <= max_zoom`.
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        let mut state = Self {
            zoom: 1.0,
            translate: Vec2::ZERO,
            mode: LayoutMode::Custom,
            min_zoom: 1.0,
            max_zoom: 1.0,
        };
        state.set_zoom_limits(min_zoom, max_zoom);
        state
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Returns the current layout mode.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Returns the zoom limits as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Clamps `zoom` into the configured limits.
    ///
    /// NaN is passed through so callers can detect degenerate targets.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom limits and re-clamps the current zoom.
    ///
    /// NaN limits are ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        if min_zoom.is_nan() || max_zoom.is_nan() {
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        let clamped = self.clamp_zoom(self.zoom);
        if clamped.is_finite() {
            self.zoom = clamped;
        }
    }

    /// Sets the zoom factor, clamped into the limits.
    ///
    /// Writing the current value, or a NaN, does nothing. A [`WriteSource::User`]
    /// write also scales the translation by the zoom ratio, so the point at
    /// the viewport center stays put, and switches to [`LayoutMode::Custom`].
    ///
    /// Returns `true` if the zoom changed.
    pub fn set_zoom(&mut self, zoom: f64, source: WriteSource) -> bool {
        let clamped = self.clamp_zoom(zoom);
        if clamped.is_nan() || clamped == self.zoom {
            return false;
        }
        let old = self.zoom;
        self.zoom = clamped;
        if source == WriteSource::User {
            self.translate *= clamped / old;
            self.mode = LayoutMode::Custom;
        }
        true
    }

    /// Sets the translation.
    ///
    /// A [`WriteSource::User`] write switches to [`LayoutMode::Custom`].
    /// Non-finite components are ignored.
    pub fn set_translate(&mut self, translate: Vec2, source: WriteSource) {
        if !translate.is_finite() {
            return;
        }
        self.translate = translate;
        if source == WriteSource::User {
            self.mode = LayoutMode::Custom;
        }
    }

    /// Sets the layout mode, returning `true` if it changed.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Returns the transform from layout space into view space.
    ///
    /// Content is scaled about `origin` (the viewport center) and then
    /// translated.
    #[must_use]
    pub fn view_transform(&self, origin: Point) -> Affine {
        let o = origin.to_vec2();
        Affine::translate(o + self.translate) * Affine::scale(self.zoom) * Affine::translate(-o)
    }

    /// Converts a layout-space point into view coordinates.
    #[must_use]
    pub fn layout_to_view_point(&self, origin: Point, pt: Point) -> Point {
        origin + (pt - origin) * self.zoom + self.translate
    }

    /// Converts a view-space point into layout coordinates.
    #[must_use]
    pub fn view_to_layout_point(&self, origin: Point, pt: Point) -> Point {
        origin + (pt - origin - self.translate) / self.zoom
    }
}
