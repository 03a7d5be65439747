// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Targets of the named layout modes.

use kurbo::Vec2;

use crate::anchor::ZoomTarget;
use crate::clamp::ContentMetrics;
use crate::state::ViewportState;

/// Translation that centers the measurement padding of the content.
///
/// This is `-(content_size - desired_size) / 2` per axis, at zoom `1.0`.
#[must_use]
pub fn padding_offset(metrics: &ContentMetrics) -> Vec2 {
    let w = metrics.content_size.width - metrics.desired_size.width;
    let h = metrics.content_size.height - metrics.desired_size.height;
    Vec2::new(-w / 2.0, -h / 2.0)
}

/// Target of [`crate::LayoutMode::Original`]: 1:1 scale, padding centered.
#[must_use]
pub fn original_target(state: &ViewportState, metrics: &ContentMetrics) -> ZoomTarget {
    let zoom = state.clamp_zoom(1.0);
    ZoomTarget {
        zoom,
        translate: padding_offset(metrics) * zoom,
    }
}

/// Target of [`crate::LayoutMode::Fill`]: the largest zoom at which the whole
/// content fits the viewport.
///
/// Zero-sized content produces a non-finite target, which the animation
/// sequencer skips. Finite zooms are clamped into the zoom limits.
#[must_use]
pub fn fill_target(state: &ViewportState, metrics: &ContentMetrics) -> ZoomTarget {
    let x = metrics.viewport_size.width / metrics.content_size.width;
    let y = metrics.viewport_size.height / metrics.content_size.height;
    // `f64::min` would hide a NaN ratio behind the other axis.
    let raw = if x.is_nan() || y.is_nan() {
        f64::NAN
    } else {
        x.min(y)
    };
    let zoom = if raw.is_finite() {
        state.clamp_zoom(raw)
    } else {
        raw
    };
    ZoomTarget {
        zoom,
        translate: padding_offset(metrics) * zoom,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{fill_target, original_target, padding_offset};
    use crate::clamp::ContentMetrics;
    use crate::state::ViewportState;

    fn metrics(content: Size, desired: Size, viewport: Size) -> ContentMetrics {
        ContentMetrics {
            content_size: content,
            desired_size: desired,
            viewport_size: viewport,
        }
    }

    #[test]
    fn original_centers_padding() {
        let state = ViewportState::new(0.01, 100.0);
        let m = metrics(
            Size::new(120.0, 80.0),
            Size::new(100.0, 60.0),
            Size::new(800.0, 600.0),
        );
        assert_eq!(padding_offset(&m), Vec2::new(-10.0, -10.0));
        let target = original_target(&state, &m);
        assert_eq!(target.zoom, 1.0);
        assert_eq!(target.translate, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn fill_uses_tighter_axis_and_scales_padding() {
        let state = ViewportState::new(0.01, 100.0);
        let m = metrics(
            Size::new(400.0, 100.0),
            Size::new(380.0, 100.0),
            Size::new(800.0, 600.0),
        );
        let target = fill_target(&state, &m);
        assert_eq!(target.zoom, 2.0);
        assert_eq!(target.translate, Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn fill_is_clamped_to_limits() {
        let state = ViewportState::new(0.5, 4.0);
        let m = metrics(
            Size::new(10.0, 10.0),
            Size::new(10.0, 10.0),
            Size::new(800.0, 600.0),
        );
        assert_eq!(fill_target(&state, &m).zoom, 4.0);
    }

    #[test]
    fn zero_sized_content_is_degenerate() {
        let state = ViewportState::new(0.01, 100.0);
        let m = metrics(Size::ZERO, Size::ZERO, Size::new(800.0, 600.0));
        let target = fill_target(&state, &m);
        assert!(!target.zoom.is_finite());
        assert!(!target.is_finite());
    }

    #[test]
    fn nan_ratio_on_one_axis_is_degenerate() {
        let state = ViewportState::new(0.01, 100.0);
        let m = metrics(
            Size::new(0.0, 100.0),
            Size::new(0.0, 100.0),
            Size::new(0.0, 600.0),
        );
        let target = fill_target(&state, &m);
        assert!(target.zoom.is_nan());
        assert!(!target.is_finite());
    }
}
