// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};

/// Sizes supplied by the content-hosting collaborator.
///
/// - `content_size`: natural size of the hosted content.
/// - `desired_size`: measured size of the presenter hosting the content; it
///   can be smaller than `content_size` when measurement adds no padding, or
///   equal to it.
/// - `viewport_size`: size of the zoom control itself.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContentMetrics {
    /// Natural size of the hosted content.
    pub content_size: Size,
    /// Measured size of the presenter.
    pub desired_size: Size,
    /// Size of the viewport.
    pub viewport_size: Size,
}

/// Translation bounding policy.
///
/// When enabled, content smaller than the viewport is centered and content
/// larger than the viewport cannot be dragged past its edges. When disabled
/// (the default), translations pass through unchanged and panning is free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TranslateClamp {
    enabled: bool,
}

impl TranslateClamp {
    /// Creates a policy with clamping switched on or off.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns `true` if translations are bounded.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Coerces a translation along one axis.
    ///
    /// `content`, `desired` and `viewport` are the extents of the content,
    /// the presenter and the viewport along that axis, all unscaled.
    #[must_use]
    pub fn coerce(
        self,
        translate: f64,
        zoom: f64,
        content: f64,
        desired: f64,
        viewport: f64,
    ) -> f64 {
        if !self.enabled {
            return translate;
        }

        let scaled = desired * zoom;
        // Padding the content adds beyond the presenter's measured extent.
        let plus = if content > desired {
            (content - desired) * zoom
        } else {
            0.0
        };

        if content * zoom > viewport {
            let upper = -(viewport - scaled) / 2.0;
            let lower = (viewport - scaled) / 2.0 - plus;
            // Applied as max-then-min so an empty range resolves to `upper`.
            translate.max(lower).min(upper)
        } else {
            -plus / 2.0
        }
    }

    /// Coerces a 2D translation axis by axis.
    ///
    /// A disabled policy passes `translate` through unchanged. An enabled
    /// policy without attached content has nothing to position and yields
    /// zero.
    #[must_use]
    pub fn coerce_vec(self, translate: Vec2, zoom: f64, metrics: Option<&ContentMetrics>) -> Vec2 {
        if !self.enabled {
            return translate;
        }
        let Some(m) = metrics else {
            return Vec2::ZERO;
        };
        Vec2::new(
            self.coerce(
                translate.x,
                zoom,
                m.content_size.width,
                m.desired_size.width,
                m.viewport_size.width,
            ),
            self.coerce(
                translate.y,
                zoom,
                m.content_size.height,
                m.desired_size.height,
                m.viewport_size.height,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{ContentMetrics, TranslateClamp};

    fn metrics(content: f64, desired: f64, viewport: f64) -> ContentMetrics {
        ContentMetrics {
            content_size: Size::new(content, content),
            desired_size: Size::new(desired, desired),
            viewport_size: Size::new(viewport, viewport),
        }
    }

    #[test]
    fn disabled_policy_passes_through() {
        let clamp = TranslateClamp::default();
        assert!(!clamp.is_enabled());
        assert_eq!(clamp.coerce(1234.5, 3.0, 100.0, 100.0, 200.0), 1234.5);
        let m = metrics(100.0, 80.0, 200.0);
        let t = Vec2::new(-999.0, 42.0);
        assert_eq!(clamp.coerce_vec(t, 2.0, Some(&m)), t);
    }

    #[test]
    fn no_content_only_zeroes_when_enabled() {
        let t = Vec2::new(10.0, 20.0);
        assert_eq!(TranslateClamp::new(false).coerce_vec(t, 1.0, None), t);
        assert_eq!(TranslateClamp::new(true).coerce_vec(t, 1.0, None), Vec2::ZERO);
    }

    #[test]
    fn small_content_is_centered() {
        let clamp = TranslateClamp::new(true);
        // 100 content in a 400 viewport at zoom 1: fits, no padding.
        assert_eq!(clamp.coerce(75.0, 1.0, 100.0, 100.0, 400.0), 0.0);
        // Padding of 20 at zoom 2 shifts the center by half of 40.
        assert_eq!(clamp.coerce(75.0, 2.0, 120.0, 100.0, 400.0), -20.0);
    }

    #[test]
    fn large_content_is_bounded_to_its_edges() {
        let clamp = TranslateClamp::new(true);
        // 100 content at zoom 4 is 400 wide in a 200 viewport: it may move
        // by at most half the overflow in either direction.
        assert_eq!(clamp.coerce(500.0, 4.0, 100.0, 100.0, 200.0), 100.0);
        assert_eq!(clamp.coerce(-500.0, 4.0, 100.0, 100.0, 200.0), -100.0);
        assert_eq!(clamp.coerce(30.0, 4.0, 100.0, 100.0, 200.0), 30.0);
    }
}
