// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::animation::{AnimatedProperty, Animator};
use crate::anchor::{ZoomAnchor, ZoomTarget, compute_zoom, rect_delta_zoom, wheel_delta_zoom};
use crate::clamp::{ContentMetrics, TranslateClamp};
use crate::config::{ConfigError, ZoomConfig};
use crate::interaction::{
    InteractionState, Modifiers, MoveEffect, PointerDispatch, PointerOutcome,
};
use crate::layout::{fill_target, original_target};
use crate::modes::{InteractionMode, LayoutMode};
use crate::state::{ViewportState, WriteSource};

/// Headless zoom/pan controller for a single viewport.
///
/// `ZoomControl` turns pointer, wheel and size notifications into a uniform
/// zoom plus translation of some hosted content. It:
/// - Interprets pointer gestures (pan, zoom box) and wheel zoom.
/// - Zooms around an anchor so the content under the cursor stays put.
/// - Animates transitions, composing overlapping zooms safely.
/// - Keeps the view filled or at 1:1 scale while a layout mode is active.
///
/// The host owns rendering and time. It applies [`ZoomControl::view_transform`]
/// to the content and calls [`ZoomControl::tick`] once per frame while
/// [`ZoomControl::is_animating`] is `true`.
#[derive(Clone, Debug)]
pub struct ZoomControl {
    config: ZoomConfig,
    state: ViewportState,
    clamp: TranslateClamp,
    interaction: InteractionState,
    animator: Animator,
    viewport_size: Size,
    content: Option<(Size, Size)>,
    attached_once: bool,
}

impl ZoomControl {
    /// Creates a control with the given configuration and an empty viewport.
    ///
    /// The view starts at zoom `1.0`, zero translation, in
    /// [`LayoutMode::Custom`], with no content attached.
    pub fn new(config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ViewportState::new(config.min_zoom, config.max_zoom),
            clamp: TranslateClamp::new(config.translation_clamping),
            interaction: InteractionState::new(),
            animator: Animator::new(),
            viewport_size: Size::ZERO,
            content: None,
            attached_once: false,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// The current zoom is re-clamped into the new limits. On error the
    /// previous configuration stays in effect.
    pub fn set_config(&mut self, config: ZoomConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.state.set_zoom_limits(config.min_zoom, config.max_zoom);
        self.clamp = TranslateClamp::new(config.translation_clamping);
        let translate = self.coerce(self.state.translate(), self.state.zoom());
        self.state.set_translate(translate, WriteSource::Animation);
        Ok(())
    }

    /// Returns the viewport state.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.zoom()
    }

    /// Returns the current translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.state.translate()
    }

    /// Returns the current layout mode.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.state.mode()
    }

    /// Returns the current interaction mode.
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Returns the live zoom box, or [`Rect::ZERO`] outside zoom-box gestures.
    #[must_use]
    pub fn zoom_box(&self) -> Rect {
        self.interaction.zoom_box()
    }

    /// Returns `true` while a zoom transition is in progress.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.animator.is_zooming()
    }

    /// Returns `true` while the host should keep calling [`ZoomControl::tick`].
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Returns the animation sequencer.
    #[must_use]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Returns the content metrics, if content is attached.
    #[must_use]
    pub fn metrics(&self) -> Option<ContentMetrics> {
        self.content.map(|(content_size, desired_size)| ContentMetrics {
            content_size,
            desired_size,
            viewport_size: self.viewport_size,
        })
    }

    /// Returns the viewport center, the origin translations are measured from.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    /// Returns the transform the host applies to the content.
    #[must_use]
    pub fn view_transform(&self) -> Affine {
        self.state.view_transform(self.origin())
    }

    /// Converts a view-space point (for example a pointer position) into
    /// layout space.
    #[must_use]
    pub fn view_to_layout_point(&self, pt: Point) -> Point {
        self.state.view_to_layout_point(self.origin(), pt)
    }

    /// Converts a layout-space point into view space.
    #[must_use]
    pub fn layout_to_view_point(&self, pt: Point) -> Point {
        self.state.layout_to_view_point(self.origin(), pt)
    }

    /// Sets the viewport size, re-filling the view if [`LayoutMode::Fill`] is
    /// active.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        if self.mode() == LayoutMode::Fill {
            self.apply_fill();
        }
    }

    /// Attaches content with the given natural and measured sizes.
    ///
    /// The first attachment switches to the configured
    /// [`ZoomConfig::attach_mode`]. Later attachments behave like a size
    /// change.
    pub fn attach_content(&mut self, content_size: Size, desired_size: Size) {
        self.content = Some((content_size, desired_size));
        if !self.attached_once {
            self.attached_once = true;
            // Applied even if the mode is already active: layout modes are
            // inert without content.
            let mode = self.config.attach_mode;
            self.state.set_mode(mode);
            self.apply_mode(mode);
        } else if self.mode() == LayoutMode::Fill {
            self.apply_fill();
        }
    }

    /// Detaches the content. Layout modes do nothing until content returns.
    pub fn detach_content(&mut self) {
        self.content = None;
    }

    /// Updates the sizes of attached content, re-filling the view if
    /// [`LayoutMode::Fill`] is active.
    ///
    /// Does nothing while no content is attached.
    pub fn set_content_sizes(&mut self, content_size: Size, desired_size: Size) {
        let Some(current) = self.content.as_mut() else {
            return;
        };
        if *current == (content_size, desired_size) {
            return;
        }
        *current = (content_size, desired_size);
        if self.mode() == LayoutMode::Fill {
            self.apply_fill();
        }
    }

    /// Sets the zoom factor directly, cancelling any zoom animation.
    ///
    /// The translation is scaled along so the viewport center stays fixed,
    /// and the layout mode becomes [`LayoutMode::Custom`]. Writing the
    /// current zoom does nothing.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = self.state.clamp_zoom(zoom);
        if clamped.is_nan() || clamped == self.state.zoom() {
            return;
        }
        self.animator.cancel(AnimatedProperty::Zoom);
        self.animator.cancel(AnimatedProperty::TranslateX);
        self.animator.cancel(AnimatedProperty::TranslateY);
        self.state.set_zoom(clamped, WriteSource::User);
        let translate = self.coerce(self.state.translate(), clamped);
        self.state.set_translate(translate, WriteSource::User);
    }

    /// Sets the translation directly, cancelling any translate animation and
    /// switching to [`LayoutMode::Custom`].
    pub fn set_translate(&mut self, translate: Vec2) {
        self.animator.cancel(AnimatedProperty::TranslateX);
        self.animator.cancel(AnimatedProperty::TranslateY);
        let translate = self.coerce(translate, self.state.zoom());
        self.state.set_translate(translate, WriteSource::User);
    }

    /// Switches the layout mode.
    ///
    /// Entering [`LayoutMode::Fill`] or [`LayoutMode::Original`] animates to
    /// that mode's target. Setting the current mode does nothing.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        if !self.state.set_mode(mode) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?mode, "layout mode changed");
        self.apply_mode(mode);
    }

    /// Animates to 1:1 scale with the content's padding centered.
    pub fn zoom_to_original(&mut self) {
        self.set_mode(LayoutMode::Original);
    }

    /// Animates to the largest zoom that shows all of the content, and keeps
    /// it that way across size changes until the user pans or zooms.
    pub fn zoom_to_fill(&mut self) {
        self.set_mode(LayoutMode::Fill);
    }

    /// Animates so that `rect`, in view coordinates, fills the viewport
    /// around its center.
    ///
    /// Rectangles without area are ignored.
    pub fn zoom_to_rect(&mut self, rect: Rect) {
        let has_area = rect.width() > 0.0 && rect.height() > 0.0;
        if !has_area {
            return;
        }
        let delta_zoom = rect_delta_zoom(rect, self.viewport_size);
        let origin = self.origin();
        self.zoom_by(delta_zoom, ZoomAnchor::moving(origin, rect.center(), origin));
    }

    /// Animates a zoom by `delta_zoom` about `anchor` and switches to
    /// [`LayoutMode::Custom`].
    pub fn zoom_by(&mut self, delta_zoom: f64, anchor: ZoomAnchor) {
        let metrics = self.metrics();
        let target = compute_zoom(&self.state, anchor, delta_zoom, self.clamp, metrics.as_ref());
        #[cfg(feature = "tracing")]
        tracing::debug!(delta_zoom, zoom = target.zoom, "zoom requested");
        self.start_transition(target);
        self.state.set_mode(LayoutMode::Custom);
    }

    /// Handles a pointer-down at `pos` in view coordinates.
    pub fn on_pointer_down(
        &mut self,
        pos: Point,
        modifiers: Modifiers,
        dispatch: PointerDispatch,
    ) -> PointerOutcome {
        let outcome =
            self.interaction
                .pointer_down(pos, modifiers, dispatch, self.state.translate());
        #[cfg(feature = "tracing")]
        if outcome == PointerOutcome::Capture {
            tracing::debug!(mode = ?self.interaction.mode(), ?pos, "gesture started");
        }
        outcome
    }

    /// Handles a pointer-move to `pos` in view coordinates.
    pub fn on_pointer_move(&mut self, pos: Point) -> PointerOutcome {
        match self.interaction.pointer_move(pos) {
            MoveEffect::None => PointerOutcome::Ignored,
            MoveEffect::Pan(translate) => {
                self.set_translate(translate);
                PointerOutcome::Updated
            }
            MoveEffect::ZoomBox(_) => PointerOutcome::Updated,
        }
    }

    /// Handles a pointer-up, ending the current gesture.
    ///
    /// A zoom-box gesture zooms into its rectangle.
    pub fn on_pointer_up(&mut self) -> PointerOutcome {
        let Some(end) = self.interaction.pointer_up() else {
            return PointerOutcome::Ignored;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(mode = ?end.mode, "gesture ended");
        if end.mode == InteractionMode::ZoomBox {
            self.zoom_to_rect(end.zoom_box);
        }
        PointerOutcome::Release
    }

    /// Abandons the current gesture, for example when the host lost the
    /// pointer capture.
    pub fn cancel_gesture(&mut self) -> PointerOutcome {
        if !self.interaction.is_active() {
            return PointerOutcome::Ignored;
        }
        self.interaction.cancel();
        PointerOutcome::Release
    }

    /// Arms an interaction mode without a pointer-down.
    ///
    /// Returns [`PointerOutcome::Release`] if this ended a running gesture.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) -> PointerOutcome {
        match self.interaction.set_mode(mode) {
            Some(_) => PointerOutcome::Release,
            None => PointerOutcome::Ignored,
        }
    }

    /// Handles a wheel event at `pos` with a signed `delta`.
    ///
    /// Returns `true` if the wheel zoomed, in which case the host should mark
    /// the event as handled.
    pub fn on_wheel(&mut self, pos: Point, delta: f64, modifiers: Modifiers) -> bool {
        let modifier_ok = modifiers.contains(Modifiers::CONTROL)
            || !self.config.require_modifier_for_wheel_zoom;
        if !modifier_ok || self.interaction.is_active() {
            return false;
        }
        let delta_zoom = wheel_delta_zoom(
            delta,
            self.config.zoom_delta_multiplier,
            self.config.max_zoom_delta,
        );
        self.zoom_by(delta_zoom, ZoomAnchor::fixed(self.origin(), pos));
        true
    }

    /// Advances animations to `now`, a monotonic timestamp.
    ///
    /// Returns `true` if animations are still running afterwards.
    pub fn tick(&mut self, now: Duration) -> bool {
        let frame = self.animator.tick(now);
        if let Some(zoom) = frame.zoom {
            self.state.set_zoom(zoom, WriteSource::Animation);
        }
        if frame.translate_x.is_some() || frame.translate_y.is_some() {
            let current = self.state.translate();
            let translate = Vec2::new(
                frame.translate_x.unwrap_or(current.x),
                frame.translate_y.unwrap_or(current.y),
            );
            let translate = self.coerce(translate, self.state.zoom());
            self.state.set_translate(translate, WriteSource::Animation);
        }
        #[cfg(feature = "tracing")]
        if frame.zoom_committed {
            tracing::debug!(zoom = self.state.zoom(), "zoom committed");
        }
        self.animator.is_animating()
    }

    /// Snapshot of the control state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomControlDebugInfo {
        ZoomControlDebugInfo {
            viewport_size: self.viewport_size,
            metrics: self.metrics(),
            zoom: self.state.zoom(),
            translate: self.state.translate(),
            mode: self.state.mode(),
            interaction_mode: self.interaction.mode(),
            zoom_box: self.interaction.zoom_box(),
            zooming: self.animator.is_zooming(),
            zoom_in_flight: self.animator.zoom_in_flight(),
            translation_clamping: self.clamp.is_enabled(),
        }
    }

    fn coerce(&self, translate: Vec2, zoom: f64) -> Vec2 {
        let metrics = self.metrics();
        self.clamp.coerce_vec(translate, zoom, metrics.as_ref())
    }

    fn start_transition(&mut self, target: ZoomTarget) {
        self.animator.transition(
            self.state.zoom(),
            self.state.translate(),
            target,
            self.config.animation_length,
        );
    }

    fn apply_mode(&mut self, mode: LayoutMode) {
        match mode {
            LayoutMode::Fill => self.apply_fill(),
            LayoutMode::Original => self.apply_original(),
            LayoutMode::Custom => {}
        }
    }

    fn apply_fill(&mut self) {
        let Some(metrics) = self.metrics() else {
            return;
        };
        let target = fill_target(&self.state, &metrics);
        self.start_transition(target);
    }

    fn apply_original(&mut self) {
        let Some(metrics) = self.metrics() else {
            return;
        };
        let target = original_target(&self.state, &metrics);
        self.start_transition(target);
    }
}

/// Debug snapshot of a [`ZoomControl`] state.
#[derive(Clone, Copy, Debug)]
pub struct ZoomControlDebugInfo {
    /// Current viewport size.
    pub viewport_size: Size,
    /// Content metrics, if content is attached.
    pub metrics: Option<ContentMetrics>,
    /// Current zoom factor.
    pub zoom: f64,
    /// Current translation.
    pub translate: Vec2,
    /// Current layout mode.
    pub mode: LayoutMode,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
    /// Live zoom box.
    pub zoom_box: Rect,
    /// Whether a zoom transition is in progress.
    pub zooming: bool,
    /// Number of zoom runs that have not completed.
    pub zoom_in_flight: u32,
    /// Whether translations are bounded.
    pub translation_clamping: bool,
}
