// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction mode state machine: pointer-down/move/up plus modifiers in,
//! gesture effects out.
//!
//! ## Transition table
//!
//! From [`InteractionMode::None`], a pointer-down selects a mode from the held
//! modifiers:
//!
//! | Modifiers      | Preview dispatch | Bubble dispatch |
//! |----------------|------------------|-----------------|
//! | none           | `None`           | `Pan`           |
//! | Alt            | `ZoomBox`        | `ZoomBox`       |
//! | Shift          | `Pan`            | `Pan`           |
//! | Control / Meta | `None`           | `None`          |
//! | anything else  | `None`           | `None`          |
//!
//! Plain presses only start panning on the bubbling dispatch so that child
//! controls get the first chance to handle them. Pointer-down in any other
//! mode is ignored. Pointer-up from any mode other than `None` ends the
//! gesture and returns to `None`.

use kurbo::{Point, Rect, Vec2};

use crate::gesture::GestureSession;
use crate::modes::InteractionMode;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer or wheel event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
        /// Windows / Command key.
        const META    = 0b0000_1000;
    }
}

/// Phase of the host's event routing that delivered a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDispatch {
    /// Tunneling dispatch, seen before child controls.
    Preview,
    /// Bubbling dispatch, seen after child controls had their chance.
    Bubble,
}

/// What the host should do after delivering a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// The event did not affect the control.
    Ignored,
    /// A gesture started: capture the pointer and route moves to the control.
    Capture,
    /// The event updated the running gesture.
    Updated,
    /// The gesture ended: release the pointer capture.
    Release,
}

/// Selects the mode a pointer-down starts, given the held modifiers.
///
/// Modifier bits outside of [`Modifiers::all`] cannot come from the host's
/// keyboard state; they trip a debug assertion and start no gesture.
#[must_use]
pub fn mode_for_pointer_down(modifiers: Modifiers, dispatch: PointerDispatch) -> InteractionMode {
    debug_assert!(
        Modifiers::from_bits(modifiers.bits()).is_some(),
        "unrecognized modifier bits {:#010b}",
        modifiers.bits()
    );
    if modifiers == Modifiers::empty() {
        return match dispatch {
            PointerDispatch::Preview => InteractionMode::None,
            PointerDispatch::Bubble => InteractionMode::Pan,
        };
    }
    if modifiers == Modifiers::ALT {
        InteractionMode::ZoomBox
    } else if modifiers == Modifiers::SHIFT {
        InteractionMode::Pan
    } else {
        // Control and Meta are reserved for other bindings, and chords are
        // not bound at all.
        InteractionMode::None
    }
}

/// Effect of a pointer-move on the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveEffect {
    /// Nothing changes.
    None,
    /// The view translation should become this value.
    Pan(Vec2),
    /// The zoom box was updated to this rectangle.
    ZoomBox(Rect),
}

/// A gesture that ended with a pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEnd {
    /// Mode the gesture was in.
    pub mode: InteractionMode,
    /// Last zoom box of the gesture; [`Rect::ZERO`] unless `mode` is
    /// [`InteractionMode::ZoomBox`].
    pub zoom_box: Rect,
}

/// Interaction mode plus the state of the gesture in progress.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    session: Option<GestureSession>,
    zoom_box: Rect,
}

impl InteractionState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Returns the session of the gesture in progress, if one was started by
    /// a pointer-down.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Returns the current zoom box, or [`Rect::ZERO`] when none is live.
    #[must_use]
    pub fn zoom_box(&self) -> Rect {
        self.zoom_box
    }

    /// Returns `true` while any mode other than `None` is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode != InteractionMode::None
    }

    /// Handles a pointer-down at `pos` with the view translated by `translate`.
    pub fn pointer_down(
        &mut self,
        pos: Point,
        modifiers: Modifiers,
        dispatch: PointerDispatch,
        translate: Vec2,
    ) -> PointerOutcome {
        if self.is_active() {
            return PointerOutcome::Ignored;
        }
        let mode = mode_for_pointer_down(modifiers, dispatch);
        if mode == InteractionMode::None {
            return PointerOutcome::Ignored;
        }
        self.mode = mode;
        self.session = Some(GestureSession::new(pos, translate));
        PointerOutcome::Capture
    }

    /// Handles a pointer-move to `pos`.
    ///
    /// Moves only have an effect while a gesture started by
    /// [`InteractionState::pointer_down`] is running.
    pub fn pointer_move(&mut self, pos: Point) -> MoveEffect {
        let Some(session) = self.session else {
            return MoveEffect::None;
        };
        match self.mode {
            InteractionMode::Pan => MoveEffect::Pan(session.pan_translate(pos)),
            InteractionMode::ZoomBox => {
                self.zoom_box = session.zoom_box(pos);
                MoveEffect::ZoomBox(self.zoom_box)
            }
            InteractionMode::ZoomIn | InteractionMode::ZoomOut => MoveEffect::None,
            InteractionMode::None => {
                debug_assert!(false, "gesture session without an interaction mode");
                self.session = None;
                MoveEffect::None
            }
        }
    }

    /// Handles a pointer-up, ending the gesture in progress.
    ///
    /// Returns `None` if no mode was active.
    pub fn pointer_up(&mut self) -> Option<GestureEnd> {
        if !self.is_active() {
            return None;
        }
        Some(self.finish())
    }

    /// Arms `mode` without a pointer-down, as a toolbar tool would.
    ///
    /// Setting [`InteractionMode::None`] cancels the current gesture.
    /// Switching directly between two different non-`None` modes is a
    /// programming error: it trips a debug assertion and otherwise ends the
    /// current gesture. Returns the ended gesture, if any.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Option<GestureEnd> {
        if mode == self.mode {
            return None;
        }
        if mode == InteractionMode::None {
            return Some(self.cancel());
        }
        if self.is_active() {
            debug_assert!(
                false,
                "cannot switch from {:?} to {mode:?} during a gesture",
                self.mode
            );
            return Some(self.cancel());
        }
        self.mode = mode;
        None
    }

    /// Ends the current gesture without applying its result.
    ///
    /// The returned [`GestureEnd`] carries an empty zoom box.
    pub fn cancel(&mut self) -> GestureEnd {
        let mut end = self.finish();
        end.zoom_box = Rect::ZERO;
        end
    }

    fn finish(&mut self) -> GestureEnd {
        let end = GestureEnd {
            mode: self.mode,
            zoom_box: self.zoom_box,
        };
        self.mode = InteractionMode::None;
        self.session = None;
        self.zoom_box = Rect::ZERO;
        end
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{
        InteractionState, Modifiers, MoveEffect, PointerDispatch, PointerOutcome,
        mode_for_pointer_down,
    };
    use crate::modes::InteractionMode;

    #[test]
    fn transition_table() {
        use InteractionMode as M;
        use PointerDispatch::{Bubble, Preview};

        assert_eq!(mode_for_pointer_down(Modifiers::empty(), Preview), M::None);
        assert_eq!(mode_for_pointer_down(Modifiers::empty(), Bubble), M::Pan);
        assert_eq!(mode_for_pointer_down(Modifiers::ALT, Preview), M::ZoomBox);
        assert_eq!(mode_for_pointer_down(Modifiers::ALT, Bubble), M::ZoomBox);
        assert_eq!(mode_for_pointer_down(Modifiers::SHIFT, Bubble), M::Pan);
        assert_eq!(mode_for_pointer_down(Modifiers::CONTROL, Bubble), M::None);
        assert_eq!(mode_for_pointer_down(Modifiers::META, Bubble), M::None);
        assert_eq!(
            mode_for_pointer_down(Modifiers::ALT | Modifiers::SHIFT, Bubble),
            M::None
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unrecognized modifier bits")]
    fn unknown_modifier_bits_assert() {
        let _ = mode_for_pointer_down(Modifiers::from_bits_retain(0x80), PointerDispatch::Bubble);
    }

    #[test]
    fn pan_gesture_lifecycle() {
        let mut state = InteractionState::new();
        let outcome = state.pointer_down(
            Point::new(10.0, 10.0),
            Modifiers::empty(),
            PointerDispatch::Bubble,
            Vec2::new(1.0, 2.0),
        );
        assert_eq!(outcome, PointerOutcome::Capture);
        assert_eq!(state.mode(), InteractionMode::Pan);

        assert_eq!(
            state.pointer_move(Point::new(30.0, 5.0)),
            MoveEffect::Pan(Vec2::new(21.0, -3.0))
        );

        let end = state.pointer_up().unwrap();
        assert_eq!(end.mode, InteractionMode::Pan);
        assert_eq!(state.mode(), InteractionMode::None);
        assert!(state.session().is_none());
        assert_eq!(state.pointer_move(Point::new(0.0, 0.0)), MoveEffect::None);
    }

    #[test]
    fn preview_then_bubble_starts_one_pan() {
        let mut state = InteractionState::new();
        let pos = Point::new(5.0, 5.0);
        assert_eq!(
            state.pointer_down(pos, Modifiers::empty(), PointerDispatch::Preview, Vec2::ZERO),
            PointerOutcome::Ignored
        );
        assert_eq!(
            state.pointer_down(pos, Modifiers::empty(), PointerDispatch::Bubble, Vec2::ZERO),
            PointerOutcome::Capture
        );
        // A second down while panning is ignored.
        assert_eq!(
            state.pointer_down(pos, Modifiers::ALT, PointerDispatch::Bubble, Vec2::ZERO),
            PointerOutcome::Ignored
        );
        assert_eq!(state.mode(), InteractionMode::Pan);
    }

    #[test]
    fn zoom_box_gesture_tracks_rect_and_clears() {
        let mut state = InteractionState::new();
        state.pointer_down(
            Point::new(10.0, 10.0),
            Modifiers::ALT,
            PointerDispatch::Preview,
            Vec2::ZERO,
        );
        state.pointer_move(Point::new(50.0, 20.0));
        assert_eq!(
            state.pointer_move(Point::new(110.0, 60.0)),
            MoveEffect::ZoomBox(Rect::new(10.0, 10.0, 110.0, 60.0))
        );

        let end = state.pointer_up().unwrap();
        assert_eq!(end.mode, InteractionMode::ZoomBox);
        assert_eq!(end.zoom_box, Rect::new(10.0, 10.0, 110.0, 60.0));
        assert_eq!(state.zoom_box(), Rect::ZERO);
    }

    #[test]
    fn pointer_up_when_idle_does_nothing() {
        let mut state = InteractionState::new();
        assert!(state.pointer_up().is_none());
    }

    #[test]
    fn armed_modes_ignore_moves_and_end_on_up() {
        let mut state = InteractionState::new();
        assert!(state.set_mode(InteractionMode::ZoomIn).is_none());
        assert_eq!(state.mode(), InteractionMode::ZoomIn);
        assert_eq!(
            state.pointer_down(
                Point::ZERO,
                Modifiers::empty(),
                PointerDispatch::Bubble,
                Vec2::ZERO
            ),
            PointerOutcome::Ignored
        );
        assert_eq!(state.pointer_move(Point::new(3.0, 3.0)), MoveEffect::None);
        assert_eq!(state.pointer_up().unwrap().mode, InteractionMode::ZoomIn);
        assert_eq!(state.mode(), InteractionMode::None);
    }

    #[test]
    fn cancel_drops_zoom_box() {
        let mut state = InteractionState::new();
        state.pointer_down(Point::ZERO, Modifiers::ALT, PointerDispatch::Bubble, Vec2::ZERO);
        state.pointer_move(Point::new(40.0, 40.0));
        let end = state.cancel();
        assert_eq!(end.mode, InteractionMode::ZoomBox);
        assert_eq!(end.zoom_box, Rect::ZERO);
        assert!(!state.is_active());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "during a gesture")]
    fn switching_modes_mid_gesture_asserts() {
        let mut state = InteractionState::new();
        state.pointer_down(Point::ZERO, Modifiers::SHIFT, PointerDispatch::Bubble, Vec2::ZERO);
        let _ = state.set_mode(InteractionMode::ZoomBox);
    }
}
