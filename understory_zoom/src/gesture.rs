// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture bookkeeping from pointer-down to pointer-up.

use kurbo::{Point, Rect, Vec2};

/// State recorded when a pointer gesture starts.
///
/// A session lives for one pointer-down-to-up cycle. Pan gestures derive the
/// translation from the total pointer offset, not from per-move deltas, so
/// dropped or coalesced move events cannot make the view drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    /// Pointer position of the pointer-down that started the gesture.
    pub pointer_down_position: Point,
    /// View translation at the time of the pointer-down.
    pub translate_at_start: Vec2,
}

impl GestureSession {
    /// Starts a session at `pos` with the view at `translate`.
    #[must_use]
    pub fn new(pos: Point, translate: Vec2) -> Self {
        Self {
            pointer_down_position: pos,
            translate_at_start: translate,
        }
    }

    /// Total pointer offset from the gesture start.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Vec2 {
        pos - self.pointer_down_position
    }

    /// Translation a pan gesture produces with the pointer at `pos`.
    #[must_use]
    pub fn pan_translate(&self, pos: Point) -> Vec2 {
        self.translate_at_start + self.total_offset(pos)
    }

    /// Axis-aligned rectangle spanned by the gesture start and `pos`.
    #[must_use]
    pub fn zoom_box(&self, pos: Point) -> Rect {
        Rect::from_points(self.pointer_down_position, pos)
    }
}
