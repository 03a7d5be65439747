// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Named layout policy keeping zoom/translate in sync with size changes.
///
/// This enum is shared by [`crate::ViewportState`] and [`crate::ZoomControl`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    /// No automatic policy; the last explicit zoom/translate holds.
    #[default]
    Custom,
    /// Scale content so it fills the viewport, re-applied on size changes.
    Fill,
    /// Show content at 1:1 scale, centered on its measurement padding.
    Original,
}

/// Pointer interaction currently driving the viewport.
///
/// Exactly one mode is active at a time; [`InteractionMode::None`] is both
/// the initial and the terminal state of every gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionMode {
    /// No gesture in progress.
    #[default]
    None,
    /// Dragging translates the view.
    Pan,
    /// Reserved zoom-in tool; pointer moves do nothing.
    ZoomIn,
    /// Reserved zoom-out tool; pointer moves do nothing.
    ZoomOut,
    /// Dragging spans a rectangle that is zoomed into on release.
    ZoomBox,
}
