// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation sequencer for zoom and translation transitions.
//!
//! ## Model
//!
//! Each [`AnimatedProperty`] has at most one *active* run, interpolating
//! linearly from the value the property had when the run started to its
//! target. Starting a run on a property that is already animating supersedes
//! the old run: the new run picks up from the current value and the newest
//! target wins.
//!
//! Zoom runs are additionally reference counted. Every zoom run, superseded
//! or not, completes once its own duration has elapsed; only the completion
//! that brings the in-flight count to zero commits the zoom and clears the
//! zooming flag. The two orderings are independent: the last run *started*
//! decides the target, the last run to *complete* decides when zooming ends.
//!
//! ## Time
//!
//! The host drives time by calling [`Animator::tick`] with a monotonic
//! timestamp. A run's clock starts at the first tick after it was started,
//! so starting a run never needs a timestamp. If the host stops ticking, runs
//! never complete and the zooming flag stays set.

use core::time::Duration;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::anchor::ZoomTarget;

/// A property the sequencer can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Uniform zoom factor.
    Zoom,
    /// Horizontal translation.
    TranslateX,
    /// Vertical translation.
    TranslateY,
}

impl AnimatedProperty {
    const fn index(self) -> usize {
        match self {
            Self::Zoom => 0,
            Self::TranslateX => 1,
            Self::TranslateY => 2,
        }
    }
}

/// One in-flight transition of a scalar property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRun {
    /// Value at the start of the run.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Length of the run.
    pub duration: Duration,
    /// Timestamp of the first tick that saw this run.
    pub started_at: Option<Duration>,
}

impl AnimationRun {
    fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            started_at: None,
        }
    }

    /// Samples the run at `now`, returning the value and whether the run is
    /// over.
    fn sample(&mut self, now: Duration) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(start);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from + (self.to - self.from) * t, false)
    }
}

#[derive(Clone, Copy, Debug)]
struct ZoomCompletion {
    duration: Duration,
    deadline: Option<Duration>,
}

/// Values produced by one [`Animator::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    /// Interpolated zoom, if a zoom run is active.
    pub zoom: Option<f64>,
    /// Interpolated horizontal translation, if a run is active.
    pub translate_x: Option<f64>,
    /// Interpolated vertical translation, if a run is active.
    pub translate_y: Option<f64>,
    /// The last in-flight zoom run completed during this tick: the zoom is
    /// committed and zooming has ended.
    pub zoom_committed: bool,
}

impl Frame {
    fn slot_mut(&mut self, idx: usize) -> &mut Option<f64> {
        match idx {
            0 => &mut self.zoom,
            1 => &mut self.translate_x,
            _ => &mut self.translate_y,
        }
    }
}

/// Drives zoom/translate transitions and tracks in-flight zoom runs.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    runs: [Option<AnimationRun>; 3],
    pending_zooms: SmallVec<[ZoomCompletion; 4]>,
    zoom_in_flight: u32,
    zooming: bool,
}

impl Animator {
    /// Creates an idle sequencer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a zoom transition is in progress.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    /// Number of zoom runs that have not completed yet.
    #[must_use]
    pub fn zoom_in_flight(&self) -> u32 {
        self.zoom_in_flight
    }

    /// Returns `true` if any run is active or any zoom completion is pending.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.runs.iter().any(Option::is_some) || !self.pending_zooms.is_empty()
    }

    /// Returns the active run of `property`.
    #[must_use]
    pub fn run(&self, property: AnimatedProperty) -> Option<&AnimationRun> {
        self.runs[property.index()].as_ref()
    }

    /// Starts a run of `property` from `current` to `target`.
    ///
    /// A non-finite `target` skips the run; skipping a zoom run also clears
    /// the zooming flag, since no completion will ever clear it. Returns
    /// `true` if a run was started.
    pub fn start(
        &mut self,
        property: AnimatedProperty,
        current: f64,
        target: f64,
        duration: Duration,
    ) -> bool {
        if !target.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?property, target, "skipping degenerate animation target");
            if property == AnimatedProperty::Zoom {
                self.zooming = false;
            }
            return false;
        }
        self.runs[property.index()] = Some(AnimationRun::new(current, target, duration));
        if property == AnimatedProperty::Zoom {
            self.zoom_in_flight += 1;
            self.pending_zooms.push(ZoomCompletion {
                duration,
                deadline: None,
            });
        }
        true
    }

    /// Starts a full zoom transition from `(zoom, translate)` to `target`.
    ///
    /// Sets the zooming flag, then starts the translation runs followed by the
    /// zoom run.
    pub fn transition(&mut self, zoom: f64, translate: Vec2, target: ZoomTarget, duration: Duration) {
        self.zooming = true;
        self.start(AnimatedProperty::TranslateX, translate.x, target.translate.x, duration);
        self.start(AnimatedProperty::TranslateY, translate.y, target.translate.y, duration);
        self.start(AnimatedProperty::Zoom, zoom, target.zoom, duration);
    }

    /// Stops the active run of `property` without settling on its target.
    ///
    /// Cancelling the zoom also drops every pending zoom completion and ends
    /// zooming.
    pub fn cancel(&mut self, property: AnimatedProperty) {
        self.runs[property.index()] = None;
        if property == AnimatedProperty::Zoom {
            self.pending_zooms.clear();
            self.zoom_in_flight = 0;
            self.zooming = false;
        }
    }

    /// Advances every run to `now`.
    pub fn tick(&mut self, now: Duration) -> Frame {
        let mut frame = Frame::default();

        for (idx, slot) in self.runs.iter_mut().enumerate() {
            let Some(run) = slot else {
                continue;
            };
            let (value, finished) = run.sample(now);
            *frame.slot_mut(idx) = Some(value);
            // Zoom holds its final value until the last completion commits it.
            if finished && idx != AnimatedProperty::Zoom.index() {
                *slot = None;
            }
        }

        let before = self.pending_zooms.len();
        self.pending_zooms.retain(|c| {
            let deadline = *c.deadline.get_or_insert(now.saturating_add(c.duration));
            deadline > now
        });
        let completed = before - self.pending_zooms.len();
        for _ in 0..completed {
            self.zoom_in_flight = self.zoom_in_flight.saturating_sub(1);
            if self.zoom_in_flight == 0 {
                self.runs[AnimatedProperty::Zoom.index()] = None;
                self.zooming = false;
                frame.zoom_committed = true;
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::Vec2;

    use super::{AnimatedProperty, Animator};
    use crate::anchor::ZoomTarget;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn linear_interpolation_and_completion() {
        let mut anim = Animator::new();
        anim.transition(
            1.0,
            Vec2::ZERO,
            ZoomTarget {
                zoom: 3.0,
                translate: Vec2::new(100.0, -50.0),
            },
            100 * MS,
        );
        assert!(anim.is_zooming());
        assert_eq!(anim.zoom_in_flight(), 1);

        let f = anim.tick(1000 * MS);
        assert_eq!(f.zoom, Some(1.0));
        assert_eq!(f.translate_x, Some(0.0));
        assert!(!f.zoom_committed);

        let f = anim.tick(1050 * MS);
        assert_eq!(f.zoom, Some(2.0));
        assert_eq!(f.translate_x, Some(50.0));
        assert_eq!(f.translate_y, Some(-25.0));

        let f = anim.tick(1100 * MS);
        assert_eq!(f.zoom, Some(3.0));
        assert_eq!(f.translate_x, Some(100.0));
        assert!(f.zoom_committed);
        assert!(!anim.is_zooming());
        assert!(!anim.is_animating());
        assert_eq!(anim.tick(1200 * MS), super::Frame::default());
    }

    #[test]
    fn newest_target_wins_and_last_completion_commits() {
        let mut anim = Animator::new();
        anim.start(AnimatedProperty::Zoom, 1.0, 2.0, 100 * MS);
        anim.tick(Duration::ZERO);
        anim.tick(50 * MS);

        // Supersede halfway through, starting from the current value.
        anim.start(AnimatedProperty::Zoom, 1.5, 4.0, 100 * MS);
        assert_eq!(anim.zoom_in_flight(), 2);
        let f = anim.tick(60 * MS);
        assert_eq!(f.zoom, Some(1.5));

        // The first run's deadline passes: one completion, no commit.
        let f = anim.tick(100 * MS);
        assert!(!f.zoom_committed);
        assert_eq!(anim.zoom_in_flight(), 1);
        assert!((f.zoom.unwrap() - 2.5).abs() < 1e-12);

        let f = anim.tick(160 * MS);
        assert_eq!(f.zoom, Some(4.0));
        assert!(f.zoom_committed);
        assert_eq!(anim.zoom_in_flight(), 0);
    }

    #[test]
    fn non_finite_targets_are_skipped() {
        let mut anim = Animator::new();
        anim.transition(
            1.0,
            Vec2::ZERO,
            ZoomTarget {
                zoom: f64::INFINITY,
                translate: Vec2::new(f64::NAN, 3.0),
            },
            100 * MS,
        );
        assert!(!anim.is_zooming());
        assert_eq!(anim.zoom_in_flight(), 0);
        assert!(anim.run(AnimatedProperty::Zoom).is_none());
        assert!(anim.run(AnimatedProperty::TranslateX).is_none());
        assert!(anim.run(AnimatedProperty::TranslateY).is_some());
    }

    #[test]
    fn cancel_zoom_drops_pending_completions() {
        let mut anim = Animator::new();
        anim.transition(
            1.0,
            Vec2::ZERO,
            ZoomTarget {
                zoom: 2.0,
                translate: Vec2::ZERO,
            },
            100 * MS,
        );
        anim.start(AnimatedProperty::Zoom, 1.0, 3.0, 100 * MS);
        anim.cancel(AnimatedProperty::Zoom);
        assert!(!anim.is_zooming());
        assert_eq!(anim.zoom_in_flight(), 0);
        // Translation runs are unaffected.
        assert!(anim.run(AnimatedProperty::TranslateX).is_some());
        assert!(!anim.tick(Duration::ZERO).zoom_committed);
    }

    #[test]
    fn zero_length_settles_on_first_tick() {
        let mut anim = Animator::new();
        anim.transition(
            1.0,
            Vec2::ZERO,
            ZoomTarget {
                zoom: 0.5,
                translate: Vec2::new(8.0, 8.0),
            },
            Duration::ZERO,
        );
        let f = anim.tick(7 * MS);
        assert_eq!(f.zoom, Some(0.5));
        assert_eq!(f.translate_y, Some(8.0));
        assert!(f.zoom_committed);
        assert!(!anim.is_animating());
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let mut anim = Animator::new();
        anim.start(AnimatedProperty::Zoom, 1.0, 2.0, Duration::MAX);
        let f = anim.tick(16 * MS);
        assert_eq!(f.zoom, Some(1.0));
        let f = anim.tick(Duration::MAX - MS);
        assert!(!f.zoom_committed);
        assert!(anim.is_zooming());

        // A first tick at the end of time saturates the deadline and
        // completes at once.
        let mut anim = Animator::new();
        anim.start(AnimatedProperty::Zoom, 1.0, 2.0, 10 * MS);
        let f = anim.tick(Duration::MAX);
        assert_eq!(f.zoom, Some(1.0));
        assert!(f.zoom_committed);
        assert!(!anim.is_animating());
    }

    #[test]
    fn without_ticks_zooming_never_ends() {
        let mut anim = Animator::new();
        anim.start(AnimatedProperty::Zoom, 1.0, 2.0, 10 * MS);
        anim.transition(
            1.0,
            Vec2::ZERO,
            ZoomTarget {
                zoom: 2.0,
                translate: Vec2::ZERO,
            },
            10 * MS,
        );
        assert!(anim.is_zooming());
        assert_eq!(anim.zoom_in_flight(), 2);
    }
}
