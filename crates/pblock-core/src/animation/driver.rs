#![forbid(unsafe_code)]

//! Animation driver: the frame-clock contract widgets animate against.
//!
//! A driver owns timing (duration, start delay), the easing curve, and a
//! small play state. The host calls [`AnimationDriver::advance`] once per
//! frame with the elapsed time; the returned sample is the eased fraction the
//! widget should render, or `None` when nothing changed.
//!
//! # Phases
//!
//! ```text
//!  Idle ──start──▶ Waiting ──delay elapsed──▶ Playing ──fraction = 1──▶ Ended
//!   ▲                 │                          │
//!   └─────cancel──────┴──────────cancel──────────┘
//! ```
//!
//! `pause` freezes `Waiting`/`Playing` without leaving the phase. `start`
//! from any phase rebuilds the timeline and begins again at fraction 0.
//!
//! # Invariants
//!
//! 1. `advance` never yields a sample while idle, paused, ended, or waiting.
//! 2. Once `Ended`, the last sample was the curve's value at `t = 1`.
//! 3. Timing and easing changes take effect at the next `start`.

use std::time::Duration;

use super::{Animation, Easing, Timeline};

/// Capabilities a widget needs from its animation clock.
pub trait AnimationDriver {
    /// Set the output value range reported by [`animated_value`](Self::animated_value).
    fn set_range(&mut self, from: f32, to: f32);

    /// Set how long one play-through lasts.
    fn set_duration(&mut self, duration: Duration);

    /// Current play-through duration.
    fn duration(&self) -> Duration;

    /// Set the wait between `start` and the first sample.
    fn set_start_delay(&mut self, delay: Duration);

    /// Current start delay.
    fn start_delay(&self) -> Duration;

    /// Replace the interpolation curve.
    fn set_easing(&mut self, easing: Easing);

    /// Current interpolation curve.
    fn easing(&self) -> Easing;

    /// Begin a play-through from fraction 0, abandoning any run in flight.
    fn start(&mut self);

    /// Abandon the current run and return to idle.
    fn cancel(&mut self);

    /// Freeze a running animation at its last sample.
    fn pause(&mut self);

    /// Whether a started run is advancing (waiting out its delay or playing).
    fn is_running(&self) -> bool;

    /// Whether a run is frozen by [`pause`](Self::pause).
    fn is_paused(&self) -> bool;

    /// Whether the last run reached fraction 1.
    fn is_finished(&self) -> bool;

    /// Latest eased fraction, if the current run has produced one.
    fn sample(&self) -> Option<f32>;

    /// Advance the clock by `dt`, returning the new eased fraction if any.
    fn advance(&mut self, dt: Duration) -> Option<f32>;

    /// Latest sample mapped into the configured range.
    fn animated_value(&self) -> Option<f32>;
}

/// Play state of a [`ValueAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverPhase {
    /// Never started, or cancelled.
    #[default]
    Idle,
    /// Started; the start delay has not elapsed yet.
    Waiting,
    /// Producing samples.
    Playing,
    /// Reached the end of the curve.
    Ended,
}

/// Headless [`AnimationDriver`] backed by a [`Timeline`].
///
/// Time only moves when the host calls [`advance`](AnimationDriver::advance),
/// which makes runs fully deterministic under test.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    timeline: Timeline,
    duration: Duration,
    start_delay: Duration,
    easing: Easing,
    range: (f32, f32),
    phase: DriverPhase,
    paused: bool,
    fraction: Option<f32>,
}

impl ValueAnimator {
    /// Default play-through length.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

    /// Create an idle animator with a 0→1 range, default duration, no delay,
    /// and the default easing.
    pub fn new() -> Self {
        let duration = Self::DEFAULT_DURATION;
        let start_delay = Duration::ZERO;
        let easing = Easing::default();
        Self {
            timeline: Self::timeline(start_delay, duration, easing),
            duration,
            start_delay,
            easing,
            range: (0.0, 1.0),
            phase: DriverPhase::Idle,
            paused: false,
            fraction: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    fn timeline(start_delay: Duration, duration: Duration, easing: Easing) -> Timeline {
        Timeline::new(duration)
            .with_delay(start_delay)
            .with_easing(easing)
    }
}

impl Default for ValueAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver for ValueAnimator {
    fn set_range(&mut self, from: f32, to: f32) {
        self.range = (from, to);
    }

    fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_start_delay(&mut self, delay: Duration) {
        self.start_delay = delay;
    }

    fn start_delay(&self) -> Duration {
        self.start_delay
    }

    fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    fn easing(&self) -> Easing {
        self.easing
    }

    fn start(&mut self) {
        self.timeline = Self::timeline(self.start_delay, self.duration, self.easing);
        self.paused = false;
        if self.start_delay.is_zero() {
            // No delay: the first frame of the curve is visible immediately.
            self.phase = DriverPhase::Playing;
            self.fraction = Some(self.easing.apply(0.0));
        } else {
            self.phase = DriverPhase::Waiting;
            self.fraction = None;
        }
    }

    fn cancel(&mut self) {
        self.phase = DriverPhase::Idle;
        self.paused = false;
    }

    fn pause(&mut self) {
        if self.is_running() {
            self.paused = true;
        }
    }

    fn is_running(&self) -> bool {
        !self.paused && matches!(self.phase, DriverPhase::Waiting | DriverPhase::Playing)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_finished(&self) -> bool {
        self.phase == DriverPhase::Ended
    }

    fn sample(&self) -> Option<f32> {
        match self.phase {
            DriverPhase::Playing | DriverPhase::Ended => self.fraction,
            DriverPhase::Idle | DriverPhase::Waiting => None,
        }
    }

    fn advance(&mut self, dt: Duration) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        self.timeline.tick(dt);
        if !self.timeline.has_started() {
            return None;
        }

        let fraction = self.timeline.value();
        self.fraction = Some(fraction);
        self.phase = if self.timeline.is_complete() {
            DriverPhase::Ended
        } else {
            DriverPhase::Playing
        };
        Some(fraction)
    }

    fn animated_value(&self) -> Option<f32> {
        let (from, to) = self.range;
        self.sample().map(|f| from + (to - from) * f)
    }
}
