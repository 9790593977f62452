#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! A [`Timeline`] turns accumulated frame time into an eased fraction: it
//! waits out a start delay, then maps linear progress over its duration
//! through an [`Easing`] curve. Nothing here schedules frames on its own; the
//! host advances time through [`Animation::tick`], and the [`driver`] module
//! wraps a timeline behind the [`AnimationDriver`] contract widgets program
//! against.
//!
//! Curves are either plain functions ([`EasingFn`]) or [`CubicBezier`] timing
//! curves. Bézier curves whose control points leave the unit square overshoot.

pub mod driver;

pub use driver::{AnimationDriver, DriverPhase, ValueAnimator};

use std::time::Duration;

/// Easing function signature: maps linear progress `t` to an eased value.
pub type EasingFn = fn(f32) -> f32;

/// Constant velocity. Input is clamped to `[0, 1]`.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Cubic Bézier
// ---------------------------------------------------------------------------

/// A cubic Bézier timing curve from `(0, 0)` to `(1, 1)`.
///
/// The two inner control points are `(x1, y1)` and `(x2, y2)`. `x1` and `x2`
/// are expected in `[0, 1]` so the curve is a function of x; `y1`/`y2` may lie
/// outside, producing overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Quick start, brief overshoot past the target, then settle at 1.
    pub const PROGRESS_BLOCK: Self = Self::new(0.415, 0.490, 0.570, 1.365);

    /// Straight line; equivalent to [`linear`].
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Gentle acceleration then a long deceleration.
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);

    /// Slow start.
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);

    /// Slow end.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    /// Slow start and end.
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    const NEWTON_ITERATIONS: usize = 8;
    const BISECTION_ITERATIONS: usize = 32;
    const EPSILON: f32 = 1e-6;

    /// Create a curve from its inner control points.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    fn component(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    #[inline]
    fn slope(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Find the curve parameter whose x-coordinate is `x`.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = Self::component(self.x1, self.x2, t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < Self::EPSILON {
                break;
            }
            t -= err / d;
        }

        // Newton stalled or wandered off; fall back to bisection.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..Self::BISECTION_ITERATIONS {
            let cx = Self::component(self.x1, self.x2, t);
            if (cx - x).abs() < Self::EPSILON {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Evaluate the curve at time progress `x` (clamped to [0, 1]).
    pub fn ease(&self, x: f32) -> f32 {
        if !(x > 0.0) {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        Self::component(self.y1, self.y2, t)
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// An interpolation curve: either a plain function or a Bézier timing curve.
#[derive(Debug, Clone, Copy)]
pub enum Easing {
    Function(EasingFn),
    CubicBezier(CubicBezier),
}

impl Easing {
    /// Remap linear progress `t` through the curve.
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Self::Function(f) => f(t),
            Self::CubicBezier(curve) => curve.ease(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::CubicBezier(CubicBezier::PROGRESS_BLOCK)
    }
}

impl From<EasingFn> for Easing {
    fn from(f: EasingFn) -> Self {
        Self::Function(f)
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Self::CubicBezier(curve)
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// Something advanced by frame time that reports a normalized value.
pub trait Animation {
    /// Add `dt` to the elapsed time.
    fn tick(&mut self, dt: Duration);

    /// Whether the end of the animation has been reached.
    fn is_complete(&self) -> bool;

    /// Value at the current elapsed time.
    fn value(&self) -> f32;
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// A delayed, eased 0→1 progression.
///
/// Elapsed time is accumulated as a [`Duration`], so many small ticks land
/// exactly on completion without floating-point drift. Time that spills past
/// the delay within one tick counts toward the run.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Timeline {
    /// A timeline of `duration` with no delay and linear easing.
    ///
    /// A zero duration jumps to 1 as soon as the delay has passed.
    pub fn new(duration: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Function(linear),
        }
    }

    /// Wait `delay` before the run begins.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Use `easing` to shape the run.
    #[must_use]
    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Whether the delay has elapsed.
    pub fn has_started(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Time spent in the run itself, excluding the delay.
    pub fn run_time(&self) -> Duration {
        self.elapsed.saturating_sub(self.delay)
    }

    /// Linear progress through the run, in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        if !self.has_started() {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.run_time().as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Timeline {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.has_started() && self.run_time() >= self.duration
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.raw_progress())
    }
}
