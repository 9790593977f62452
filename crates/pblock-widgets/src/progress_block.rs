#![forbid(unsafe_code)]

//! Segmented, animated progress block.
//!
//! The block divides its bounds into `max_count` equal cells and fills a
//! prefix proportional to `current_count / max_count`. The fill grows from
//! nothing to its full width as the animation driver advances an eased
//! fraction from 0 to 1.
//!
//! # Drawing
//!
//! For a surface of width `W` and height `H`:
//!
//! 1. Fill `(0,0)-(filled,H)` in the counted color, where
//!    `filled = W × current / max × fraction`.
//! 2. Stroke the `(0,0)-(W,H)` outline in the line color and width.
//! 3. Draw `max + 1` vertical dividers at `x = W·i/max`, `i = 0..=max`.
//!
//! The order matters: the outline and dividers sit on top of the fill.
//! [`Widget::draw`](crate::Widget::draw) paints the uncounted-color
//! background first.
//!
//! # Lifecycle
//!
//! ```text
//!  Idle ──start──▶ Running ──fraction = 1──▶ Completed
//!                   │  ▲
//!                 stop start
//!                   ▼  │
//!                  Paused
//! ```
//!
//! `start` always begins again at fraction 0. `clear` only resets the drawn
//! fraction; it leaves the driver alone.
//!
//! # Invariants
//!
//! 1. `1 <= max_count` and `current_count <= max_count` at all times
//! 2. A rejected setter leaves every field unchanged
//! 3. The stored fraction is finite and within `[0, 1]`

use std::time::Duration;

use pblock_core::animation::{AnimationDriver, Easing, ValueAnimator};
use pblock_core::geometry::{Point, Rect, Size};
use pblock_render::color::PackedRgba;
use pblock_render::surface::{DrawSurface, Paint};

use crate::config::{ProgressBlockConfig, check_counts};
use crate::error::ConfigError;

/// Observable animation state of a [`ProgressBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Not started, or the driver was cancelled.
    #[default]
    Idle,
    /// Waiting out the start delay or advancing.
    Running,
    /// Frozen by [`ProgressBlock::stop`].
    Paused,
    /// Reached fraction 1.
    Completed,
}

/// Draw-time geometry, computed without touching a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGeometry {
    /// Full widget bounds `(0,0)-(W,H)`.
    pub bounds: Rect,
    /// Counted-color fill `(0,0)-(filled,H)`.
    pub filled: Rect,
    /// Divider x positions, left to right.
    pub dividers: Vec<f32>,
}

impl BlockGeometry {
    /// Width of the filled prefix.
    pub fn filled_width(&self) -> f32 {
        self.filled.width()
    }
}

/// Compute fill and divider geometry for a block.
///
/// `fraction` is clamped to `[0, 1]` (NaN counts as 0). A `max_count` of 0
/// yields an empty fill and a single divider at `x = 0`.
pub fn block_geometry(size: Size, max_count: u32, current_count: u32, fraction: f32) -> BlockGeometry {
    let (w, h) = (size.width, size.height);
    let bounds = Rect::new(0.0, 0.0, w, h);

    if max_count == 0 {
        return BlockGeometry {
            bounds,
            filled: Rect::new(0.0, 0.0, 0.0, h),
            dividers: vec![0.0],
        };
    }

    let max = max_count as f32;
    let counted = w * current_count.min(max_count) as f32 / max;
    let filled_width = (counted * clamp_fraction(fraction)).clamp(0.0, w.max(0.0));

    let dividers = (0..=max_count).map(|i| w * i as f32 / max).collect();

    BlockGeometry {
        bounds,
        filled: Rect::new(0.0, 0.0, filled_width, h),
        dividers,
    }
}

fn clamp_fraction(f: f32) -> f32 {
    if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
}

/// A segmented progress bar with an animated fill.
///
/// Generic over the animation clock; the default is the headless
/// [`ValueAnimator`], advanced by the host through [`on_frame`](Self::on_frame).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pblock_core::geometry::Size;
/// use pblock_widgets::{ProgressBlock, ProgressBlockConfig};
///
/// let config = ProgressBlockConfig { auto_start: true, ..Default::default() };
/// let mut block = ProgressBlock::initialize(&config).unwrap();
/// while block.on_frame(Duration::from_millis(16)) {}
///
/// let geometry = block.geometry(Size::new(100.0, 20.0));
/// assert_eq!(geometry.filled_width(), 50.0);
/// assert_eq!(geometry.dividers.len(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBlock<D: AnimationDriver = ValueAnimator> {
    max_count: u32,
    current_count: u32,
    animated_fraction: Option<f32>,
    line_color: PackedRgba,
    counted_color: PackedRgba,
    uncounted_color: PackedRgba,
    line_width: f32,
    auto_start: bool,
    needs_redraw: bool,
    driver: D,
}

impl ProgressBlock<ValueAnimator> {
    /// Build a ready widget from `config` with the headless animator.
    pub fn initialize(config: &ProgressBlockConfig) -> Result<Self, ConfigError> {
        Self::initialize_with_driver(config, ValueAnimator::new())
    }
}

impl<D: AnimationDriver> ProgressBlock<D> {
    /// Build a ready widget from `config`, animating through `driver`.
    ///
    /// Counts, timing, colors, and line width are applied before the driver
    /// is armed. With `auto_start`, [`start`](Self::start) runs once at the
    /// end.
    pub fn initialize_with_driver(config: &ProgressBlockConfig, mut driver: D) -> Result<Self, ConfigError> {
        if let Err(err) = check_counts(config.max_count, config.current_count) {
            pblock_core::warn!(error = %err, "rejected progress block config");
            return Err(err);
        }

        driver.set_duration(config.run_duration());
        driver.set_start_delay(config.start_delay_duration());

        let mut block = Self {
            max_count: config.max_count,
            current_count: config.current_count,
            animated_fraction: None,
            line_color: config.line_color,
            counted_color: config.counted_color,
            uncounted_color: config.uncounted_color,
            line_width: config.line_width,
            auto_start: config.auto_start,
            needs_redraw: true,
            driver,
        };

        block.driver.set_range(0.0, 1.0);
        block.driver.set_easing(config.easing);

        pblock_core::debug!(
            max_count = block.max_count,
            current_count = block.current_count,
            auto_start = block.auto_start,
            "progress block initialized"
        );

        if block.auto_start {
            block.start();
        }
        Ok(block)
    }

    // --- counts ---

    /// Number of cells.
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Number of counted cells.
    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    /// Set the number of cells.
    ///
    /// Fails with [`ConfigError::ZeroMaxCount`] for 0 and with
    /// [`ConfigError::CountOverflow`] when `n < current_count`.
    pub fn set_max_count(&mut self, n: u32) -> Result<(), ConfigError> {
        self.set_counts(n, self.current_count)
    }

    /// Set the number of counted cells.
    ///
    /// Fails with [`ConfigError::CountOverflow`] when `n > max_count`.
    pub fn set_current_count(&mut self, n: u32) -> Result<(), ConfigError> {
        self.set_counts(self.max_count, n)
    }

    /// Set both counts at once, validating the pair as a whole.
    pub fn set_counts(&mut self, max_count: u32, current_count: u32) -> Result<(), ConfigError> {
        if let Err(err) = check_counts(max_count, current_count) {
            pblock_core::warn!(error = %err, "rejected count change");
            return Err(err);
        }
        self.max_count = max_count;
        self.current_count = current_count;
        self.needs_redraw = true;
        Ok(())
    }

    // --- styling ---

    pub fn line_color(&self) -> PackedRgba {
        self.line_color
    }

    pub fn set_line_color(&mut self, color: PackedRgba) {
        self.line_color = color;
        self.needs_redraw = true;
    }

    pub fn counted_color(&self) -> PackedRgba {
        self.counted_color
    }

    pub fn set_counted_color(&mut self, color: PackedRgba) {
        self.counted_color = color;
        self.needs_redraw = true;
    }

    pub fn uncounted_color(&self) -> PackedRgba {
        self.uncounted_color
    }

    /// Set the uncounted color, which is also the background fill.
    pub fn set_uncounted_color(&mut self, color: PackedRgba) {
        self.uncounted_color = color;
        self.needs_redraw = true;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Set the outline and divider width. Negative widths draw as hairlines.
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.needs_redraw = true;
    }

    /// Paint for the outline and dividers.
    pub fn line_paint(&self) -> Paint {
        Paint::stroke(self.line_color, self.line_width)
    }

    /// Paint for the counted fill.
    pub fn counted_paint(&self) -> Paint {
        Paint::fill(self.counted_color)
    }

    /// Paint for the background.
    pub fn background_paint(&self) -> Paint {
        Paint::fill(self.uncounted_color)
    }

    // --- timing ---

    pub fn duration(&self) -> Duration {
        self.driver.duration()
    }

    /// Set the run length. Takes effect at the next [`start`](Self::start).
    pub fn set_duration(&mut self, duration: Duration) {
        self.driver.set_duration(duration);
    }

    pub fn start_delay(&self) -> Duration {
        self.driver.start_delay()
    }

    /// Set the wait before the fill begins. Takes effect at the next start.
    pub fn set_start_delay(&mut self, delay: Duration) {
        self.driver.set_start_delay(delay);
    }

    pub fn easing(&self) -> Easing {
        self.driver.easing()
    }

    /// Replace the interpolation curve. Takes effect at the next start.
    pub fn set_easing(&mut self, easing: impl Into<Easing>) {
        self.driver.set_easing(easing.into());
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// Only read by `initialize`; changing it later has no effect.
    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }

    // --- lifecycle ---

    /// Current animation state, derived from the driver.
    pub fn state(&self) -> AnimationState {
        if self.driver.is_paused() {
            AnimationState::Paused
        } else if self.driver.is_running() {
            AnimationState::Running
        } else if self.driver.is_finished() {
            AnimationState::Completed
        } else {
            AnimationState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// The fraction drawn next, 0 when nothing has been sampled.
    pub fn animated_fraction(&self) -> f32 {
        self.animated_fraction.unwrap_or(0.0)
    }

    /// Begin the fill animation from fraction 0.
    ///
    /// A run in flight is cancelled first.
    pub fn start(&mut self) {
        if self.driver.is_running() {
            pblock_core::debug!("restarting progress block animation");
            self.driver.cancel();
        }
        self.driver.start();
        if let Some(sample) = self.driver.sample() {
            self.animated_fraction = Some(clamp_fraction(sample));
        }
        self.needs_redraw = true;
        pblock_core::debug!(
            duration_ms = self.driver.duration().as_millis() as u64,
            delay_ms = self.driver.start_delay().as_millis() as u64,
            "progress block animation started"
        );
    }

    /// Freeze a running animation at its last fraction. No-op otherwise.
    pub fn stop(&mut self) {
        if self.driver.is_running() {
            self.driver.pause();
            pblock_core::debug!(fraction = self.animated_fraction(), "progress block animation paused");
        }
    }

    /// Reset the drawn fraction to 0 and request a repaint.
    pub fn clear(&mut self) {
        self.animated_fraction = Some(0.0);
        self.needs_redraw = true;
        pblock_core::debug!("progress block cleared");
    }

    /// Advance the animation by `dt`.
    ///
    /// Returns `true` while the host should keep calling: the run is still
    /// in flight (start delay included) or this frame sampled its final
    /// fraction. A sampled frame also marks the widget for redraw; frames
    /// spent in the start delay do not.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        let sampled = match self.driver.advance(dt) {
            Some(sample) => {
                self.animated_fraction = Some(clamp_fraction(sample));
                self.needs_redraw = true;
                if self.driver.is_finished() {
                    pblock_core::debug!("progress block animation completed");
                }
                true
            }
            None => false,
        };
        sampled || self.driver.is_running()
    }

    /// Whether a repaint has been requested since the last [`take_redraw`](Self::take_redraw).
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the repaint request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Borrow the animation driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    // --- drawing ---

    /// Geometry the next draw would produce at `size`.
    pub fn geometry(&self, size: Size) -> BlockGeometry {
        block_geometry(size, self.max_count, self.current_count, self.animated_fraction())
    }

    /// Fill the whole area in the uncounted color.
    pub fn draw_background(&self, size: Size, surface: &mut dyn DrawSurface) {
        surface.fill_rect(Rect::from_size(size), &self.background_paint());
    }

    /// Issue the fill, outline, and divider commands.
    pub fn on_draw(&self, size: Size, surface: &mut dyn DrawSurface) {
        let geometry = self.geometry(size);
        let line = self.line_paint();

        surface.fill_rect(geometry.filled, &self.counted_paint());
        surface.stroke_rect(geometry.bounds, &line);

        let (top, bottom) = (geometry.bounds.top, geometry.bounds.bottom);
        for &x in &geometry.dividers {
            surface.line(Point::new(x, top), Point::new(x, bottom), &line);
        }
    }
}
