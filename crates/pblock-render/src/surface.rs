#![forbid(unsafe_code)]

//! The drawing-surface contract.
//!
//! Widgets never talk to a real canvas. They issue three kinds of commands
//! through [`DrawSurface`]: filled rectangles, stroked rectangle outlines,
//! and lines. Each command carries a [`Paint`] describing color and stroke.
//!
//! [`RecordingSurface`] keeps the commands in order, which is what headless
//! hosts and tests inspect. [`PixelBuffer`](crate::raster::PixelBuffer)
//! rasterizes them.

use pblock_core::geometry::{Point, Rect};

use crate::color::PackedRgba;

/// How a paint is applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    /// Cover the interior.
    #[default]
    Fill,
    /// Trace the outline, centered on the geometry.
    Stroke,
}

/// Color and stroke parameters for a draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: PackedRgba,
    pub style: PaintStyle,
    /// Stroke width in pixels. `0.0` draws a one-pixel hairline.
    pub stroke_width: f32,
}

impl Paint {
    /// A fill paint in `color`.
    pub const fn fill(color: PackedRgba) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }

    /// A stroke paint in `color` with the given width.
    ///
    /// Negative or non-finite widths are treated as a hairline.
    pub fn stroke(color: PackedRgba, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: if width.is_finite() { width.max(0.0) } else { 0.0 },
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(PackedRgba::BLACK)
    }
}

/// A canvas that accepts the widget's drawing commands.
pub trait DrawSurface {
    /// Fill `rect` with `paint.color`.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Stroke the outline of `rect` with `paint`.
    fn stroke_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draw a straight line from `from` to `to` with `paint`.
    fn line(&mut self, from: Point, to: Point, paint: &Paint);
}

/// One recorded command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, paint: Paint },
    Line { from: Point, to: Point, paint: Paint },
}

impl DrawCommand {
    /// Paint used by the command.
    pub fn paint(&self) -> &Paint {
        match self {
            Self::FillRect { paint, .. }
            | Self::StrokeRect { paint, .. }
            | Self::Line { paint, .. } => paint,
        }
    }
}

/// A surface that records commands in issue order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Filled rectangles, in order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Lines as `(from, to)` pairs, in order.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Replay the recording onto another surface.
    pub fn replay(&self, target: &mut dyn DrawSurface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("surface_replay", commands = self.commands.len()).entered();

        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, paint } => target.fill_rect(*rect, paint),
                DrawCommand::StrokeRect { rect, paint } => target.stroke_rect(*rect, paint),
                DrawCommand::Line { from, to, paint } => target.line(*from, *to, paint),
            }
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: *paint,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            paint: *paint,
        });
    }

    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_paint_sanitizes_width() {
        assert_eq!(Paint::stroke(PackedRgba::BLACK, -3.0).stroke_width, 0.0);
        assert_eq!(Paint::stroke(PackedRgba::BLACK, f32::NAN).stroke_width, 0.0);
        assert_eq!(Paint::stroke(PackedRgba::BLACK, 2.5).stroke_width, 2.5);
    }

    #[test]
    fn recorder_keeps_issue_order() {
        let mut s = RecordingSurface::new();
        let fill = Paint::fill(PackedRgba::YELLOW);
        let line = Paint::stroke(PackedRgba::BLACK, 2.0);
        s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &fill);
        s.stroke_rect(Rect::new(0.0, 0.0, 10.0, 5.0), &line);
        s.line(Point::new(0.0, 0.0), Point::new(0.0, 5.0), &line);

        let kinds: Vec<&str> = s
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::FillRect { .. } => "fill",
                DrawCommand::StrokeRect { .. } => "stroke",
                DrawCommand::Line { .. } => "line",
            })
            .collect();
        assert_eq!(kinds, ["fill", "stroke", "line"]);
        assert_eq!(s.filled_rects(), vec![Rect::new(0.0, 0.0, 5.0, 5.0)]);
        assert_eq!(s.lines().len(), 1);
        assert_eq!(s.commands()[0].paint().color, PackedRgba::YELLOW);
    }

    #[test]
    fn take_empties_recorder() {
        let mut s = RecordingSurface::new();
        s.fill_rect(Rect::default(), &Paint::default());
        assert_eq!(s.take().len(), 1);
        assert!(s.commands().is_empty());
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut a = RecordingSurface::new();
        a.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::default());
        a.line(Point::ZERO, Point::new(1.0, 1.0), &Paint::default());

        let mut b = RecordingSurface::new();
        a.replay(&mut b);
        assert_eq!(a.commands(), b.commands());
    }
}
