#![forbid(unsafe_code)]

//! Software rasterizer.
//!
//! [`PixelBuffer`] is a row-major grid of [`PackedRgba`] pixels implementing
//! [`DrawSurface`]. It exists so widgets can be rendered headlessly and their
//! output compared pixel by pixel.
//!
//! # Coverage rule
//!
//! A pixel `(x, y)` spans `[x, x+1) × [y, y+1)` and is painted when its center
//! `(x + 0.5, y + 0.5)` lies inside the shape. No antialiasing.
//!
//! - Fills cover the rectangle's interior.
//! - Strokes are centered on the geometry: a rectangle outline of width `w`
//!   covers `rect.inflate(w/2)` minus `rect.inflate(-w/2)`; a line covers
//!   centers whose signed distance from the segment falls in `[-w/2, w/2)`,
//!   with butt caps.
//! - Width `0` is a hairline, rasterized as width 1.
//! - Hairline coordinates lying on the buffer's extent are pulled inward by
//!   half a pixel, so an outline around the whole buffer shows on all four
//!   sides and a divider at `x = 0` lands on column 0.
//!
//! # Invariants
//!
//! 1. `pixels.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Writes outside the grid are ignored
//! 4. Every write composites with SourceOver

use pblock_core::geometry::{Point, Rect};

use crate::color::PackedRgba;
use crate::surface::{DrawSurface, Paint};

/// A 2D grid of pixels.
///
/// # Example
///
/// ```
/// use pblock_core::geometry::Rect;
/// use pblock_render::color::PackedRgba;
/// use pblock_render::raster::PixelBuffer;
/// use pblock_render::surface::{DrawSurface, Paint};
///
/// let mut buf = PixelBuffer::new(4, 2);
/// buf.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &Paint::fill(PackedRgba::RED));
/// assert_eq!(buf.get(1, 1), Some(PackedRgba::RED));
/// assert_eq!(buf.get(2, 1), Some(PackedRgba::TRANSPARENT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    pixels: Vec<PackedRgba>,
}

impl PixelBuffer {
    /// Create a transparent buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; len],
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Widget-space size covered by the buffer.
    pub fn size(&self) -> pblock_core::geometry::Size {
        (self.width, self.height).into()
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Composite `color` over the pixel at `(x, y)`.
    #[inline]
    pub fn blend(&mut self, x: u16, y: u16, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(PackedRgba::TRANSPARENT);
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u16) -> &[PackedRgba] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Render as text, one line per row, mapping colors through `legend`.
    ///
    /// Colors missing from the legend print as `?`.
    pub fn to_ascii(&self, legend: &[(PackedRgba, char)]) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for &px in self.row(y) {
                let ch = legend
                    .iter()
                    .find(|(c, _)| *c == px)
                    .map_or('?', |(_, ch)| *ch);
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    /// Pixel-center span `[start, end)` along one axis covered by `[lo, hi)`.
    fn span(lo: f32, hi: f32, limit: u16) -> (u16, u16) {
        let clamp = |v: f32| v.clamp(0.0, f32::from(limit)) as u16;
        if !(hi > lo) {
            return (0, 0);
        }
        (clamp((lo - 0.5).ceil()), clamp((hi - 0.5).ceil()))
    }

    fn paint_where(&mut self, bounds: Rect, color: PackedRgba, inside: impl Fn(Point) -> bool) {
        let Some(bounds) = bounds.intersection(&Rect::from_size(self.size())) else {
            return;
        };
        let (x0, x1) = Self::span(bounds.left, bounds.right, self.width);
        let (y0, y1) = Self::span(bounds.top, bounds.bottom, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f32::from(x) + 0.5, f32::from(y) + 0.5);
                if inside(center) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn half_width(paint: &Paint) -> f32 {
        paint.stroke_width.max(1.0) / 2.0
    }

    /// Move a hairline coordinate on `[0, limit]` into `[half, limit - half]`.
    fn snap_hairline(v: f32, half: f32, limit: u16) -> f32 {
        let limit = f32::from(limit);
        if half > 0.5 || !(0.0..=limit).contains(&v) || half > limit - half {
            return v;
        }
        v.clamp(half, limit - half)
    }
}

impl DrawSurface for PixelBuffer {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.paint_where(rect, paint.color, |_| true);
    }

    fn stroke_rect(&mut self, rect: Rect, paint: &Paint) {
        let half = Self::half_width(paint);
        let rect = Rect::new(
            Self::snap_hairline(rect.left, half, self.width),
            Self::snap_hairline(rect.top, half, self.height),
            Self::snap_hairline(rect.right, half, self.width),
            Self::snap_hairline(rect.bottom, half, self.height),
        );
        let outer = rect.inflate(half);
        let inner = rect.inflate(-half);
        let hollow = !inner.is_empty();
        self.paint_where(outer, paint.color, |p| !(hollow && inner.contains(p)));
    }

    fn line(&mut self, mut from: Point, mut to: Point, paint: &Paint) {
        let half = Self::half_width(paint);
        if from.x == to.x {
            from.x = Self::snap_hairline(from.x, half, self.width);
            to.x = from.x;
        } else if from.y == to.y {
            from.y = Self::snap_hairline(from.y, half, self.height);
            to.y = from.y;
        }

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len_sq = dx * dx + dy * dy;
        if !(len_sq > 0.0) {
            return;
        }
        let len = len_sq.sqrt();
        let bounds = Rect::new(
            from.x.min(to.x),
            from.y.min(to.y),
            from.x.max(to.x),
            from.y.max(to.y),
        )
        .inflate(half + 1.0);

        self.paint_where(bounds, paint.color, |p| {
            let (rx, ry) = (p.x - from.x, p.y - from.y);
            let t = (rx * dx + ry * dy) / len_sq;
            if !(0.0..=1.0).contains(&t) {
                return false;
            }
            // Signed distance from the segment; the band is half-open like fills.
            let d = (rx * dy - ry * dx) / len;
            -half <= d && d < half
        });
    }
}
