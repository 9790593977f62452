#![forbid(unsafe_code)]

//! Render kernel: colors, paints, and surfaces the widget draws onto.

pub mod color;
pub mod raster;
pub mod surface;

pub use color::{ColorParseError, PackedRgba};
pub use raster::PixelBuffer;
pub use surface::{DrawCommand, DrawSurface, Paint, PaintStyle, RecordingSurface};
