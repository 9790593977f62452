#![forbid(unsafe_code)]

//! Segmented, animated progress block.
//!
//! This crate is the public surface: it re-exports the widget, its
//! configuration, the drawing contract, and the animation driver, and offers
//! a prelude for day-to-day use.
//!
//! ```
//! use std::time::Duration;
//! use pblock::prelude::*;
//!
//! let config = ProgressBlockConfig::from_json(
//!     r#"{"maxCount": 4, "currentCount": 3, "startDelay": 48, "autoStart": true}"#,
//! )?;
//! let mut block = ProgressBlock::initialize(&config)?;
//! while block.on_frame(Duration::from_millis(16)) {}
//!
//! let mut pixels = PixelBuffer::new(40, 8);
//! block.draw(pixels.size(), &mut pixels);
//! assert_eq!(pixels.get(1, 4), Some(PackedRgba::YELLOW));
//! # Ok::<(), pblock::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use pblock_core::animation::{
    AnimationDriver, CubicBezier, DriverPhase, Easing, EasingFn, ValueAnimator,
};
pub use pblock_core::geometry::{Point, Rect, Size};

// --- Render re-exports -----------------------------------------------------

pub use pblock_render::{
    ColorParseError, DrawCommand, DrawSurface, PackedRgba, Paint, PaintStyle, PixelBuffer,
    RecordingSurface,
};

// --- Widget re-exports -----------------------------------------------------

pub use pblock_widgets::{
    AnimationState, BlockGeometry, ConfigError, ConfigParse, ProgressBlock, ProgressBlockConfig,
    Widget, block_geometry,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Widget configuration was rejected.
    Config(ConfigError),
    /// A color string could not be parsed.
    Color(ColorParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Color(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

/// Standard result type for pblock APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimationDriver, AnimationState, DrawSurface, Easing, Error, PackedRgba, PixelBuffer,
        ProgressBlock, ProgressBlockConfig, RecordingSurface, Result, Size, Widget,
    };

    pub use crate::{core, render, widgets};
}

pub use pblock_core as core;
pub use pblock_render as render;
pub use pblock_widgets as widgets;
