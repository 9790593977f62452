#![forbid(unsafe_code)]

//! Widgets: the segmented progress block and its configuration.

pub mod config;
pub mod error;
pub mod progress_block;

pub use config::{ConfigParse, ProgressBlockConfig};
pub use error::ConfigError;
pub use progress_block::{AnimationState, BlockGeometry, ProgressBlock, block_geometry};

use pblock_core::animation::AnimationDriver;
use pblock_core::geometry::Size;
use pblock_render::surface::DrawSurface;

/// A `Widget` is a drawable component.
///
/// Widgets draw themselves onto a [`DrawSurface`] whose origin is the
/// widget's top-left corner and whose extent is `size`.
pub trait Widget {
    /// Draw the widget.
    fn draw(&self, size: Size, surface: &mut dyn DrawSurface);
}

impl<D: AnimationDriver> Widget for ProgressBlock<D> {
    fn draw(&self, size: Size, surface: &mut dyn DrawSurface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_draw",
            widget = "ProgressBlock",
            w = size.width,
            h = size.height,
            max_count = self.max_count(),
            current_count = self.current_count(),
            fraction = self.animated_fraction()
        )
        .entered();

        if size.is_empty() {
            return;
        }

        self.draw_background(size, surface);
        self.on_draw(size, surface);
    }
}
