#![forbid(unsafe_code)]

//! Core: geometry, easing curves, and the animation driver contract.

pub mod animation;
pub mod geometry;
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::{debug, warn};
