#![forbid(unsafe_code)]

//! Lifecycle logging.
//!
//! Widgets log state transitions with `pblock_core::debug!` and rejected
//! configuration with `pblock_core::warn!`. With the `tracing` feature these
//! are the `tracing` event macros; without it they expand to nothing and
//! their arguments are never evaluated.
//!
//! Spans are not shimmed. Code that opens a span does so behind
//! `#[cfg(feature = "tracing")]` and calls `tracing` directly.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_structured_fields() {
        let count = 3u32;
        crate::debug!(count, label = "cells", "progress block initialized");
        crate::warn!(error = %"bad", "rejected count change");
    }
}
