#![forbid(unsafe_code)]

//! Configuration errors.

use std::fmt;

/// A rejected configuration.
///
/// Raised synchronously by the setter or constructor that would have produced
/// the invalid state; the widget is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_count` would drop below `current_count`.
    CountOverflow { max_count: u32, current_count: u32 },
    /// `max_count` of zero leaves the segment width undefined.
    ZeroMaxCount,
    /// An attribute value failed to parse.
    InvalidAttribute {
        field: &'static str,
        value: String,
        message: String,
    },
    /// The attribute document is malformed.
    Json(String),
}

impl ConfigError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountOverflow {
                max_count,
                current_count,
            } => write!(
                f,
                "maxCount must not be less than currentCount (maxCount={max_count}, currentCount={current_count})"
            ),
            Self::ZeroMaxCount => write!(f, "maxCount must be at least 1"),
            Self::InvalidAttribute {
                field,
                value,
                message,
            } => write!(f, "{field}={value} ({message})"),
            Self::Json(msg) => write!(f, "invalid attribute document: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
