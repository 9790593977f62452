#![forbid(unsafe_code)]

//! Declarative configuration for [`ProgressBlock`](crate::progress_block::ProgressBlock).
//!
//! Attributes are read once, when the widget is initialized. They arrive
//! either as a JSON document ([`ProgressBlockConfig::from_json`]) or as a
//! string attribute bag, the way markup hands them over
//! ([`ProgressBlockConfig::from_attributes_with`]).
//!
//! | attribute | type | default |
//! |---|---|---|
//! | `maxCount` | int | 10 |
//! | `currentCount` | int | 5 |
//! | `startDelay` | float ms | 0 |
//! | `duration` | float ms | 1000 |
//! | `lineColor` | color | black |
//! | `countedColor` | color | yellow |
//! | `unCountedColor` | color | white |
//! | `lineWidth` | dimension | 2 |
//! | `autoStart` | bool | false |
//!
//! Parsing never fails half-way: the attribute-bag path collects every bad
//! value into [`ConfigParse::errors`] and keeps the default for that field.
//! Count constraints are checked by [`validate`](ProgressBlockConfig::validate)
//! and again when the widget is built.

use std::time::Duration;

use pblock_core::animation::Easing;
use pblock_render::color::PackedRgba;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Attribute names, as spelled in markup.
pub mod attr {
    pub const MAX_COUNT: &str = "maxCount";
    pub const CURRENT_COUNT: &str = "currentCount";
    pub const START_DELAY: &str = "startDelay";
    pub const DURATION: &str = "duration";
    pub const LINE_COLOR: &str = "lineColor";
    pub const COUNTED_COLOR: &str = "countedColor";
    pub const UNCOUNTED_COLOR: &str = "unCountedColor";
    pub const LINE_WIDTH: &str = "lineWidth";
    pub const AUTO_START: &str = "autoStart";
}

/// Everything needed to build a ready widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressBlockConfig {
    pub max_count: u32,
    pub current_count: u32,
    /// Start delay in milliseconds.
    pub start_delay: f64,
    /// Run duration in milliseconds.
    pub duration: f64,
    pub line_color: PackedRgba,
    pub counted_color: PackedRgba,
    #[serde(rename = "unCountedColor")]
    pub uncounted_color: PackedRgba,
    #[serde(deserialize_with = "deserialize_dimension")]
    pub line_width: f32,
    pub auto_start: bool,
    /// Interpolation curve; programmatic only.
    #[serde(skip)]
    pub easing: Easing,
}

impl Default for ProgressBlockConfig {
    fn default() -> Self {
        Self {
            max_count: 10,
            current_count: 5,
            start_delay: 0.0,
            duration: 1000.0,
            line_color: PackedRgba::BLACK,
            counted_color: PackedRgba::YELLOW,
            uncounted_color: PackedRgba::WHITE,
            line_width: 2.0,
            auto_start: false,
            easing: Easing::default(),
        }
    }
}

/// Result of parsing an attribute bag: the config plus every rejected value.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: ProgressBlockConfig,
    pub errors: Vec<ConfigError>,
}

impl ConfigParse {
    /// The config if nothing was rejected, otherwise the first error.
    pub fn into_result(self) -> Result<ProgressBlockConfig, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.config),
        }
    }
}

impl ProgressBlockConfig {
    /// Parse a JSON attribute document. Missing attributes take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a string attribute bag through `get`.
    ///
    /// `get` returns the raw attribute text, or `None` when absent.
    #[must_use]
    pub fn from_attributes_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(v) = get(attr::MAX_COUNT) {
            parse_into(attr::MAX_COUNT, &v, parse_count, &mut config.max_count, &mut errors);
        }
        if let Some(v) = get(attr::CURRENT_COUNT) {
            parse_into(
                attr::CURRENT_COUNT,
                &v,
                parse_count,
                &mut config.current_count,
                &mut errors,
            );
        }
        if let Some(v) = get(attr::START_DELAY) {
            parse_into(attr::START_DELAY, &v, parse_millis, &mut config.start_delay, &mut errors);
        }
        if let Some(v) = get(attr::DURATION) {
            parse_into(attr::DURATION, &v, parse_millis, &mut config.duration, &mut errors);
        }
        if let Some(v) = get(attr::LINE_COLOR) {
            parse_into(attr::LINE_COLOR, &v, parse_color, &mut config.line_color, &mut errors);
        }
        if let Some(v) = get(attr::COUNTED_COLOR) {
            parse_into(
                attr::COUNTED_COLOR,
                &v,
                parse_color,
                &mut config.counted_color,
                &mut errors,
            );
        }
        if let Some(v) = get(attr::UNCOUNTED_COLOR) {
            parse_into(
                attr::UNCOUNTED_COLOR,
                &v,
                parse_color,
                &mut config.uncounted_color,
                &mut errors,
            );
        }
        if let Some(v) = get(attr::LINE_WIDTH) {
            parse_into(attr::LINE_WIDTH, &v, parse_dimension, &mut config.line_width, &mut errors);
        }
        if let Some(v) = get(attr::AUTO_START) {
            parse_into(attr::AUTO_START, &v, parse_bool, &mut config.auto_start, &mut errors);
        }

        ConfigParse { config, errors }
    }

    /// Check cross-field constraints and return every violation.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        match check_counts(self.max_count, self.current_count) {
            Ok(()) => Ok(()),
            Err(err) => Err(vec![err]),
        }
    }

    /// Start delay as a [`Duration`]. Fractional milliseconds are truncated;
    /// negative or non-finite values mean no delay.
    pub fn start_delay_duration(&self) -> Duration {
        millis_to_duration(self.start_delay)
    }

    /// Run duration as a [`Duration`], truncated like the start delay.
    pub fn run_duration(&self) -> Duration {
        millis_to_duration(self.duration)
    }
}

/// Validate a `(max, current)` pair.
pub(crate) fn check_counts(max_count: u32, current_count: u32) -> Result<(), ConfigError> {
    if max_count == 0 {
        return Err(ConfigError::ZeroMaxCount);
    }
    if max_count < current_count {
        return Err(ConfigError::CountOverflow {
            max_count,
            current_count,
        });
    }
    Ok(())
}

fn millis_to_duration(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_millis(ms as u64)
    } else {
        Duration::ZERO
    }
}

fn parse_into<T>(
    field: &'static str,
    raw: &str,
    parse: fn(&str) -> Result<T, String>,
    slot: &mut T,
    errors: &mut Vec<ConfigError>,
) {
    match parse(raw) {
        Ok(v) => *slot = v,
        Err(message) => errors.push(ConfigError::invalid(field, raw, message)),
    }
}

fn parse_count(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| format!("expected a non-negative integer: {e}"))
}

fn parse_millis(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| format!("expected milliseconds: {e}"))
}

fn parse_color(raw: &str) -> Result<PackedRgba, String> {
    PackedRgba::parse(raw).map_err(|e| e.to_string())
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

/// Parse a dimension: a bare number or one suffixed with `px`, `dp`, `dip`, or `sp`.
pub fn parse_dimension(raw: &str) -> Result<f32, String> {
    let s = raw.trim();
    let number = ["px", "dip", "dp", "sp"]
        .iter()
        .find_map(|unit| s.strip_suffix(unit))
        .unwrap_or(s);
    number
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("expected a dimension: {e}"))
}

fn deserialize_dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Number(f32),
        Text(String),
    }

    match Dimension::deserialize(deserializer)? {
        Dimension::Number(v) => Ok(v),
        Dimension::Text(s) => parse_dimension(&s).map_err(serde::de::Error::custom),
    }
}
