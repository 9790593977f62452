#![forbid(unsafe_code)]

//! Colors.
//!
//! [`PackedRgba`] is the single color representation used by paints and the
//! rasterizer. Declarative configuration spells colors as strings
//! (`#RRGGBB`, `#AARRGGBB`, or a named color) or as packed `0xAARRGGBB`
//! integers; both forms deserialize directly.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Straight (non-premultiplied) alpha. Compositing uses Porter-Duff
/// SourceOver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::rgb(0x88, 0x88, 0x88);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Convert from a packed `0xAARRGGBB` integer (alpha first).
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb.rotate_left(8))
    }

    /// Pack as `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        self.0.rotate_right(8)
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Computed in the exact rational form and rounded once at the end.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), i.e. out alpha in the 255^2 domain.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);
        let channel = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            out_a,
        )
    }

    /// Look up a named color (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" | "lime" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "cyan" | "aqua" => Self::CYAN,
            "magenta" | "fuchsia" => Self::MAGENTA,
            "gray" | "grey" => Self::GRAY,
            "darkgray" | "darkgrey" => Self::rgb(0x44, 0x44, 0x44),
            "lightgray" | "lightgrey" => Self::rgb(0xCC, 0xCC, 0xCC),
            "maroon" => Self::rgb(0x80, 0x00, 0x00),
            "navy" => Self::rgb(0x00, 0x00, 0x80),
            "olive" => Self::rgb(0x80, 0x80, 0x00),
            "purple" => Self::rgb(0x80, 0x00, 0x80),
            "silver" => Self::rgb(0xC0, 0xC0, 0xC0),
            "teal" => Self::rgb(0x00, 0x80, 0x80),
            _ => return None,
        };
        Some(color)
    }

    /// Parse `#RRGGBB`, `#AARRGGBB`, or a named color.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Self::named(s).ok_or_else(|| ColorParseError::UnknownName(s.to_string()));
        };

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(ColorParseError::InvalidHex(s.to_string())),
        }
    }
}

impl fmt::Display for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a() == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
        } else {
            write!(f, "#{:08X}", self.to_argb())
        }
    }
}

impl FromStr for PackedRgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for PackedRgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColorVisitor;

        impl Visitor<'_> for ColorVisitor {
            type Value = PackedRgba;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color string (#RRGGBB, #AARRGGBB, name) or 0xAARRGGBB integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PackedRgba, E> {
                PackedRgba::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PackedRgba, E> {
                u32::try_from(v)
                    .map(PackedRgba::from_argb)
                    .map_err(|_| E::custom(format!("color integer out of range: {v}")))
            }

            // Signed 32-bit ARGB values (alpha >= 0x80) arrive negative.
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PackedRgba, E> {
                i32::try_from(v)
                    .map(|argb| PackedRgba::from_argb(argb as u32))
                    .map_err(|_| E::custom(format!("color integer out of range: {v}")))
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// `#` followed by something other than 6 or 8 hex digits.
    InvalidHex(String),
    /// Not a hex color and not a known name.
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(s) => write!(f, "invalid hex color: {s}"),
            Self::UnknownName(s) => write!(f, "unknown color name: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
