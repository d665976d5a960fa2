use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::warn;

/// Neutral row color for tasks without one.
pub const DEFAULT_ROW_COLOR: &str = "#e5e7eb";

/// How much interval fills are darkened relative to their row color.
pub const DEFAULT_SHADE_PERCENT: i32 = -30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color '{0}' is not a 6-digit hex value")]
    InvalidHex(String),
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shift every channel by `percent` of the full channel range.
    ///
    /// Negative percentages darken, positive ones lighten; channels saturate
    /// at 0 and 255. The shift rounds halves upward, so `-30` shifts by 76
    /// and `+30` by 77.
    pub fn shade(self, percent: f64) -> Self {
        // Clamped before the cast so huge percentages cannot overflow.
        let amount = (percent * 2.55 + 0.5).floor().clamp(-255.0, 255.0) as i32;
        let shift = |channel: u8| (channel as i32 + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Parse `hex`, falling back to `fallback` when it is malformed.
pub fn parse_or(hex: &str, fallback: Rgb) -> Rgb {
    match Rgb::from_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!(%err, fallback = %fallback, "substituting fallback color");
            fallback
        }
    }
}

/// The neutral default row color.
pub fn default_row_color() -> Rgb {
    // Constant input, cannot fail.
    Rgb::from_hex(DEFAULT_ROW_COLOR).unwrap_or(Rgb::new(0xe5, 0xe7, 0xeb))
}

/// Shade a hex string. A malformed color is replaced by the default row
/// color before shading.
pub fn shade_hex(hex: &str, percent: f64) -> String {
    parse_or(hex, default_row_color()).shade(percent).to_hex()
}
