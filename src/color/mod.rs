mod resolve;

pub use resolve::ColorResolver;

use std::str::FromStr;

use crate::error::ColorError;

/// Resolved color with explicit alpha, channels in `[0, 1]`.
pub type Rgba = [f64; 4];

/// Opaque alpha appended to colors that carry none.
pub const OPAQUE: f64 = 1.0;

/// A face or material color with channels in `[0, 1]`.
///
/// Colors are plain values: resolving a shared-material color to [`Rgba`]
/// produces a fresh array and never touches the stored color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Red, green and blue. Alpha defaults to [`OPAQUE`] on resolution.
    Rgb([f64; 3]),
    /// Red, green, blue and alpha.
    Rgba(Rgba),
}

impl Color {
    /// Creates an opaque-by-default RGB color.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::Rgb([r, g, b])
    }

    /// Creates an RGBA color.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::Rgba([r, g, b, a])
    }

    /// Parses a `#rgb` or `#rrggbb` hex string into a normalized RGB color.
    ///
    /// The leading `#` is optional and digits are case-insensitive. In the
    /// 3-digit form each digit is doubled (`#f60` equals `#ff6600`).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if the string is not 3 or 6
    /// hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidColorFormat(hex.to_owned());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        // A doubled digit `d` reads as `d * 16 + d`.
        let doubled = |i: usize| channel(&digits[i..=i]).map(|d| d * 17);
        let bytes = match digits.len() {
            3 => [doubled(0)?, doubled(1)?, doubled(2)?],
            6 => [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ],
            _ => return Err(invalid()),
        };

        Ok(Self::Rgb(bytes.map(|c| f64::from(c) / 255.0)))
    }

    /// Returns the explicit alpha channel, if any.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        match self {
            Self::Rgb(_) => None,
            Self::Rgba(c) => Some(c[3]),
        }
    }

    /// Returns the color with alpha, appending [`OPAQUE`] to RGB colors.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        match self {
            Self::Rgb([r, g, b]) => [r, g, b, OPAQUE],
            Self::Rgba(c) => c,
        }
    }

    /// Returns the color as 8-bit channels, clamping to `[0, 255]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba_bytes(self) -> [u8; 4] {
        self.to_rgba()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
