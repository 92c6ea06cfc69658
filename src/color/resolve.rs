use crate::csg::{Polygon, Solid};
use crate::error::ColorError;

use super::{Color, Rgba};

/// Picks the display color of a polygon.
///
/// Precedence, first match wins: the polygon's shared-material color, the
/// polygon's own color, the default face color.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver {
    default: Color,
}

impl ColorResolver {
    /// Creates a resolver falling back to `default`.
    #[must_use]
    pub fn new(default: Color) -> Self {
        Self { default }
    }

    /// Creates a resolver whose fallback is parsed from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if `face_color` is not a
    /// 3- or 6-digit hex color.
    pub fn from_hex(face_color: &str) -> Result<Self, ColorError> {
        Color::from_hex(face_color).map(Self::new)
    }

    /// Resolves the color of `polygon`, a member of `solid`.
    #[must_use]
    pub fn resolve(&self, polygon: &Polygon, solid: &Solid) -> Rgba {
        let shared_color = polygon.shared.and_then(|id| match solid.shared(id) {
            Some(shared) => shared.color,
            None => {
                tracing::warn!(?id, "polygon references an unknown shared record");
                None
            }
        });

        shared_color
            .or(polygon.color)
            .unwrap_or(self.default)
            .to_rgba()
    }
}
