use crate::color::Color;

slotmap::new_key_type! {
    /// Unique identifier for a shared-material record in a solid.
    pub struct SharedId;
}

/// Material properties shared by several polygons of one solid.
///
/// Polygons refer to a record through its [`SharedId`]; the record itself
/// lives once in the owning [`Solid`](super::Solid).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedData {
    /// Color applied to every polygon referencing this record.
    pub color: Option<Color>,
}

impl SharedData {
    /// Creates a shared record carrying the given color.
    #[must_use]
    pub fn with_color(color: Color) -> Self {
        Self { color: Some(color) }
    }
}
