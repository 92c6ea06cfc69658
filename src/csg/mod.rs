//! Boundary representation consumed by the tessellator.
//!
//! A [`Solid`] is an ordered list of planar [`Polygon`]s plus an arena of
//! [`SharedData`] records that polygons reference by [`SharedId`].

mod polygon;
mod shared;
mod solid;

pub use polygon::{Polygon, Vertex};
pub use shared::{SharedData, SharedId};
pub use solid::Solid;
