//! Converts CSG boundary representations into GPU-ready indexed triangle
//! batches.
//!
//! ```
//! use csg_geometries::csg::Solid;
//! use csg_geometries::math::Point3;
//! use csg_geometries::tessellation::{TessellateSolids, TessellationOptions};
//!
//! let cube = Solid::cube(Point3::origin(), 1.0);
//! let batches = TessellateSolids::new(TessellationOptions::default())
//!     .execute([&cube])
//!     .unwrap();
//! assert_eq!(batches[0][0].positions.len(), 24);
//! assert_eq!(batches[0][0].indices.len(), 12);
//! ```

pub mod color;
pub mod csg;
pub mod error;
pub mod math;
pub mod tessellation;

pub use error::{CsgGeometriesError, Result};
pub use tessellation::{csg_to_geometries, GeometryBatch, TessellateSolids, TessellationOptions};
