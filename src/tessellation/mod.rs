mod batch_splitter;
mod fan;
mod tessellate_solids;
mod vertex_dedup;

pub use batch_splitter::BatchSplitter;
pub use fan::fan_triangles;
pub use tessellate_solids::{csg_to_geometries, TessellateSolids};
pub use vertex_dedup::{PositionKey, ShadingPolicy, VertexDedup};

use crate::color::{ColorResolver, Rgba};
use crate::error::{OptionsError, Result};
use crate::math::{Point3, Vector3};

/// Default Euclidean distance below which two normals at one position are
/// merged in smooth shading. Roughly the chord of a 20 degree arc, but it is
/// compared as a straight-line distance, not as an angle.
pub const DEFAULT_NORMAL_THRESHOLD: f64 = 0.349_066;

/// Default fallback face color.
pub const DEFAULT_FACE_COLOR: &str = "#ff6600";

/// Default vertex count after which a batch is flushed.
pub const DEFAULT_MAX_BATCH_VERTICES: usize = 65_000;

/// Options controlling CSG to geometry conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct TessellationOptions {
    /// Share vertices between adjoining faces with similar normals.
    pub smooth_lighting: bool,
    /// Maximum Euclidean distance between normals that still merge.
    /// Only used when `smooth_lighting` is set.
    pub normal_threshold: f64,
    /// Hex color (`#rgb` or `#rrggbb`) for polygons without a color.
    pub face_color: String,
    /// A batch is flushed once it holds more vertices than this, checked
    /// after each whole polygon. Must be in `1..=u32::MAX`.
    pub max_batch_vertices: usize,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            smooth_lighting: false,
            normal_threshold: DEFAULT_NORMAL_THRESHOLD,
            face_color: DEFAULT_FACE_COLOR.to_owned(),
            max_batch_vertices: DEFAULT_MAX_BATCH_VERTICES,
        }
    }
}

impl TessellationOptions {
    /// Checks the options and parses the face color.
    ///
    /// # Errors
    ///
    /// Returns an error if the face color is not valid hex, the normal
    /// threshold is negative or not finite, or the batch limit is zero or
    /// does not fit a `u32` index.
    pub(crate) fn validate(&self) -> Result<ValidatedOptions> {
        let colors = ColorResolver::from_hex(&self.face_color)?;

        if !self.normal_threshold.is_finite() || self.normal_threshold < 0.0 {
            return Err(OptionsError::InvalidNormalThreshold(self.normal_threshold).into());
        }
        if self.max_batch_vertices == 0 || u32::try_from(self.max_batch_vertices).is_err() {
            return Err(OptionsError::InvalidBatchLimit(self.max_batch_vertices).into());
        }

        let policy = if self.smooth_lighting {
            ShadingPolicy::Smooth {
                normal_threshold: self.normal_threshold,
            }
        } else {
            ShadingPolicy::Flat
        };

        Ok(ValidatedOptions {
            colors,
            policy,
            max_batch_vertices: self.max_batch_vertices,
        })
    }
}

/// Options after validation, shared by every solid of one call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidatedOptions {
    pub colors: ColorResolver,
    pub policy: ShadingPolicy,
    pub max_batch_vertices: usize,
}

/// One GPU-sized chunk of indexed triangles.
///
/// `positions`, `normals` and `colors` always have equal length and every
/// index is smaller than that length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBatch {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Vertex colors.
    pub colors: Vec<Rgba>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl GeometryBatch {
    /// Number of vertex records.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the batch holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if every index fits a 16-bit index buffer.
    #[must_use]
    pub fn fits_u16_indices(&self) -> bool {
        self.positions.len() <= usize::from(u16::MAX) + 1
    }

    /// Positions as a flat `x, y, z` buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Normals as a flat `x, y, z` buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_normals(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }

    /// Colors as a flat `r, g, b, a` buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors
            .iter()
            .flat_map(|c| c.map(|x| x as f32))
            .collect()
    }

    /// Indices as a flat triangle list.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}
