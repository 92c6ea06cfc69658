use crate::csg::Solid;
use crate::error::Result;

use super::{BatchSplitter, GeometryBatch, TessellationOptions, ValidatedOptions};

/// Converts CSG solids into GPU-ready [`GeometryBatch`]es.
///
/// Each solid is canonicalized, then its polygons are colored, deduplicated
/// into vertices, fan-triangulated and split into batches, in polygon
/// order. Solids are converted independently of each other.
#[derive(Debug, Clone, Default)]
pub struct TessellateSolids {
    options: TessellationOptions,
}

impl TessellateSolids {
    /// Creates a new `TessellateSolids` operation.
    #[must_use]
    pub fn new(options: TessellationOptions) -> Self {
        Self { options }
    }

    /// Executes the conversion, returning one batch sequence per solid.
    ///
    /// `solids` may be a slice, a `Vec` of references, a single solid via
    /// [`std::iter::once`], or an `Option<&Solid>` where `None` yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid. Options are checked
    /// before any solid is converted.
    pub fn execute<'a, I>(&self, solids: I) -> Result<Vec<Vec<GeometryBatch>>>
    where
        I: IntoIterator<Item = &'a Solid>,
    {
        let options = self.options.validate()?;
        Ok(tessellate_all(solids.into_iter(), &options))
    }
}

#[cfg(not(feature = "parallel"))]
fn tessellate_all<'a>(
    solids: impl Iterator<Item = &'a Solid>,
    options: &ValidatedOptions,
) -> Vec<Vec<GeometryBatch>> {
    solids.map(|solid| tessellate_solid(solid, options)).collect()
}

#[cfg(feature = "parallel")]
fn tessellate_all<'a>(
    solids: impl Iterator<Item = &'a Solid>,
    options: &ValidatedOptions,
) -> Vec<Vec<GeometryBatch>> {
    use rayon::prelude::*;

    let solids: Vec<&Solid> = solids.collect();
    solids
        .par_iter()
        .map(|solid| tessellate_solid(solid, options))
        .collect()
}

/// Converts `solids` with `options`; shorthand for
/// `TessellateSolids::new(options.clone()).execute(solids)`.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn csg_to_geometries<'a, I>(
    solids: I,
    options: &TessellationOptions,
) -> Result<Vec<Vec<GeometryBatch>>>
where
    I: IntoIterator<Item = &'a Solid>,
{
    TessellateSolids::new(options.clone()).execute(solids)
}

fn tessellate_solid(solid: &Solid, options: &ValidatedOptions) -> Vec<GeometryBatch> {
    let canonical = solid.canonicalized();
    let mut splitter = BatchSplitter::new(options.policy, options.max_batch_vertices);

    for (i, polygon) in canonical.polygons().iter().enumerate() {
        if polygon.is_degenerate() {
            tracing::warn!(
                polygon = i,
                corners = polygon.corner_count(),
                "degenerate polygon produces no triangles"
            );
        }
        let color = options.colors.resolve(polygon, &canonical);
        splitter.push_polygon(polygon, color);
    }

    let reused = splitter.reused();
    let batches = splitter.finish();
    tracing::debug!(
        polygons = canonical.polygons().len(),
        batches = batches.len(),
        reused,
        "tessellated solid"
    );
    batches
}
