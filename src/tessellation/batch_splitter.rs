use crate::color::Rgba;
use crate::csg::Polygon;

use super::{fan_triangles, GeometryBatch, ShadingPolicy, VertexDedup};

/// Accumulates one solid's polygons into size-limited [`GeometryBatch`]es.
///
/// The size check runs after each whole polygon, so a batch may exceed
/// `max_vertices` by the corners of its last polygon but a polygon is never
/// split across batches.
#[derive(Debug)]
pub struct BatchSplitter {
    max_vertices: usize,
    dedup: VertexDedup,
    current: GeometryBatch,
    corners: Vec<u32>,
    batches: Vec<GeometryBatch>,
}

impl BatchSplitter {
    /// Creates a splitter with no accumulated geometry.
    #[must_use]
    pub fn new(policy: ShadingPolicy, max_vertices: usize) -> Self {
        Self {
            max_vertices,
            dedup: VertexDedup::new(policy),
            current: GeometryBatch::default(),
            corners: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Appends a polygon with the given resolved color and returns the
    /// number of triangles it produced.
    pub fn push_polygon(&mut self, polygon: &Polygon, color: Rgba) -> usize {
        self.corners.clear();
        for vertex in &polygon.vertices {
            let index = self
                .dedup
                .emit(&mut self.current, vertex.pos, polygon.normal, color);
            self.corners.push(index);
        }

        let before = self.current.indices.len();
        self.current.indices.extend(fan_triangles(&self.corners));
        let emitted = self.current.indices.len() - before;

        if self.current.positions.len() > self.max_vertices {
            self.flush();
        }
        emitted
    }

    /// Number of corners that reused an existing vertex so far.
    #[must_use]
    pub fn reused(&self) -> usize {
        self.dedup.reused()
    }

    /// Flushes any remaining geometry and returns every batch in order.
    #[must_use]
    pub fn finish(mut self) -> Vec<GeometryBatch> {
        self.flush();
        self.batches
    }

    fn flush(&mut self) {
        self.dedup.reset();
        if self.current.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.current);
        tracing::debug!(
            batch = self.batches.len(),
            vertices = batch.vertex_count(),
            triangles = batch.triangle_count(),
            "flushed geometry batch"
        );
        self.batches.push(batch);
    }
}
