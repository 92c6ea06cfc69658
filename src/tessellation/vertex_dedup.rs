use std::collections::HashMap;

use crate::color::Rgba;
use crate::math::{Point3, Vector3};

use super::GeometryBatch;

/// How polygon corners map to mesh vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadingPolicy {
    /// Every corner gets its own vertex: faceted shading.
    Flat,
    /// Corners at the exact same position whose normals lie within
    /// `normal_threshold` (Euclidean distance) of an earlier corner reuse
    /// that corner's vertex.
    Smooth {
        /// Maximum straight-line distance between two normals.
        normal_threshold: f64,
    },
}

/// Bit-exact hash key of a position.
///
/// `-0.0` is folded into `+0.0`; every other value compares by its bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([u64; 3]);

impl PositionKey {
    /// Creates the key of `position`.
    #[must_use]
    pub fn new(position: &Point3) -> Self {
        // `x + 0.0` maps -0.0 to +0.0 and leaves everything else unchanged.
        let bits = |x: f64| (x + 0.0).to_bits();
        Self([bits(position.x), bits(position.y), bits(position.z)])
    }
}

/// A vertex already emitted at some position.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    normal: Vector3,
    index: u32,
}

/// Assigns mesh-vertex indices to polygon corners.
///
/// The lookup table lives for one batch: [`VertexDedup::reset`] must be
/// called whenever the batch it indexes into is flushed.
#[derive(Debug, Clone)]
pub struct VertexDedup {
    policy: ShadingPolicy,
    lookup: HashMap<PositionKey, Vec<Candidate>>,
    reused: usize,
}

impl VertexDedup {
    /// Creates an engine with an empty lookup table.
    #[must_use]
    pub fn new(policy: ShadingPolicy) -> Self {
        Self {
            policy,
            lookup: HashMap::new(),
            reused: 0,
        }
    }

    /// Number of corners that reused an existing vertex since creation.
    #[must_use]
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Returns the index of the vertex for this corner, appending a new
    /// vertex record to `batch` when no existing one matches.
    pub fn emit(
        &mut self,
        batch: &mut GeometryBatch,
        position: Point3,
        normal: Vector3,
        color: Rgba,
    ) -> u32 {
        let ShadingPolicy::Smooth { normal_threshold } = self.policy else {
            return push_vertex(batch, position, normal, color);
        };

        let candidates = self.lookup.entry(PositionKey::new(&position)).or_default();
        if let Some(found) = candidates
            .iter()
            .find(|c| (c.normal - normal).norm() <= normal_threshold)
        {
            self.reused += 1;
            return found.index;
        }

        let index = push_vertex(batch, position, normal, color);
        candidates.push(Candidate { normal, index });
        index
    }

    /// Forgets every emitted vertex.
    pub fn reset(&mut self) {
        self.lookup.clear();
    }
}

// Batch limits are validated to fit `u32`, so only a single polygon with
// billions of corners could overflow the index.
#[allow(clippy::cast_possible_truncation)]
fn push_vertex(batch: &mut GeometryBatch, position: Point3, normal: Vector3, color: Rgba) -> u32 {
    let index = batch.positions.len() as u32;
    batch.positions.push(position);
    batch.normals.push(normal);
    batch.colors.push(color);
    index
}
