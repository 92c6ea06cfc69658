use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::SharedId;

/// A polygon corner. Corners carry no normal of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The 3D position of the corner.
    pub pos: Point3,
}

impl Vertex {
    /// Creates a corner at the given position.
    #[must_use]
    pub fn new(pos: Point3) -> Self {
        Self { pos }
    }
}

/// A planar polygon of a CSG solid.
///
/// Corners are ordered counter-clockwise when seen from the side the
/// normal points to. Convexity is assumed, not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Ordered corners. Valid polygons have at least three.
    pub vertices: Vec<Vertex>,
    /// Unit normal of the supporting plane.
    pub normal: Vector3,
    /// Optional shared-material record of the owning solid.
    pub shared: Option<SharedId>,
    /// Optional per-polygon color override.
    pub color: Option<Color>,
}

impl Polygon {
    /// Creates a polygon from corners and a plane normal.
    ///
    /// The normal is normalized. Corner count is not validated; polygons
    /// with fewer than three corners produce no triangles when tessellated.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the normal has zero length.
    pub fn new(vertices: Vec<Vertex>, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            vertices,
            normal: normal / len,
            shared: None,
            color: None,
        })
    }

    /// Creates a polygon from corner points, deriving the plane normal from
    /// the first non-collinear corner triple.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than three points are
    /// given or all points are collinear.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let Some((&origin, rest)) = points.split_first() else {
            return Err(GeometryError::Degenerate("polygon has no points".into()).into());
        };

        let normal = rest
            .windows(2)
            .map(|w| (w[0] - origin).cross(&(w[1] - origin)))
            .find(|n| n.norm() >= TOLERANCE)
            .ok_or_else(|| {
                GeometryError::Degenerate("polygon points are collinear".into())
            })?;

        Self::new(points.iter().copied().map(Vertex::new).collect(), normal)
    }

    /// Attaches a shared-material record.
    #[must_use]
    pub fn with_shared(mut self, shared: SharedId) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Attaches a per-polygon color override.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Number of corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the polygon cannot form a triangle.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn new_normalizes_normal() {
        let poly = Polygon::new(Vec::new(), Vector3::new(0.0, 0.0, 5.0)).unwrap();
        assert_relative_eq!(poly.normal, Vector3::z());
    }

    #[test]
    fn new_rejects_zero_normal() {
        assert!(Polygon::new(Vec::new(), Vector3::zeros()).is_err());
    }

    #[test]
    fn from_points_ccw_square_faces_up() {
        let poly = Polygon::from_points(&[
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(poly.normal, Vector3::z(), epsilon = 1e-12);
        assert_eq!(poly.corner_count(), 4);
    }

    #[test]
    fn from_points_skips_leading_collinear_corner() {
        let poly = Polygon::from_points(&[
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 0.0, -1.0),
        ])
        .unwrap();
        assert_relative_eq!(poly.normal, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn from_points_rejects_collinear() {
        let result = Polygon::from_points(&[p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn from_points_rejects_too_few() {
        assert!(Polygon::from_points(&[]).is_err());
        assert!(Polygon::from_points(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn degenerate_below_three_corners() {
        let two = Polygon::new(
            vec![Vertex::new(p(0.0, 0.0, 0.0)), Vertex::new(p(1.0, 0.0, 0.0))],
            Vector3::z(),
        )
        .unwrap();
        assert!(two.is_degenerate());
    }
}
