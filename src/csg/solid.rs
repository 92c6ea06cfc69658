use std::borrow::Cow;
use std::collections::HashMap;

use slotmap::SlotMap;

use crate::math::{GridKey, Point3, Vector3, WELD_TOLERANCE};

use super::{Polygon, SharedData, SharedId, Vertex};

/// Corner bit patterns and normals of the six cube faces.
///
/// Bit 0 selects +x, bit 1 selects +y, bit 2 selects +z.
const CUBE_FACES: [([usize; 4], [f64; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

/// A CSG solid: an ordered set of planar polygons and the shared-material
/// records they reference.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    polygons: Vec<Polygon>,
    shared: SlotMap<SharedId, SharedData>,
    canonical: bool,
}

impl Solid {
    /// Creates a new, empty solid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solid from polygons that reference no shared records.
    #[must_use]
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            ..Self::default()
        }
    }

    /// Creates an axis-aligned cube centered at `center` with half-size
    /// `radius`, one quad per face.
    #[must_use]
    pub fn cube(center: Point3, radius: f64) -> Self {
        Self::cuboid(center, Vector3::repeat(radius))
    }

    /// Creates an axis-aligned box centered at `center` with the given
    /// half-extents, one quad per face.
    #[must_use]
    pub fn cuboid(center: Point3, radius: Vector3) -> Self {
        let sign = |i: usize, bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
        let polygons = CUBE_FACES
            .iter()
            .map(|(corners, normal)| Polygon {
                vertices: corners
                    .iter()
                    .map(|&i| {
                        Vertex::new(Point3::new(
                            center.x + radius.x * sign(i, 1),
                            center.y + radius.y * sign(i, 2),
                            center.z + radius.z * sign(i, 4),
                        ))
                    })
                    .collect(),
                normal: Vector3::from(*normal),
                shared: None,
                color: None,
            })
            .collect();
        Self::from_polygons(polygons)
    }

    // --- Shared-material operations ---

    /// Inserts a shared-material record and returns its ID.
    pub fn add_shared(&mut self, data: SharedData) -> SharedId {
        self.shared.insert(data)
    }

    /// Returns the shared-material record, or `None` if the ID is unknown.
    #[must_use]
    pub fn shared(&self, id: SharedId) -> Option<&SharedData> {
        self.shared.get(id)
    }

    /// Returns a mutable reference to the shared-material record.
    pub fn shared_mut(&mut self, id: SharedId) -> Option<&mut SharedData> {
        self.shared.get_mut(id)
    }

    // --- Polygon operations ---

    /// Appends a polygon. The solid is no longer considered canonical.
    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
        self.canonical = false;
    }

    /// Returns the polygons in iteration order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns `true` if the solid has no polygons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns `true` if the solid was produced by [`Solid::canonicalized`].
    #[must_use]
    pub fn is_canonicalized(&self) -> bool {
        self.canonical
    }

    /// Returns a canonical copy of this solid.
    ///
    /// Corner positions and plane normals falling into the same
    /// [`WELD_TOLERANCE`] grid cell are replaced by the first value seen in
    /// that cell, so coincident corners of adjoining polygons become
    /// bit-identical. Polygon order, colors and shared records are kept.
    /// An already canonical solid is returned borrowed.
    #[must_use]
    pub fn canonicalized(&self) -> Cow<'_, Self> {
        if self.canonical {
            return Cow::Borrowed(self);
        }

        let mut positions = Weld::default();
        let mut normals = Weld::default();
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| Polygon {
                vertices: polygon
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(Point3::from(positions.weld([v.pos.x, v.pos.y, v.pos.z]))))
                    .collect(),
                normal: Vector3::from(normals.weld([
                    polygon.normal.x,
                    polygon.normal.y,
                    polygon.normal.z,
                ])),
                shared: polygon.shared,
                color: polygon.color,
            })
            .collect();

        Cow::Owned(Self {
            polygons,
            shared: self.shared.clone(),
            canonical: true,
        })
    }
}

/// Maps grid cells to the first value that landed in them.
#[derive(Default)]
struct Weld {
    cells: HashMap<GridKey, [f64; 3]>,
}

impl Weld {
    /// Values without a representable grid cell are returned unchanged.
    fn weld(&mut self, value: [f64; 3]) -> [f64; 3] {
        match GridKey::quantize(value, WELD_TOLERANCE) {
            Some(key) => *self.cells.entry(key).or_insert(value),
            None => value,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn cube_has_six_outward_quads() {
        let cube = Solid::cube(Point3::origin(), 1.0);
        assert_eq!(cube.polygons().len(), 6);
        for polygon in cube.polygons() {
            assert_eq!(polygon.corner_count(), 4);
            let centroid = polygon
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / 4.0;
            // Face centroid of a unit cube lies one unit along its normal.
            assert!((centroid - polygon.normal).norm() < 1e-12);
        }
    }

    #[test]
    fn cube_winding_matches_normals() {
        let cube = Solid::cube(Point3::new(2.0, -1.0, 0.5), 0.5);
        for polygon in cube.polygons() {
            let pts: Vec<Point3> = polygon.vertices.iter().map(|v| v.pos).collect();
            let derived = Polygon::from_points(&pts).unwrap();
            assert!((derived.normal - polygon.normal).norm() < 1e-12);
        }
    }

    #[test]
    fn shared_records_are_looked_up_by_id() {
        let mut solid = Solid::new();
        let id = solid.add_shared(SharedData::with_color(Color::rgb(0.0, 1.0, 0.0)));
        assert_eq!(solid.shared(id).unwrap().color, Some(Color::rgb(0.0, 1.0, 0.0)));

        solid.shared_mut(id).unwrap().color = None;
        assert_eq!(solid.shared(id).unwrap().color, None);
    }

    #[test]
    fn canonicalized_welds_nearly_coincident_corners() {
        let a = Polygon::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        let b = Polygon::from_points(&[
            Point3::new(1.000_000_001, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        let solid = Solid::from_polygons(vec![a, b]);

        let canonical = solid.canonicalized();
        let polys = canonical.polygons();
        assert_eq!(polys[0].vertices[1].pos, polys[1].vertices[0].pos);
        assert_eq!(polys[0].vertices[1].pos, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(polys[0].normal, polys[1].normal);
    }

    #[test]
    fn canonicalized_keeps_order_and_colors() {
        let mut solid = Solid::cube(Point3::origin(), 1.0);
        let shared = solid.add_shared(SharedData::with_color(Color::rgb(1.0, 0.0, 0.0)));
        let extra = Polygon::from_points(&[
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(5.0, 1.0, 0.0),
        ])
        .unwrap()
        .with_shared(shared)
        .with_color(Color::rgb(0.0, 0.0, 1.0));
        solid.add_polygon(extra.clone());

        let canonical = solid.canonicalized();
        assert_eq!(canonical.polygons().len(), 7);
        assert_eq!(canonical.polygons()[6], extra);
        assert!(canonical.shared(shared).is_some());
    }

    #[test]
    fn canonicalized_leaves_far_away_corners_in_place() {
        let near = Polygon::from_points(&[
            Point3::new(1e15, 0.0, 0.0),
            Point3::new(1e15, 1.0, 0.0),
            Point3::new(1e15, 0.0, 1.0),
        ])
        .unwrap();
        let far = Polygon::from_points(&[
            Point3::new(2e15, 0.0, 0.0),
            Point3::new(2e15, 1.0, 0.0),
            Point3::new(2e15, 0.0, 1.0),
        ])
        .unwrap();
        let solid = Solid::from_polygons(vec![near.clone(), far.clone()]);

        let canonical = solid.canonicalized();
        assert_eq!(canonical.polygons()[0].vertices, near.vertices);
        assert_eq!(canonical.polygons()[1].vertices, far.vertices);
    }

    #[test]
    fn canonicalized_does_not_weld_nan_onto_origin() {
        let origin = Polygon::new(vec![Vertex::new(Point3::origin())], Vector3::z()).unwrap();
        let broken = Polygon::new(
            vec![Vertex::new(Point3::new(f64::NAN, 0.0, 0.0))],
            Vector3::z(),
        )
        .unwrap();
        let solid = Solid::from_polygons(vec![origin, broken]);

        let canonical = solid.canonicalized();
        assert!(canonical.polygons()[1].vertices[0].pos.x.is_nan());
    }

    #[test]
    fn is_empty_tracks_polygons() {
        let mut solid = Solid::new();
        assert!(solid.is_empty());
        solid.add_polygon(Solid::cube(Point3::origin(), 1.0).polygons()[0].clone());
        assert!(!solid.is_empty());
    }

    #[test]
    fn canonical_solid_is_borrowed() {
        let solid = Solid::cube(Point3::origin(), 1.0);
        let canonical = solid.canonicalized().into_owned();
        assert!(canonical.is_canonicalized());
        assert!(matches!(canonical.canonicalized(), Cow::Borrowed(_)));
    }

    #[test]
    fn add_polygon_clears_canonical_flag() {
        let mut solid = Solid::cube(Point3::origin(), 1.0).canonicalized().into_owned();
        let first = solid.polygons()[0].clone();
        solid.add_polygon(first);
        assert!(!solid.is_canonicalized());
    }
}
