/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Grid spacing used when welding nearly coincident positions and normals.
pub const WELD_TOLERANCE: f64 = 1e-5;

/// Integer grid cell of a 3-component value, used as a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey(i64, i64, i64);

/// `2^63`: cell coordinates must stay strictly inside `±GRID_LIMIT`.
const GRID_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl GridKey {
    /// Quantizes `[x, y, z]` onto a grid with the given cell size.
    ///
    /// Returns `None` if any coordinate is NaN or its cell index does not
    /// fit an `i64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn quantize(coords: [f64; 3], cell: f64) -> Option<Self> {
        let q = |x: f64| {
            let cell_index = (x / cell).round();
            (cell_index.abs() < GRID_LIMIT).then_some(cell_index as i64)
        };
        Some(Self(q(coords[0])?, q(coords[1])?, q(coords[2])?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quantize_merges_close_values() {
        let a = GridKey::quantize([1.0, 2.0, 3.0], WELD_TOLERANCE).unwrap();
        let b = GridKey::quantize([1.000_001, 2.0, 3.0], WELD_TOLERANCE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn quantize_separates_distant_values() {
        let a = GridKey::quantize([1.0, 2.0, 3.0], WELD_TOLERANCE).unwrap();
        let b = GridKey::quantize([1.001, 2.0, 3.0], WELD_TOLERANCE).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn quantize_folds_signed_zero() {
        let a = GridKey::quantize([0.0, 0.0, 0.0], WELD_TOLERANCE).unwrap();
        let b = GridKey::quantize([-0.0, -0.0, -0.0], WELD_TOLERANCE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn quantize_rejects_out_of_range_cells() {
        assert!(GridKey::quantize([1e15, 0.0, 0.0], WELD_TOLERANCE).is_none());
        assert!(GridKey::quantize([0.0, -1e15, 0.0], WELD_TOLERANCE).is_none());
        assert!(GridKey::quantize([0.0, 0.0, f64::INFINITY], WELD_TOLERANCE).is_none());
    }

    #[test]
    fn quantize_rejects_nan() {
        assert!(GridKey::quantize([f64::NAN, 0.0, 0.0], WELD_TOLERANCE).is_none());
    }

    #[test]
    fn quantize_accepts_large_in_range_values() {
        let a = GridKey::quantize([1e13, 0.0, 0.0], WELD_TOLERANCE);
        let b = GridKey::quantize([2e13, 0.0, 0.0], WELD_TOLERANCE);
        assert!(a.is_some());
        assert_ne!(a, b);
    }
}
