#![warn(missing_docs)]

//! Math types for the pathtrace acceleration core.
//!
//! Thin wrappers around nalgebra providing the handful of types the
//! ray/primitive code needs: points, vectors, colors, axis selection
//! and tolerance constants.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space. Not necessarily unit length.
pub type Vec3 = Vector3<f64>;

/// A linear RGB color, one channel per component.
pub type Color = Vector3<f64>;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All three axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Coordinate of `p` along this axis.
    #[inline]
    pub fn of(self, p: &Point3) -> f64 {
        p[self.index()]
    }
}

/// Elementwise minimum of two points.
#[inline]
pub fn point_min(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Elementwise maximum of two points.
#[inline]
pub fn point_max(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Tolerance constants for intersection and comparison.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Determinant magnitude below which a ray counts as parallel to a triangle.
    pub parallel: f64,
    /// Linear distance tolerance for comparing query results.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerances (1e-4 for both).
    pub const DEFAULT: Self = Self {
        parallel: 1e-4,
        linear: 1e-4,
    };

    /// Check if a Möller–Trumbore determinant means "parallel".
    #[inline]
    pub fn is_parallel(&self, det: f64) -> bool {
        det.abs() < self.parallel
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two scalars are equal within tolerance.
    pub fn scalars_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_of() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(Axis::X.of(&p), 1.0);
        assert_relative_eq!(Axis::Y.of(&p), 2.0);
        assert_relative_eq!(Axis::Z.of(&p), 3.0);
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_point_min_max() {
        let a = Point3::new(1.0, -2.0, 3.0);
        let b = Point3::new(-1.0, 2.0, 3.5);
        assert_eq!(point_min(&a, &b), Point3::new(-1.0, -2.0, 3.0));
        assert_eq!(point_max(&a, &b), Point3::new(1.0, 2.0, 3.5));
    }

    #[test]
    fn test_point_min_with_infinity() {
        let empty = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let p = Point3::new(4.0, 5.0, 6.0);
        assert_eq!(point_min(&empty, &p), p);
    }

    #[test]
    fn test_tolerance_parallel() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.is_parallel(5e-5));
        assert!(tol.is_parallel(-5e-5));
        assert!(!tol.is_parallel(-4.0));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-6, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
        assert!(tol.scalars_equal(1.5, 1.50001));
    }
}
