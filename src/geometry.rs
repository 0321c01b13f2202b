//! Fundamental geometric types and vector primitives for bar modelling.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Vectors shorter than this cannot be normalised.
pub const MIN_LENGTH: f64 = 1.0e-9;

/// Position in three dimensional space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Componentwise midpoint `(a + b) / 2` of two points.
    ///
    /// # Examples
    /// ```
    /// use barframe::{point, Point};
    ///
    /// let mid = Point::midpoint(point(0.0, 0.0, 0.0), point(2.0, 4.0, -6.0));
    /// assert_eq!(mid, point(1.0, 2.0, -3.0));
    /// ```
    #[must_use]
    pub fn midpoint(a: Self, b: Self) -> Self {
        Self::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use barframe::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Euclidean norm of `v`. Zero for the zero vector.
#[must_use]
pub fn length(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Normalise `v`, returning the unit vector together with the original length.
///
/// When `v` is shorter than [`MIN_LENGTH`], or has a non-finite length, the zero
/// vector and a length of `0.0` are returned instead. Callers must check the
/// length rather than the vector.
///
/// # Examples
/// ```
/// use barframe::geometry::normalize;
/// use nalgebra::Vector3;
///
/// let (unit, len) = normalize(&Vector3::new(0.0, 3.0, 4.0));
/// assert_eq!(len, 5.0);
/// assert_eq!(unit, Vector3::new(0.0, 0.6, 0.8));
///
/// let (zero, len) = normalize(&Vector3::new(0.0, 0.0, 1.0e-12));
/// assert_eq!(len, 0.0);
/// assert_eq!(zero, Vector3::zeros());
/// ```
#[must_use]
pub fn normalize(v: &Vector3<f64>) -> (Vector3<f64>, f64) {
    let len = length(v);
    if !len.is_finite() || len < MIN_LENGTH {
        (Vector3::zeros(), 0.0)
    } else {
        (v / len, len)
    }
}

/// Right-handed cross product `a × b`.
#[must_use]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Scalar product of `a` and `b`.
#[must_use]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    length(&(b.to_vector() - a.to_vector()))
}
