//! Orthonormal local frames attached to bars.

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::geometry::{cross, dot, Point};

/// Right-handed orthonormal triad and origin describing a bar's local axes.
///
/// `x_prime` runs along the bar from its start to its end node, `z_prime` is
/// `x_prime × auxiliary` and `y_prime` completes the basis as `z_prime × x_prime`.
/// Frames are produced by [`LocalAxisProvider`](crate::LocalAxisProvider) and are
/// never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LocalFrame {
    /// Unit vector along the bar axis.
    x_prime: Vector3<f64>,
    /// Unit vector completing the right-handed basis.
    y_prime: Vector3<f64>,
    /// Unit vector normal to the bar axis and the auxiliary vector.
    z_prime: Vector3<f64>,
    /// Midpoint of the bar.
    origin: Point,
}

impl LocalFrame {
    /// Assemble a frame from already orthonormal axes.
    pub(crate) fn new(
        x_prime: Vector3<f64>,
        y_prime: Vector3<f64>,
        z_prime: Vector3<f64>,
        origin: Point,
    ) -> Self {
        Self {
            x_prime,
            y_prime,
            z_prime,
            origin,
        }
    }

    /// Local x axis (along the bar).
    #[must_use]
    pub fn x_prime(&self) -> Vector3<f64> {
        self.x_prime
    }

    /// Local y axis.
    #[must_use]
    pub fn y_prime(&self) -> Vector3<f64> {
        self.y_prime
    }

    /// Local z axis.
    #[must_use]
    pub fn z_prime(&self) -> Vector3<f64> {
        self.z_prime
    }

    /// Origin of the frame, the bar midpoint.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Rotation taking local components to global components.
    ///
    /// The columns are `x_prime`, `y_prime` and `z_prime`.
    #[must_use]
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.x_prime, self.y_prime, self.z_prime])
    }

    /// Express a global point in the coordinates of this frame.
    ///
    /// # Examples
    /// ```
    /// use barframe::{point, LocalAxisProvider};
    ///
    /// let provider = LocalAxisProvider::new();
    /// let frame = provider
    ///     .compute_lcs(point(0.0, 0.0, 0.0), point(0.0, 2.0, 0.0), None)
    ///     .expect("valid bar");
    /// let local = frame.to_local(point(0.0, 2.0, 0.0));
    /// assert!((local.x - 1.0).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn to_local(&self, global: Point) -> Point {
        let relative = global.to_vector() - self.origin.to_vector();
        Point::new(
            dot(&relative, &self.x_prime),
            dot(&relative, &self.y_prime),
            dot(&relative, &self.z_prime),
        )
    }

    /// Map local frame coordinates back to a global point.
    #[must_use]
    pub fn to_global(&self, local: Point) -> Point {
        Point::from(self.origin.to_vector() + self.rotation_matrix() * local.to_vector())
    }

    /// Check that the axes are unit length, pairwise orthogonal and right-handed
    /// within `tolerance`.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.x_prime, self.y_prime, self.z_prime];
        let unit = axes.iter().all(|axis| (axis.norm() - 1.0).abs() <= tolerance);
        let orthogonal = dot(&self.x_prime, &self.y_prime).abs() <= tolerance
            && dot(&self.y_prime, &self.z_prime).abs() <= tolerance
            && dot(&self.x_prime, &self.z_prime).abs() <= tolerance;
        let right_handed = (cross(&self.x_prime, &self.y_prime) - self.z_prime)
            .iter()
            .all(|component| component.abs() <= tolerance);
        unit && orthogonal && right_handed
    }
}
