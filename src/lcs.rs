//! Local coordinate systems for bars.
//!
//! The local x axis of a bar points from its start node to its end node. The
//! remaining axes are fixed by an auxiliary vector: the direction from the start
//! node towards an optional K-point, or, when no usable K-point exists, the first
//! global axis in [`FALLBACK_AXES`] that is not parallel to the bar.

use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::config::LcsSettings;
use crate::errors::LcsError;
use crate::frame::LocalFrame;
use crate::geometry::{cross, distance, dot, normalize, Point};

/// Bars shorter than this have no defined axis.
pub const MIN_BAR_LENGTH: f64 = 1.0e-9;

/// Default tolerance used by [`LocalAxisProvider::is_parallel`].
pub const DEFAULT_PARALLEL_EPSILON: f64 = 1.0e-5;

/// Global X, Y and Z, tried in this order when no K-point is usable.
///
/// A bar along global X therefore always takes global Y as its auxiliary vector.
pub const FALLBACK_AXES: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Computes bar local frames from end points and an optional K-point.
///
/// The provider holds no per-bar state; its only setting is the tolerance used
/// to decide whether two unit vectors are parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalAxisProvider {
    /// Tolerance on `| |a · b| - 1 |` below which unit vectors are parallel.
    parallel_epsilon: f64,
}

impl Default for LocalAxisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAxisProvider {
    /// Create a provider using [`DEFAULT_PARALLEL_EPSILON`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
        }
    }

    /// Create a provider from loaded settings.
    #[must_use]
    pub const fn from_settings(settings: &LcsSettings) -> Self {
        Self {
            parallel_epsilon: settings.parallel_epsilon,
        }
    }

    /// Current settings of this provider.
    #[must_use]
    pub const fn settings(&self) -> LcsSettings {
        LcsSettings {
            parallel_epsilon: self.parallel_epsilon,
        }
    }

    /// Tolerance used by the parallel test.
    #[must_use]
    pub const fn parallel_epsilon(&self) -> f64 {
        self.parallel_epsilon
    }

    /// Replace the tolerance used by the parallel test.
    ///
    /// The value is not validated; see [`LcsSettings::validate`].
    pub fn set_parallel_epsilon(&mut self, eps: f64) {
        self.parallel_epsilon = eps;
    }

    /// Whether two unit vectors are parallel (or anti-parallel) under the
    /// configured tolerance.
    #[must_use]
    pub fn is_parallel(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (dot(a, b).abs() - 1.0).abs() < self.parallel_epsilon
    }

    /// Compute the local frame of the bar running from `start` to `end`.
    ///
    /// `k_point` orients the frame about the bar axis: the local y axis lies in the
    /// plane through the bar and the K-point. A K-point that coincides with `start`
    /// or lies on the bar line is ignored and the global axes are tried instead.
    ///
    /// # Errors
    ///
    /// Returns [`LcsError::DegenerateBar`] when the end points are closer than
    /// [`MIN_BAR_LENGTH`], and [`LcsError::DegenerateBasis`] when no auxiliary
    /// vector is usable (only possible with a very coarse tolerance).
    ///
    /// # Examples
    /// ```
    /// use barframe::{point, LocalAxisProvider};
    /// use nalgebra::Vector3;
    ///
    /// let provider = LocalAxisProvider::new();
    /// let frame = provider
    ///     .compute_lcs(point(0.0, 0.0, 0.0), point(2.0, 0.0, 0.0), None)
    ///     .expect("valid bar");
    /// assert_eq!(frame.x_prime(), Vector3::x());
    /// assert_eq!(frame.y_prime(), Vector3::y());
    /// assert_eq!(frame.z_prime(), Vector3::z());
    /// assert_eq!(frame.origin(), point(1.0, 0.0, 0.0));
    /// ```
    pub fn compute_lcs(
        &self,
        start: Point,
        end: Point,
        k_point: Option<Point>,
    ) -> Result<LocalFrame, LcsError> {
        let (x_prime, bar_length) = normalize(&(end.to_vector() - start.to_vector()));
        if bar_length < MIN_BAR_LENGTH {
            return Err(LcsError::DegenerateBar {
                length: distance(start, end),
            });
        }

        let auxiliary = self.auxiliary_vector(start, &x_prime, k_point)?;

        let (z_prime, z_length) = normalize(&cross(&x_prime, &auxiliary));
        if z_length < MIN_BAR_LENGTH {
            return Err(LcsError::DegenerateBasis {
                axis: [x_prime.x, x_prime.y, x_prime.z],
            });
        }
        let y_prime = cross(&z_prime, &x_prime);

        trace!(
            ?x_prime,
            ?y_prime,
            ?z_prime,
            bar_length,
            "computed bar local frame"
        );
        Ok(LocalFrame::new(
            x_prime,
            y_prime,
            z_prime,
            Point::midpoint(start, end),
        ))
    }

    /// Pick the auxiliary vector: the K-point direction when usable, otherwise the
    /// first fallback axis not parallel to `x_prime`.
    fn auxiliary_vector(
        &self,
        start: Point,
        x_prime: &Vector3<f64>,
        k_point: Option<Point>,
    ) -> Result<Vector3<f64>, LcsError> {
        if let Some(k_point) = k_point {
            let (direction, k_distance) = normalize(&(k_point.to_vector() - start.to_vector()));
            // Non-finite K-points also land here: normalize reports them as zero length.
            if k_distance < MIN_BAR_LENGTH {
                debug!(?k_point, "K-point coincides with bar start, using global axes");
            } else if self.is_parallel(&direction, x_prime) {
                debug!(?k_point, "K-point lies on the bar line, using global axes");
            } else {
                debug!(?k_point, ?direction, "auxiliary vector from K-point");
                return Ok(direction);
            }
        }

        let (index, axis) = FALLBACK_AXES
            .iter()
            .map(|axis| Vector3::from(*axis))
            .enumerate()
            .find(|(_, axis)| !self.is_parallel(axis, x_prime))
            .ok_or(LcsError::DegenerateBasis {
                axis: [x_prime.x, x_prime.y, x_prime.z],
            })?;
        debug!(axis = index, direction = ?axis, "auxiliary vector from global axis");
        Ok(axis)
    }
}
