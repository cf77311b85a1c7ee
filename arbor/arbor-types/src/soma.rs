//! Soma (cell body) representation.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The cell body of a morphology.
///
/// The soma is distinct from the arbors: it is represented by a centroid,
/// a mean radius, and an ordered ring of profile points (the 2D contour
/// traced during reconstruction). The analysis kernels do not process the
/// soma itself; it serves as the anchor for the soma-projected branch
/// intersection tests and as the parent of every root section.
///
/// # Example
///
/// ```
/// use arbor_types::{Point3, Soma};
///
/// let soma = Soma::new(Point3::origin(), 5.0);
/// assert!((soma.mean_radius - 5.0).abs() < f64::EPSILON);
/// assert!(soma.profile_points.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Soma {
    /// Center of the cell body.
    pub centroid: Point3<f64>,

    /// Mean radius of the cell body.
    pub mean_radius: f64,

    /// Ordered contour points around the soma, as reported by the
    /// reconstruction. May be empty.
    pub profile_points: Vec<Point3<f64>>,
}

impl Soma {
    /// Create a soma with no profile points.
    #[inline]
    #[must_use]
    pub const fn new(centroid: Point3<f64>, mean_radius: f64) -> Self {
        Self {
            centroid,
            mean_radius,
            profile_points: Vec::new(),
        }
    }

    /// Set the profile-point ring.
    #[must_use]
    pub fn with_profile_points(mut self, points: Vec<Point3<f64>>) -> Self {
        self.profile_points = points;
        self
    }
}
