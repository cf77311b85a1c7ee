//! Point-radius samples along a section.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single skeleton sample: a point in 3D space with a radius.
///
/// Samples are the leaves of the morphology data model. A section is an
/// ordered run of samples; a segment is the tapered cylinder (frustum)
/// between two consecutive samples.
///
/// The `id` is local to the owning section. The repair engine inserts
/// auxiliary samples with a provisional `id` of `-1` and reassigns
/// sequential ids afterwards, which is why the field is signed.
///
/// # Example
///
/// ```
/// use arbor_types::{Point3, Sample};
///
/// let s = Sample::new(0, Point3::new(1.0, 2.0, 3.0), 0.5);
/// assert_eq!(s.id, 0);
/// assert!((s.radius - 0.5).abs() < f64::EPSILON);
/// assert!(s.morphology_index.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Section-local sample id. `-1` marks a freshly inserted auxiliary
    /// sample that has not been reindexed yet.
    pub id: i64,

    /// 3D position.
    pub position: Point3<f64>,

    /// Cross-sectional radius at this point. Never negative.
    pub radius: f64,

    /// Morphology-wide index assigned by the index-assignment pass.
    /// `None` until the pass has run.
    pub morphology_index: Option<usize>,
}

impl Sample {
    /// Create a new sample.
    #[inline]
    #[must_use]
    pub const fn new(id: i64, position: Point3<f64>, radius: f64) -> Self {
        Self {
            id,
            position,
            radius,
            morphology_index: None,
        }
    }

    /// Create a sample from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_types::Sample;
    ///
    /// let s = Sample::from_coords(3, 1.0, 2.0, 3.0, 0.25);
    /// assert_eq!(s.id, 3);
    /// assert!((s.position.z - 3.0).abs() < f64::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(id: i64, x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self::new(id, Point3::new(x, y, z), radius)
    }

    /// Euclidean distance to another sample's position.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.position - self.position).norm()
    }

    /// Euclidean distance to an arbitrary point.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        (point - self.position).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_from_coords() {
        let s = Sample::from_coords(7, 1.0, 2.0, 3.0, 0.5);
        assert_eq!(s.id, 7);
        assert!((s.position.x - 1.0).abs() < f64::EPSILON);
        assert!((s.position.y - 2.0).abs() < f64::EPSILON);
        assert!((s.position.z - 3.0).abs() < f64::EPSILON);
        assert!(s.morphology_index.is_none());
    }

    #[test]
    fn sample_distance() {
        let a = Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0);
        let b = Sample::from_coords(1, 3.0, 4.0, 0.0, 1.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn sample_distance_to_point() {
        let s = Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0);
        let p = Point3::new(0.0, 0.0, 2.0);
        assert!((s.distance_to_point(&p) - 2.0).abs() < 1e-12);
    }
}
