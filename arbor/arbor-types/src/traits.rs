//! Traits for skeleton containers.

use crate::{Aabb, Section};
use nalgebra::Point3;

/// Trait for types that expose a section arena.
///
/// This is the minimal interface the analysis and repair crates need,
/// allowing algorithms to stay independent of whether they operate on a
/// whole arbor or some other section container.
pub trait SkeletonTopology {
    /// Get the number of sections.
    fn section_count(&self) -> usize;

    /// Get the total number of samples across all sections.
    fn sample_count(&self) -> usize;

    /// Check if the container has no sections.
    fn is_empty(&self) -> bool {
        self.section_count() == 0
    }

    /// Get a section by arena index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn section(&self, index: usize) -> Option<&Section>;

    /// Iterate over all sections in arena order.
    fn sections(&self) -> impl Iterator<Item = &Section>;
}

/// Trait for types that can compute a radius-aware bounding box.
pub trait SkeletonBounds {
    /// Compute the axis-aligned bounding box, accounting for sample radii.
    ///
    /// Returns an empty AABB if there are no samples.
    fn bounds(&self) -> Aabb;

    /// Compute the bounding box, returning `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }

    /// Get the center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
