//! Aggregate morphology statistics.

use arbor_types::{Aabb, Morphology, SkeletonBounds};

use crate::arbor::{
    arbor_length, arbor_surface_area, arbor_volume, maximum_branching_order,
    number_of_bifurcations,
};

/// Summary statistics of a whole morphology.
///
/// Assembled on demand from the per-arbor kernels; nothing here is cached
/// on the tree itself, so the summary is always consistent with the
/// current (possibly repaired) geometry.
///
/// # Example
///
/// ```
/// use arbor_measure::morphology_stats;
/// use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
///
/// let mut morphology = Morphology::new(Soma::new(Point3::origin(), 2.0));
/// morphology.axons.push(Arbor::with_root(
///     SectionKind::Axon,
///     vec![
///         Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
///         Sample::from_coords(1, 0.0, 0.0, 5.0, 1.0),
///     ],
/// ));
///
/// let stats = morphology_stats(&morphology);
/// assert!((stats.total_length - 5.0).abs() < 1e-12);
/// assert_eq!(stats.section_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MorphologyStats {
    /// Sum of all section lengths.
    pub total_length: f64,
    /// Sum of all section surface areas.
    pub total_surface_area: f64,
    /// Sum of all section volumes.
    pub total_volume: f64,
    /// Number of arbors.
    pub arbor_count: usize,
    /// Number of sections across all arbors.
    pub section_count: usize,
    /// Number of samples across all arbors.
    pub sample_count: usize,
    /// Number of bifurcations across all arbors.
    pub bifurcation_count: usize,
    /// Deepest branching order reached by any arbor.
    pub max_branching_order: u32,
    /// Radius-aware bounding box of the whole cell.
    pub bounds: Aabb,
}

impl MorphologyStats {
    /// Mean section length, `0.0` when there are no sections.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision: section counts are far below 2^52
    pub fn mean_section_length(&self) -> f64 {
        if self.section_count == 0 {
            0.0
        } else {
            self.total_length / self.section_count as f64
        }
    }
}

/// Compute summary statistics for a morphology.
#[must_use]
pub fn morphology_stats(morphology: &Morphology) -> MorphologyStats {
    let mut total_length = 0.0;
    let mut total_surface_area = 0.0;
    let mut total_volume = 0.0;
    let mut bifurcation_count = 0;
    let mut max_branching_order = 0;

    for arbor in morphology.arbors() {
        total_length += arbor_length(arbor);
        total_surface_area += arbor_surface_area(arbor);
        total_volume += arbor_volume(arbor);
        bifurcation_count += number_of_bifurcations(arbor);
        max_branching_order = max_branching_order.max(maximum_branching_order(arbor));
    }

    MorphologyStats {
        total_length,
        total_surface_area,
        total_volume,
        arbor_count: morphology.arbor_count(),
        section_count: morphology.section_count(),
        sample_count: morphology.sample_count(),
        bifurcation_count,
        max_branching_order,
        bounds: morphology.bounds(),
    }
}
