//! Whole-cell morphology: a soma plus its arbor collections.

use crate::{
    apply_to_arbor_mut, Aabb, Arbor, Section, SkeletonBounds, SkeletonTopology, Soma,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Morphology-wide index reserved for the soma.
///
/// Sample numbering is 1-based so the assigned indices line up with the
/// index/parent semantics expected by SWC-style exporters, where the soma
/// sample conventionally comes first.
pub const SOMA_MORPHOLOGY_INDEX: usize = 1;

/// A complete reconstructed cell: a [`Soma`] plus axonal, basal dendritic
/// and apical dendritic arbors.
///
/// Built once by a loader, repaired in place by the repair engine, and
/// replaced wholesale when a new morphology is loaded. Bounding boxes and
/// aggregate statistics are computed on demand rather than cached.
///
/// # Example
///
/// ```
/// use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
///
/// let mut morphology = Morphology::new(Soma::new(Point3::origin(), 5.0));
/// morphology.axons.push(Arbor::with_root(
///     SectionKind::Axon,
///     vec![Sample::from_coords(0, 0.0, 0.0, 6.0, 1.0)],
/// ));
///
/// assert_eq!(morphology.arbor_count(), 1);
/// assert_eq!(morphology.sample_count(), 1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Morphology {
    /// The cell body.
    pub soma: Soma,

    /// Axonal arbors.
    pub axons: Vec<Arbor>,

    /// Basal dendritic arbors.
    pub basal_dendrites: Vec<Arbor>,

    /// Apical dendritic arbors.
    pub apical_dendrites: Vec<Arbor>,
}

impl Morphology {
    /// Create a morphology with no arbors.
    #[inline]
    #[must_use]
    pub const fn new(soma: Soma) -> Self {
        Self {
            soma,
            axons: Vec::new(),
            basal_dendrites: Vec::new(),
            apical_dendrites: Vec::new(),
        }
    }

    /// Iterate over all arbors in the canonical walk order:
    /// apical dendrites, basal dendrites, axons.
    pub fn arbors(&self) -> impl Iterator<Item = &Arbor> {
        self.apical_dendrites
            .iter()
            .chain(self.basal_dendrites.iter())
            .chain(self.axons.iter())
    }

    /// Iterate over all arbors mutably, in the canonical walk order.
    pub fn arbors_mut(&mut self) -> impl Iterator<Item = &mut Arbor> {
        self.apical_dendrites
            .iter_mut()
            .chain(self.basal_dendrites.iter_mut())
            .chain(self.axons.iter_mut())
    }

    /// Total number of arbors.
    #[must_use]
    pub fn arbor_count(&self) -> usize {
        self.apical_dendrites.len() + self.basal_dendrites.len() + self.axons.len()
    }

    /// Total number of sections across all arbors.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.arbors().map(SkeletonTopology::section_count).sum()
    }

    /// Total number of samples across all arbors (excluding the soma).
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.arbors().map(SkeletonTopology::sample_count).sum()
    }

    /// Assign a morphology-wide index to every sample.
    ///
    /// The soma takes [`SOMA_MORPHOLOGY_INDEX`]; arbor samples are then
    /// numbered monotonically, walking apical dendrites, basal dendrites
    /// and axons in depth-first pre-order. Exporters rely on this
    /// numbering together with [`parent_sample_index`] to emit a valid
    /// tree-structured sample file.
    ///
    /// Returns the highest index assigned.
    pub fn assign_morphology_indices(&mut self) -> usize {
        let mut next = SOMA_MORPHOLOGY_INDEX + 1;
        for arbor in self.arbors_mut() {
            apply_to_arbor_mut(arbor, |section| {
                for sample in &mut section.samples {
                    sample.morphology_index = Some(next);
                    next += 1;
                }
            });
        }
        next - 1
    }
}

/// Resolve the parent index of a sample under SWC-style semantics.
///
/// Within a section, a sample's parent is the preceding sample. The first
/// sample of a non-root section attaches to its parent section's last
/// sample; the first sample of a root section attaches to the soma
/// ([`SOMA_MORPHOLOGY_INDEX`]).
///
/// Returns `None` when the relevant sample has no assigned
/// `morphology_index` yet (run
/// [`Morphology::assign_morphology_indices`] first), or when
/// `sample_position` is out of bounds.
#[must_use]
pub fn parent_sample_index(
    arbor: &Arbor,
    section: &Section,
    sample_position: usize,
) -> Option<usize> {
    if sample_position >= section.samples.len() {
        return None;
    }
    if sample_position > 0 {
        return section.samples[sample_position - 1].morphology_index;
    }
    match section.parent {
        Some(parent) => arbor
            .sections
            .get(parent)?
            .last_sample()?
            .morphology_index,
        None => Some(SOMA_MORPHOLOGY_INDEX),
    }
}

impl SkeletonBounds for Morphology {
    fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        aabb.expand_to_include_sphere(&self.soma.centroid, self.soma.mean_radius);
        for point in &self.soma.profile_points {
            aabb.expand_to_include(point);
        }
        for arbor in self.arbors() {
            aabb = aabb.union(&arbor.bounds());
        }
        aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, SectionKind};
    use nalgebra::Point3;

    fn two_arbor_morphology() -> Morphology {
        let mut morphology = Morphology::new(Soma::new(Point3::origin(), 2.0));

        let mut apical = Arbor::with_root(
            SectionKind::ApicalDendrite,
            vec![
                Sample::from_coords(0, 0.0, 0.0, 2.0, 1.0),
                Sample::from_coords(1, 0.0, 0.0, 6.0, 1.0),
            ],
        );
        apical.add_child(
            0,
            vec![
                Sample::from_coords(0, 0.0, 0.0, 6.0, 1.0),
                Sample::from_coords(1, 0.0, 2.0, 8.0, 0.5),
            ],
        );
        morphology.apical_dendrites.push(apical);

        morphology.axons.push(Arbor::with_root(
            SectionKind::Axon,
            vec![
                Sample::from_coords(0, 0.0, 0.0, -2.0, 0.5),
                Sample::from_coords(1, 0.0, 0.0, -9.0, 0.5),
            ],
        ));

        morphology
    }

    #[test]
    fn counts() {
        let morphology = two_arbor_morphology();
        assert_eq!(morphology.arbor_count(), 2);
        assert_eq!(morphology.section_count(), 3);
        assert_eq!(morphology.sample_count(), 6);
    }

    #[test]
    fn index_assignment_is_monotonic_and_dense() {
        let mut morphology = two_arbor_morphology();
        let last = morphology.assign_morphology_indices();

        // Soma is 1; six samples follow.
        assert_eq!(last, 7);

        let mut indices = Vec::new();
        for arbor in morphology.arbors() {
            crate::apply_to_arbor(arbor, |section| {
                for sample in &section.samples {
                    indices.push(sample.morphology_index.unwrap());
                }
            });
        }
        assert_eq!(indices, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn parent_indices_follow_swc_semantics() {
        let mut morphology = two_arbor_morphology();
        morphology.assign_morphology_indices();

        let apical = &morphology.apical_dendrites[0];
        let root = &apical.sections[0];
        let child = &apical.sections[1];

        // Root's first sample attaches to the soma.
        assert_eq!(parent_sample_index(apical, root, 0), Some(SOMA_MORPHOLOGY_INDEX));
        // Within a section, the parent is the previous sample.
        assert_eq!(parent_sample_index(apical, root, 1), Some(2));
        // A child's first sample attaches to the parent's last sample.
        assert_eq!(parent_sample_index(apical, child, 0), Some(3));
        // Out of bounds.
        assert_eq!(parent_sample_index(apical, root, 2), None);
    }

    #[test]
    fn bounds_cover_soma_and_arbors() {
        let morphology = two_arbor_morphology();
        let bounds = morphology.bounds();

        // Soma sphere reaches -2 on z; axon tip reaches -9.5 with radius.
        assert!((bounds.min.z - (-9.5)).abs() < f64::EPSILON);
        // Apical tip at z=8 with radius 0.5.
        assert!((bounds.max.z - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_morphology_bounds_cover_soma() {
        let morphology = Morphology::new(Soma::new(Point3::new(1.0, 0.0, 0.0), 3.0));
        let bounds = morphology.bounds();
        assert!((bounds.min.x - (-2.0)).abs() < f64::EPSILON);
        assert!((bounds.max.x - 4.0).abs() < f64::EPSILON);
    }
}
