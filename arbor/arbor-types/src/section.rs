//! Sections: maximal unbranched runs of samples.

use nalgebra::Vector3;

use crate::Sample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neurite type of a section (and of the arbor that owns it).
///
/// The type is fixed across a whole arbor: every section of an axonal
/// arbor is an `Axon` section, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SectionKind {
    /// Axonal arborization.
    Axon,
    /// Basal dendritic arborization.
    BasalDendrite,
    /// Apical dendritic arborization.
    ApicalDendrite,
}

impl SectionKind {
    /// Get a human-readable name for the section kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Axon => "Axon",
            Self::BasalDendrite => "Basal Dendrite",
            Self::ApicalDendrite => "Apical Dendrite",
        }
    }
}

/// A maximal unbranched run of [`Sample`]s between two branch or terminal
/// points.
///
/// Sections are the nodes of the arbor tree. Parent/child relationships are
/// stored as indices into the owning [`Arbor`](crate::Arbor)'s section
/// arena rather than as live references, so in-place repair (sample
/// insertion, removal, reindexing) is plain vector surgery.
///
/// Invariants maintained by the construction API:
/// - a root section has `parent == None` and `branching_order == 1`;
/// - a child's first sample conceptually coincides with its parent's last
///   sample, and `branching_order == parent.branching_order + 1`;
/// - `children` is acyclic and each section belongs to exactly one arbor.
///
/// # Example
///
/// ```
/// use arbor_types::{Sample, Section, SectionKind};
///
/// let mut section = Section::new(0, SectionKind::Axon);
/// section.samples.push(Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0));
/// section.samples.push(Sample::from_coords(1, 0.0, 0.0, 5.0, 0.8));
///
/// assert_eq!(section.sample_count(), 2);
/// assert_eq!(section.segment_count(), 1);
/// assert!(section.is_root());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    /// Arena index of this section within its arbor.
    pub id: usize,

    /// Ordered samples from the proximal end (closest to the soma) to the
    /// distal end. May be empty for malformed input; the verification
    /// engine reports that as an error.
    pub samples: Vec<Sample>,

    /// Arena index of the parent section, `None` for the root.
    pub parent: Option<usize>,

    /// Arena indices of child sections, in insertion order.
    pub children: Vec<usize>,

    /// Neurite type, inherited from the arbor.
    pub kind: SectionKind,

    /// Depth within the arbor; the root has order 1.
    pub branching_order: u32,

    /// Whether this child continues its parent most colinearly at a
    /// branch point. Roots are primary.
    pub is_primary: bool,
}

impl Section {
    /// Create an empty root-flavored section.
    ///
    /// The caller (normally [`Arbor`](crate::Arbor)) is responsible for
    /// wiring `parent`, `children` and `branching_order`.
    #[must_use]
    pub const fn new(id: usize, kind: SectionKind) -> Self {
        Self {
            id,
            samples: Vec::new(),
            parent: None,
            children: Vec::new(),
            kind,
            branching_order: 1,
            is_primary: true,
        }
    }

    /// Number of samples.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of segments (consecutive sample pairs).
    #[inline]
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    /// The first (proximal) sample, if any.
    #[inline]
    #[must_use]
    pub fn first_sample(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// The last (distal) sample, if any.
    #[inline]
    #[must_use]
    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Whether this section is the root of its arbor.
    #[inline]
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this section has no children (a terminal section).
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over consecutive sample pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Sample, &Sample)> {
        self.samples.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Unit direction from the first sample to the second.
    ///
    /// Returns `None` when the section has fewer than two samples or the
    /// first two samples coincide (no meaningful direction exists).
    #[must_use]
    pub fn initial_direction(&self) -> Option<Vector3<f64>> {
        direction_between(self.samples.first()?, self.samples.get(1)?)
    }

    /// Unit direction from the second-to-last sample to the last.
    ///
    /// Returns `None` under the same conditions as
    /// [`initial_direction`](Self::initial_direction).
    #[must_use]
    pub fn terminal_direction(&self) -> Option<Vector3<f64>> {
        let n = self.samples.len();
        if n < 2 {
            return None;
        }
        direction_between(&self.samples[n - 2], &self.samples[n - 1])
    }

    /// Reverse the sample order in place.
    ///
    /// Sample ids are left untouched; callers reindex afterwards if ids
    /// need to stay sequential.
    pub fn reverse_samples(&mut self) {
        self.samples.reverse();
    }

    /// Assign sequential ids `0..n` to the samples.
    ///
    /// Replaces any provisional ids (`-1`) left behind by auxiliary
    /// sample insertion.
    #[allow(clippy::cast_possible_wrap)]
    // Wrap: sample counts never approach i64::MAX
    pub fn reindex_samples(&mut self) {
        for (index, sample) in self.samples.iter_mut().enumerate() {
            sample.id = index as i64;
        }
    }
}

/// Unit vector from `a` to `b`, or `None` if the points coincide.
fn direction_between(a: &Sample, b: &Sample) -> Option<Vector3<f64>> {
    let delta = b.position - a.position;
    let norm = delta.norm();
    if norm < f64::EPSILON {
        None
    } else {
        Some(delta / norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sample_section() -> Section {
        let mut section = Section::new(0, SectionKind::BasalDendrite);
        section.samples.push(Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0));
        section.samples.push(Sample::from_coords(1, 0.0, 0.0, 3.0, 1.0));
        section.samples.push(Sample::from_coords(2, 0.0, 0.0, 7.0, 1.0));
        section
    }

    #[test]
    fn counts() {
        let section = three_sample_section();
        assert_eq!(section.sample_count(), 3);
        assert_eq!(section.segment_count(), 2);

        let empty = Section::new(0, SectionKind::Axon);
        assert_eq!(empty.sample_count(), 0);
        assert_eq!(empty.segment_count(), 0);
    }

    #[test]
    fn segments_iterate_pairs() {
        let section = three_sample_section();
        let lengths: Vec<f64> = section
            .segments()
            .map(|(a, b)| a.distance_to(b))
            .collect();
        assert_eq!(lengths.len(), 2);
        assert!((lengths[0] - 3.0).abs() < 1e-12);
        assert!((lengths[1] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn initial_direction_along_z() {
        let section = three_sample_section();
        let dir = section.initial_direction().unwrap();
        assert!((dir.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn directions_undefined_for_short_sections() {
        let mut section = Section::new(0, SectionKind::Axon);
        assert!(section.initial_direction().is_none());

        section.samples.push(Sample::from_coords(0, 1.0, 1.0, 1.0, 1.0));
        assert!(section.initial_direction().is_none());
        assert!(section.terminal_direction().is_none());

        // Coincident samples have no direction either.
        section.samples.push(Sample::from_coords(1, 1.0, 1.0, 1.0, 1.0));
        assert!(section.initial_direction().is_none());
    }

    #[test]
    fn reverse_and_reindex() {
        let mut section = three_sample_section();
        section.reverse_samples();
        assert!((section.samples[0].position.z - 7.0).abs() < f64::EPSILON);
        // Ids still in original order until reindexed.
        assert_eq!(section.samples[0].id, 2);

        section.reindex_samples();
        assert_eq!(section.samples[0].id, 0);
        assert_eq!(section.samples[2].id, 2);
    }

    #[test]
    fn kind_names() {
        assert_eq!(SectionKind::Axon.as_str(), "Axon");
        assert_eq!(SectionKind::BasalDendrite.as_str(), "Basal Dendrite");
        assert_eq!(SectionKind::ApicalDendrite.as_str(), "Apical Dendrite");
    }
}
