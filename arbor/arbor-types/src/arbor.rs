//! Arbors: rooted trees of sections stored in a flat arena.

use crate::{Aabb, Sample, Section, SectionKind, SkeletonBounds, SkeletonTopology};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single rooted tree of [`Section`]s representing one neurite.
///
/// Sections live in a flat arena (`Vec<Section>`) and refer to each other
/// by index; the root is always at index 0. This layout avoids ownership
/// cycles between parents and children and makes in-place repair a matter
/// of mutating vectors by index.
///
/// # Example
///
/// ```
/// use arbor_types::{Arbor, Sample, SectionKind, SkeletonTopology};
///
/// let mut arbor = Arbor::with_root(
///     SectionKind::Axon,
///     vec![
///         Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
///         Sample::from_coords(1, 0.0, 0.0, 10.0, 0.8),
///     ],
/// );
///
/// let child = arbor
///     .add_child(0, vec![Sample::from_coords(0, 0.0, 0.0, 10.0, 0.8)])
///     .unwrap();
///
/// assert_eq!(arbor.section_count(), 2);
/// assert_eq!(arbor.sections[child].branching_order, 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arbor {
    /// Neurite type shared by every section of this arbor.
    pub kind: SectionKind,

    /// Section arena. The root, when present, is at index 0.
    pub sections: Vec<Section>,
}

impl Arbor {
    /// Create an empty arbor.
    #[inline]
    #[must_use]
    pub const fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            sections: Vec::new(),
        }
    }

    /// Create an arbor with a root section holding the given samples.
    #[must_use]
    pub fn with_root(kind: SectionKind, samples: Vec<Sample>) -> Self {
        let mut root = Section::new(0, kind);
        root.samples = samples;
        Self {
            kind,
            sections: vec![root],
        }
    }

    /// Get the root section, if the arbor is non-empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Get the root section mutably.
    #[inline]
    #[must_use]
    pub fn root_mut(&mut self) -> Option<&mut Section> {
        self.sections.first_mut()
    }

    /// Append a child section under `parent`, returning its arena index.
    ///
    /// The child inherits the arbor's kind and gets
    /// `branching_order = parent.branching_order + 1`. The first child
    /// added to a parent is provisionally marked primary;
    /// [`label_primary_children`](Self::label_primary_children) recomputes
    /// the flags from the geometry.
    ///
    /// Returns `None` if `parent` is out of bounds.
    pub fn add_child(&mut self, parent: usize, samples: Vec<Sample>) -> Option<usize> {
        let parent_order = self.sections.get(parent)?.branching_order;
        let is_first_child = self.sections[parent].children.is_empty();

        let index = self.sections.len();
        let mut child = Section::new(index, self.kind);
        child.samples = samples;
        child.parent = Some(parent);
        child.branching_order = parent_order + 1;
        child.is_primary = is_first_child;

        self.sections.push(child);
        self.sections[parent].children.push(index);
        Some(index)
    }

    /// Recompute `is_primary` flags across the whole arbor.
    ///
    /// At each branch point, the child whose initial direction is most
    /// colinear with the parent's terminal direction becomes primary; its
    /// siblings become secondary. Children without a well-defined
    /// direction lose the tie. Roots are always primary.
    pub fn label_primary_children(&mut self) {
        for parent_index in 0..self.sections.len() {
            let children = self.sections[parent_index].children.clone();
            if children.is_empty() {
                continue;
            }

            let parent_direction = self.sections[parent_index].terminal_direction();

            let mut best: Option<(usize, f64)> = None;
            for &child_index in &children {
                self.sections[child_index].is_primary = false;
                let alignment = match (parent_direction, self.sections[child_index].initial_direction())
                {
                    (Some(p), Some(c)) => p.dot(&c),
                    _ => f64::NEG_INFINITY,
                };
                if best.map_or(true, |(_, score)| alignment > score) {
                    best = Some((child_index, alignment));
                }
            }

            if let Some((winner, _)) = best {
                self.sections[winner].is_primary = true;
            }
        }

        if let Some(root) = self.root_mut() {
            root.is_primary = true;
        }
    }

    /// Find the primary child of `parent`, if any.
    #[must_use]
    pub fn primary_child_of(&self, parent: usize) -> Option<usize> {
        self.sections
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.sections.get(child).is_some_and(|s| s.is_primary))
    }
}

impl SkeletonTopology for Arbor {
    #[inline]
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn sample_count(&self) -> usize {
        self.sections.iter().map(Section::sample_count).sum()
    }

    fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

impl SkeletonBounds for Arbor {
    fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for section in &self.sections {
            for sample in &section.samples {
                aabb.expand_to_include_sphere(&sample.position, sample.radius);
            }
        }
        aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(z: f64) -> Sample {
        Sample::from_coords(0, 0.0, 0.0, z, 1.0)
    }

    fn y_shaped_arbor() -> Arbor {
        // Root runs up the z axis, then forks into a straight continuation
        // and a perpendicular branch.
        let mut arbor = Arbor::with_root(
            SectionKind::BasalDendrite,
            vec![sample_at(0.0), sample_at(5.0)],
        );
        arbor.add_child(
            0,
            vec![sample_at(5.0), sample_at(10.0)],
        );
        arbor.add_child(
            0,
            vec![
                Sample::from_coords(0, 0.0, 0.0, 5.0, 1.0),
                Sample::from_coords(1, 0.0, 5.0, 5.0, 1.0),
            ],
        );
        arbor
    }

    #[test]
    fn root_invariants() {
        let arbor = y_shaped_arbor();
        let root = arbor.root().unwrap();
        assert!(root.is_root());
        assert_eq!(root.branching_order, 1);
        assert!(root.is_primary);
    }

    #[test]
    fn child_branching_order() {
        let arbor = y_shaped_arbor();
        for &child in &arbor.root().unwrap().children {
            assert_eq!(arbor.sections[child].branching_order, 2);
            assert_eq!(arbor.sections[child].parent, Some(0));
        }
    }

    #[test]
    fn label_primary_picks_colinear_child() {
        let mut arbor = y_shaped_arbor();
        arbor.label_primary_children();

        // Child 1 continues along +z, child 2 turns along +y.
        assert!(arbor.sections[1].is_primary);
        assert!(!arbor.sections[2].is_primary);
        assert_eq!(arbor.primary_child_of(0), Some(1));
    }

    #[test]
    fn sample_count_sums_sections() {
        let arbor = y_shaped_arbor();
        assert_eq!(arbor.sample_count(), 6);
        assert_eq!(arbor.section_count(), 3);
    }

    #[test]
    fn bounds_include_radii() {
        let arbor = y_shaped_arbor();
        let bounds = arbor.bounds();
        assert!((bounds.min.z - (-1.0)).abs() < f64::EPSILON);
        assert!((bounds.max.z - 11.0).abs() < f64::EPSILON);
        assert!((bounds.max.y - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_arbor() {
        let arbor = Arbor::new(SectionKind::Axon);
        assert!(arbor.is_empty());
        assert!(arbor.root().is_none());
        assert!(arbor.bounds().is_empty());
    }

    #[test]
    fn add_child_rejects_bad_parent() {
        let mut arbor = Arbor::new(SectionKind::Axon);
        assert!(arbor.add_child(0, Vec::new()).is_none());
    }
}
