//! Pre-order traversal combinators.
//!
//! Every higher-level operation (analysis kernels, repair passes,
//! verification sweeps) walks the tree through these combinators, so the
//! visit order is fixed in one place: parent strictly before children,
//! children in insertion order, arbors in apical → basal → axon order when
//! walking a whole morphology.

use crate::{Arbor, Morphology, Section, SectionKind};

/// Apply `op` to every section of an arbor in pre-order.
///
/// Each section is visited exactly once, and always after its parent.
///
/// # Example
///
/// ```
/// use arbor_types::{apply_to_arbor, Arbor, Sample, SectionKind};
///
/// let mut arbor = Arbor::with_root(
///     SectionKind::Axon,
///     vec![Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0)],
/// );
/// arbor.add_child(0, Vec::new());
///
/// let mut visited = Vec::new();
/// apply_to_arbor(&arbor, |section| visited.push(section.id));
/// assert_eq!(visited, vec![0, 1]);
/// ```
pub fn apply_to_arbor<F>(arbor: &Arbor, mut op: F)
where
    F: FnMut(&Section),
{
    if !arbor.sections.is_empty() {
        visit(arbor, 0, &mut op);
    }
}

fn visit<F>(arbor: &Arbor, index: usize, op: &mut F)
where
    F: FnMut(&Section),
{
    let Some(section) = arbor.sections.get(index) else {
        return;
    };
    op(section);
    for &child in &section.children {
        visit(arbor, child, op);
    }
}

/// Apply `op` to every section of an arbor in pre-order, mutably.
///
/// Same visit order as [`apply_to_arbor`]; used by the repair engine,
/// which rewrites samples in place.
pub fn apply_to_arbor_mut<F>(arbor: &mut Arbor, mut op: F)
where
    F: FnMut(&mut Section),
{
    if !arbor.sections.is_empty() {
        visit_mut(arbor, 0, &mut op);
    }
}

fn visit_mut<F>(arbor: &mut Arbor, index: usize, op: &mut F)
where
    F: FnMut(&mut Section),
{
    let Some(section) = arbor.sections.get_mut(index) else {
        return;
    };
    op(section);
    let children = section.children.clone();
    for child in children {
        visit_mut(arbor, child, op);
    }
}

/// Apply `op` to every section of an arbor, handing it a branching-order
/// limit.
///
/// The recursion shape is identical to [`apply_to_arbor`]; the operation
/// itself decides what to do with sections beyond `max_branching_order`
/// (typically: skip them). This keeps "trimmed" analysis a property of the
/// operation rather than of the traversal.
pub fn apply_to_arbor_with_limit<F>(arbor: &Arbor, max_branching_order: u32, mut op: F)
where
    F: FnMut(&Section, u32),
{
    apply_to_arbor(arbor, |section| op(section, max_branching_order));
}

/// Per-neurite-type branching-order limits for morphology-wide walks.
#[derive(Debug, Clone, Copy)]
pub struct BranchOrderLimits {
    /// Maximum order for axonal sections.
    pub axon: u32,
    /// Maximum order for basal dendritic sections.
    pub basal_dendrite: u32,
    /// Maximum order for apical dendritic sections.
    pub apical_dendrite: u32,
}

impl BranchOrderLimits {
    /// No effective limit on any neurite type.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            axon: u32::MAX,
            basal_dendrite: u32::MAX,
            apical_dendrite: u32::MAX,
        }
    }

    /// The limit that applies to a section kind.
    #[must_use]
    pub const fn for_kind(&self, kind: SectionKind) -> u32 {
        match kind {
            SectionKind::Axon => self.axon,
            SectionKind::BasalDendrite => self.basal_dendrite,
            SectionKind::ApicalDendrite => self.apical_dendrite,
        }
    }
}

impl Default for BranchOrderLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Apply `op` to every section of every arbor of a morphology.
///
/// Arbors are walked in a fixed order: apical dendrites, then basal
/// dendrites, then axons; each arbor in pre-order.
pub fn apply_to_morphology<F>(morphology: &Morphology, mut op: F)
where
    F: FnMut(&Section),
{
    for arbor in morphology.arbors() {
        apply_to_arbor(arbor, &mut op);
    }
}

/// Apply `op` across a morphology with per-type branching-order limits.
///
/// As with [`apply_to_arbor_with_limit`], the operation receives the limit
/// that applies to the arbor currently being walked and consults it itself.
pub fn apply_to_morphology_with_limits<F>(
    morphology: &Morphology,
    limits: &BranchOrderLimits,
    mut op: F,
) where
    F: FnMut(&Section, u32),
{
    for arbor in morphology.arbors() {
        let limit = limits.for_kind(arbor.kind);
        apply_to_arbor(arbor, |section| op(section, limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, Soma};
    use nalgebra::Point3;

    fn deep_arbor() -> Arbor {
        // root -> (a -> (c, d), b)
        let mut arbor = Arbor::with_root(
            SectionKind::Axon,
            vec![Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0)],
        );
        let a = arbor.add_child(0, Vec::new()).unwrap();
        let _b = arbor.add_child(0, Vec::new()).unwrap();
        arbor.add_child(a, Vec::new()).unwrap();
        arbor.add_child(a, Vec::new()).unwrap();
        arbor
    }

    #[test]
    fn preorder_visits_each_section_once() {
        let arbor = deep_arbor();
        let mut visited = Vec::new();
        apply_to_arbor(&arbor, |section| visited.push(section.id));

        assert_eq!(visited.len(), arbor.sections.len());
        // Pre-order: root, a, a's children, then b.
        assert_eq!(visited, vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn parent_visited_before_children() {
        let arbor = deep_arbor();
        let mut seen = Vec::new();
        apply_to_arbor(&arbor, |section| {
            if let Some(parent) = section.parent {
                assert!(seen.contains(&parent));
            }
            seen.push(section.id);
        });
    }

    #[test]
    fn mutable_traversal_same_order() {
        let mut arbor = deep_arbor();
        let mut visited = Vec::new();
        apply_to_arbor_mut(&mut arbor, |section| visited.push(section.id));
        assert_eq!(visited, vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn limit_is_forwarded_to_op() {
        let arbor = deep_arbor();
        let mut trimmed = 0;
        apply_to_arbor_with_limit(&arbor, 2, |section, limit| {
            if section.branching_order <= limit {
                trimmed += 1;
            }
        });
        // Root (order 1) and two direct children (order 2).
        assert_eq!(trimmed, 3);
    }

    #[test]
    fn morphology_walk_covers_all_arbors() {
        let mut morphology = Morphology::new(Soma::new(Point3::origin(), 1.0));
        morphology.axons.push(deep_arbor());
        morphology.basal_dendrites.push(Arbor::with_root(
            SectionKind::BasalDendrite,
            vec![Sample::from_coords(0, 1.0, 0.0, 0.0, 1.0)],
        ));

        let mut count = 0;
        apply_to_morphology(&morphology, |_| count += 1);
        assert_eq!(count, 6);
    }

    #[test]
    fn per_kind_limits() {
        let limits = BranchOrderLimits {
            axon: 1,
            basal_dendrite: 5,
            apical_dendrite: 2,
        };
        assert_eq!(limits.for_kind(SectionKind::Axon), 1);
        assert_eq!(limits.for_kind(SectionKind::BasalDendrite), 5);
        assert_eq!(limits.for_kind(SectionKind::ApicalDendrite), 2);

        let unlimited = BranchOrderLimits::default();
        assert_eq!(unlimited.for_kind(SectionKind::Axon), u32::MAX);
    }
}
