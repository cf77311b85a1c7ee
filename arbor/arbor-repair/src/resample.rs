//! Skeleton resampling near branch points.
//!
//! Adjacent branches that leave a bifurcation at a shallow (or almost
//! reversed) angle overlap geometrically once the skeleton is given
//! thickness. The resampling pass removes the samples crowding each
//! section's ends and replaces them with a single corrective sample placed
//! one resampling distance along the branch, keeping neighbouring branches
//! separated without changing the overall geometry.
//!
//! Repair is strictly sequential within an arbor (pre-order, parent before
//! children) because each step depends on the resolved state of the section
//! just processed. Distinct arbors share no state and are repaired in
//! parallel by [`resample_morphology`].

use arbor_types::{Arbor, Morphology, Point3, Sample, Section, SectionKind, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{RepairError, RepairResult};

/// Provisional id carried by a freshly inserted auxiliary sample until the
/// owning section is reindexed.
pub const AUXILIARY_SAMPLE_ID: i64 = -1;

/// Configuration parameters for the resampling pass.
///
/// The defaults are the values the heuristics were tuned with; they are
/// expressed in units of sample radii and radians, not absolute distances,
/// so they hold at any reconstruction scale.
///
/// # Example
///
/// ```
/// use arbor_repair::ResampleParams;
///
/// // Tuned defaults
/// let params = ResampleParams::default();
///
/// // Opt in to secondary-section repair
/// let params = ResampleParams::default().with_repair_secondary_sections(true);
/// assert!(params.repair_secondary_sections);
/// ```
#[derive(Debug, Clone)]
pub struct ResampleParams {
    /// Resampling distance per unit of first-sample radius.
    /// Default: `√2`
    pub radius_factor: f64,

    /// Angle (radians) below which sibling directions count as
    /// near-parallel, a collision risk. Default: 30°
    pub parallel_angle_threshold: f64,

    /// Angle (radians) above which sibling directions count as
    /// near-antiparallel. Default: 150°
    pub antiparallel_angle_threshold: f64,

    /// Safety margin added to the angle-derived secondary resampling
    /// distance. Default: `0.5`
    pub secondary_margin: f64,

    /// Whether secondary (non-primary) child sections are repaired at all.
    /// Present for completeness; off by default because primary-path
    /// repair alone separates the common bifurcation cases.
    /// Default: `false`
    pub repair_secondary_sections: bool,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            radius_factor: std::f64::consts::SQRT_2,
            parallel_angle_threshold: 30.0_f64.to_radians(),
            antiparallel_angle_threshold: 150.0_f64.to_radians(),
            secondary_margin: 0.5,
            repair_secondary_sections: false,
        }
    }
}

impl ResampleParams {
    /// Set the radius factor for the resampling distance.
    #[must_use]
    pub fn with_radius_factor(mut self, factor: f64) -> Self {
        self.radius_factor = factor;
        self
    }

    /// Set the safety margin added to secondary resampling distances.
    #[must_use]
    pub fn with_secondary_margin(mut self, margin: f64) -> Self {
        self.secondary_margin = margin;
        self
    }

    /// Enable or disable secondary-section repair.
    #[must_use]
    pub fn with_repair_secondary_sections(mut self, enabled: bool) -> Self {
        self.repair_secondary_sections = enabled;
        self
    }
}

/// Summary of a single-arbor resampling pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResampleSummary {
    /// Sections visited by the pass.
    pub sections_visited: usize,
    /// Samples removed by extent removal.
    pub samples_removed: usize,
    /// Auxiliary samples inserted.
    pub samples_inserted: usize,
}

impl ResampleSummary {
    /// Check if the pass changed anything.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.samples_removed > 0 || self.samples_inserted > 0
    }

    fn absorb(&mut self, (removed, inserted): (usize, usize)) {
        self.samples_removed += removed;
        self.samples_inserted += inserted;
    }
}

impl std::fmt::Display for ResampleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resample: {} sections visited, {} samples removed, {} inserted",
            self.sections_visited, self.samples_removed, self.samples_inserted
        )
    }
}

/// A per-arbor repair failure inside a morphology-wide pass.
#[derive(Debug)]
pub struct ArborFailure {
    /// Neurite type of the failed arbor.
    pub kind: SectionKind,
    /// Index of the failed arbor within its collection.
    pub arbor_index: usize,
    /// The underlying error.
    pub error: RepairError,
}

/// Summary of a morphology-wide resampling pass.
///
/// Arbors are repaired independently; a failure in one never corrupts the
/// others, so the summary carries both the merged counts of the arbors
/// that succeeded and the list of failures for the caller to act on.
#[derive(Debug, Default)]
pub struct MorphologyResampleSummary {
    /// Number of arbors repaired successfully.
    pub repaired_arbors: usize,
    /// Samples removed across all repaired arbors.
    pub samples_removed: usize,
    /// Auxiliary samples inserted across all repaired arbors.
    pub samples_inserted: usize,
    /// Arbors that could not be repaired.
    pub failures: Vec<ArborFailure>,
}

impl MorphologyResampleSummary {
    /// Check if every arbor was repaired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for MorphologyResampleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resample: {} arbor(s) repaired ({} samples removed, {} inserted), {} failed",
            self.repaired_arbors,
            self.samples_removed,
            self.samples_inserted,
            self.failures.len()
        )
    }
}

/// Remove every sample closer than `extent_radius` to `center`.
///
/// With `keep_first` the leading sample is exempt, which is how the front
/// and ending repairs protect the sample they anchor on. Returns the number
/// of samples removed.
///
/// # Errors
///
/// [`RepairError::UnrepairableSection`] if the section holds at most one
/// sample — removal could leave nothing to rebuild a direction from, so
/// such a section cannot be repaired at all.
pub fn remove_samples_within_extent(
    section: &mut Section,
    center: &Point3<f64>,
    extent_radius: f64,
    keep_first: bool,
) -> RepairResult<usize> {
    if section.sample_count() <= 1 {
        return Err(RepairError::UnrepairableSection {
            section_id: section.id,
            sample_count: section.sample_count(),
        });
    }

    let before = section.samples.len();
    let mut index = 0;
    section.samples.retain(|sample| {
        let keep = (keep_first && index == 0) || sample.distance_to_point(center) >= extent_radius;
        index += 1;
        keep
    });
    Ok(before - section.samples.len())
}

/// The resampling distance of a secondary section leaving a branch point
/// at `angle` (radians) to its primary sibling.
///
/// `radius·factor / tan(angle/2) + margin`: the shallower the angle, the
/// farther along the branch the corrective sample must sit to clear the
/// primary sibling.
///
/// # Example
///
/// ```
/// use arbor_repair::{secondary_resampling_distance, ResampleParams};
///
/// let params = ResampleParams::default();
/// let distance = secondary_resampling_distance(90.0_f64.to_radians(), 1.0, &params);
/// assert!((distance - (2.0_f64.sqrt() + 0.5)).abs() < 1e-12);
/// ```
#[must_use]
pub fn secondary_resampling_distance(angle: f64, radius: f64, params: &ResampleParams) -> f64 {
    radius * params.radius_factor / (angle * 0.5).tan() + params.secondary_margin
}

/// Repair the near (proximal) end of a section.
///
/// Removes every sample but the first within the resampling distance
/// `first.radius · radius_factor`, then inserts one auxiliary sample that
/// distance along the (recomputed) branch direction and reindexes. The
/// first sample itself is never moved.
fn repair_section_front(
    section: &mut Section,
    params: &ResampleParams,
) -> RepairResult<(usize, usize)> {
    let Some(first) = section.first_sample().cloned() else {
        return Err(RepairError::UnrepairableSection {
            section_id: section.id,
            sample_count: 0,
        });
    };

    let distance = first.radius * params.radius_factor;
    let removed = remove_samples_within_extent(section, &first.position, distance, true)?;
    if section.sample_count() < 2 {
        return Err(RepairError::UnrepairableSection {
            section_id: section.id,
            sample_count: section.sample_count(),
        });
    }

    let direction = section
        .initial_direction()
        .ok_or(RepairError::DegenerateDirection {
            section_id: section.id,
        })?;

    let auxiliary = Sample::new(
        AUXILIARY_SAMPLE_ID,
        first.position + direction * distance,
        first.radius,
    );
    section.samples.insert(1, auxiliary);
    section.reindex_samples();

    Ok((removed, 1))
}

/// Repair the far (distal) end of a section.
///
/// Front repair is direction-symmetric, so the ending is cleaned by
/// reversing the sample order, repairing the front, and reversing back.
fn repair_section_ending(
    section: &mut Section,
    params: &ResampleParams,
) -> RepairResult<(usize, usize)> {
    section.reverse_samples();
    let result = repair_section_front(section, params);
    section.reverse_samples();
    section.reindex_samples();
    result
}

/// Repair the near end of a secondary (non-primary) child section.
///
/// When the secondary section leaves the branch point nearly parallel or
/// nearly antiparallel to its primary sibling, its first two samples are
/// pushed away from the sibling before the usual extent removal and
/// auxiliary insertion, using the angle-derived resampling distance.
fn repair_secondary_front(
    section: &mut Section,
    primary_leading: &[Sample],
    primary_direction: &Vector3<f64>,
    params: &ResampleParams,
) -> RepairResult<(usize, usize)> {
    let secondary_direction =
        section
            .initial_direction()
            .ok_or(RepairError::DegenerateDirection {
                section_id: section.id,
            })?;

    let angle = angle_between(primary_direction, &secondary_direction);

    if angle < params.parallel_angle_threshold || angle > params.antiparallel_angle_threshold {
        let push_distance = 2.0 * primary_leading[0].radius;
        let count = section.sample_count().min(2).min(primary_leading.len());
        for index in 0..count {
            let offset = section.samples[index].position - primary_leading[index].position;
            let norm = offset.norm();
            // Coincident branch-point samples have no outward direction.
            if norm > f64::EPSILON {
                section.samples[index].position += (offset / norm) * push_distance;
            }
        }
    }

    let Some(first) = section.first_sample().cloned() else {
        return Err(RepairError::UnrepairableSection {
            section_id: section.id,
            sample_count: 0,
        });
    };

    let distance = secondary_resampling_distance(angle, first.radius, params);
    let removed = remove_samples_within_extent(section, &first.position, distance, true)?;
    if section.sample_count() < 2 {
        return Err(RepairError::UnrepairableSection {
            section_id: section.id,
            sample_count: section.sample_count(),
        });
    }

    let direction = section
        .initial_direction()
        .ok_or(RepairError::DegenerateDirection {
            section_id: section.id,
        })?;

    let auxiliary = Sample::new(
        AUXILIARY_SAMPLE_ID,
        first.position + direction * distance,
        first.radius,
    );
    section.samples.insert(1, auxiliary);
    section.reindex_samples();

    Ok((removed, 1))
}

/// Repair one section and recurse into its children.
fn resample_section(
    arbor: &mut Arbor,
    index: usize,
    params: &ResampleParams,
    summary: &mut ResampleSummary,
) -> RepairResult<()> {
    summary.sections_visited += 1;

    let (is_primary, is_root) = {
        let Some(section) = arbor.sections.get(index) else {
            return Ok(());
        };
        (section.is_primary, section.is_root())
    };

    if is_primary {
        if !is_root {
            summary.absorb(repair_section_front(&mut arbor.sections[index], params)?);
        }
        summary.absorb(repair_section_ending(&mut arbor.sections[index], params)?);
    } else if params.repair_secondary_sections {
        summary.absorb(resample_secondary_section(arbor, index, params)?);
    }

    let children = arbor.sections[index].children.clone();
    for child in children {
        resample_section(arbor, child, params, summary)?;
    }
    Ok(())
}

/// Locate the primary sibling of a secondary section and repair against it.
fn resample_secondary_section(
    arbor: &mut Arbor,
    index: usize,
    params: &ResampleParams,
) -> RepairResult<(usize, usize)> {
    let Some(parent) = arbor.sections[index].parent else {
        return Ok((0, 0));
    };
    let Some(primary) = arbor.primary_child_of(parent) else {
        debug!(section_id = index, "no primary sibling; skipping secondary repair");
        return Ok((0, 0));
    };
    let Some(primary_direction) = arbor.sections[primary].initial_direction() else {
        debug!(
            section_id = index,
            "primary sibling has no direction; skipping secondary repair"
        );
        return Ok((0, 0));
    };
    let primary_leading: Vec<Sample> = arbor.sections[primary]
        .samples
        .iter()
        .take(2)
        .cloned()
        .collect();

    repair_secondary_front(
        &mut arbor.sections[index],
        &primary_leading,
        &primary_direction,
        params,
    )
}

/// Resample an arbor in place: root first, then children, pre-order.
///
/// On success every repaired section holds at least two samples, carries
/// dense sequential sample ids, and has a well-defined leading direction.
///
/// # Errors
///
/// Propagates the first [`RepairError`] hit in the walk; the arbor is left
/// in its partially repaired state for the caller to inspect or discard.
pub fn resample_arbor(arbor: &mut Arbor, params: &ResampleParams) -> RepairResult<ResampleSummary> {
    let mut summary = ResampleSummary::default();
    if arbor.sections.is_empty() {
        return Ok(summary);
    }
    resample_section(arbor, 0, params, &mut summary)?;
    Ok(summary)
}

/// Resample every arbor of a morphology.
///
/// Arbors are independent and repaired in parallel; within each arbor the
/// pass stays strictly sequential. Failures are collected per arbor rather
/// than propagated, so one malformed arbor never blocks the rest of the
/// cell.
pub fn resample_morphology(
    morphology: &mut Morphology,
    params: &ResampleParams,
) -> MorphologyResampleSummary {
    let mut summary = MorphologyResampleSummary::default();
    resample_collection(
        SectionKind::ApicalDendrite,
        &mut morphology.apical_dendrites,
        params,
        &mut summary,
    );
    resample_collection(
        SectionKind::BasalDendrite,
        &mut morphology.basal_dendrites,
        params,
        &mut summary,
    );
    resample_collection(SectionKind::Axon, &mut morphology.axons, params, &mut summary);
    summary
}

fn resample_collection(
    kind: SectionKind,
    arbors: &mut [Arbor],
    params: &ResampleParams,
    summary: &mut MorphologyResampleSummary,
) {
    let outcomes: Vec<(usize, RepairResult<ResampleSummary>)> = arbors
        .par_iter_mut()
        .enumerate()
        .map(|(index, arbor)| (index, resample_arbor(arbor, params)))
        .collect();

    for (arbor_index, outcome) in outcomes {
        match outcome {
            Ok(arbor_summary) => {
                summary.repaired_arbors += 1;
                summary.samples_removed += arbor_summary.samples_removed;
                summary.samples_inserted += arbor_summary.samples_inserted;
            }
            Err(error) => {
                warn!(kind = kind.as_str(), arbor_index, %error, "arbor repair failed");
                summary.failures.push(ArborFailure {
                    kind,
                    arbor_index,
                    error,
                });
            }
        }
    }
}

/// Angle in radians between two unit vectors.
fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arbor_types::Soma;

    fn sample(z: f64, r: f64) -> Sample {
        Sample::from_coords(0, 0.0, 0.0, z, r)
    }

    /// Root along +z with a child whose first samples crowd the branch
    /// point: samples at 10.0 (branch), 10.5, 11.0 are all within the
    /// resampling distance √2 of the branch point.
    fn crowded_arbor() -> Arbor {
        let mut arbor = Arbor::with_root(
            SectionKind::BasalDendrite,
            vec![sample(0.0, 1.0), sample(5.0, 1.0), sample(10.0, 1.0)],
        );
        arbor.add_child(
            0,
            vec![
                sample(10.0, 1.0),
                sample(10.5, 1.0),
                sample(11.0, 1.0),
                sample(20.0, 1.0),
            ],
        );
        arbor.label_primary_children();
        arbor
    }

    #[test]
    fn extent_removal_counts_and_keeps_first() {
        let mut arbor = crowded_arbor();
        let section = &mut arbor.sections[1];
        let center = section.samples[0].position;

        let removed = remove_samples_within_extent(section, &center, 2.0, true).unwrap();
        assert_eq!(removed, 2); // 10.5 and 11.0
        assert_eq!(section.sample_count(), 2);
        assert_relative_eq!(section.samples[0].position.z, 10.0);
        assert_relative_eq!(section.samples[1].position.z, 20.0);
    }

    #[test]
    fn extent_removal_without_keep_first() {
        let mut section = Section::new(0, SectionKind::Axon);
        section.samples = vec![sample(0.0, 1.0), sample(0.5, 1.0), sample(9.0, 1.0)];

        let center = Point3::new(0.0, 0.0, 0.0);
        let removed = remove_samples_within_extent(&mut section, &center, 1.0, false).unwrap();
        assert_eq!(removed, 2); // both leading samples
        assert_eq!(section.sample_count(), 1);
    }

    #[test]
    fn extent_removal_rejects_single_sample_section() {
        let mut section = Section::new(3, SectionKind::Axon);
        section.samples = vec![sample(0.0, 1.0)];

        let err =
            remove_samples_within_extent(&mut section, &Point3::origin(), 1.0, true).unwrap_err();
        assert!(matches!(
            err,
            RepairError::UnrepairableSection {
                section_id: 3,
                sample_count: 1
            }
        ));
    }

    #[test]
    fn front_repair_inserts_auxiliary_sample() {
        let mut arbor = crowded_arbor();
        let (removed, inserted) =
            repair_section_front(&mut arbor.sections[1], &ResampleParams::default()).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(inserted, 1);

        let section = &arbor.sections[1];
        assert_eq!(section.sample_count(), 3);
        // First sample untouched; auxiliary at distance √2 along +z.
        assert_relative_eq!(section.samples[0].position.z, 10.0);
        assert_relative_eq!(
            section.samples[1].position.z,
            10.0 + std::f64::consts::SQRT_2,
            max_relative = 1e-12
        );
        assert_relative_eq!(section.samples[1].radius, 1.0);
        // Ids are dense and sequential after reindexing.
        let ids: Vec<i64> = section.samples.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn front_repair_direction_survives_removal() {
        let mut arbor = crowded_arbor();
        repair_section_front(&mut arbor.sections[1], &ResampleParams::default()).unwrap();
        assert!(arbor.sections[1].initial_direction().is_some());
        assert!(arbor.sections[1].sample_count() >= 2);
    }

    #[test]
    fn ending_repair_cleans_far_end() {
        // Samples crowd the distal end at z ≈ 20.
        let mut section = Section::new(0, SectionKind::Axon);
        section.samples = vec![
            sample(0.0, 1.0),
            sample(19.0, 1.0),
            sample(19.5, 1.0),
            sample(20.0, 1.0),
        ];

        let (removed, inserted) =
            repair_section_ending(&mut section, &ResampleParams::default()).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(inserted, 1);

        // Order restored front-to-back, last sample untouched.
        assert_relative_eq!(section.samples[0].position.z, 0.0);
        let last = section.last_sample().unwrap();
        assert_relative_eq!(last.position.z, 20.0);
        // Auxiliary sits √2 before the ending.
        let auxiliary = &section.samples[section.sample_count() - 2];
        assert_relative_eq!(
            auxiliary.position.z,
            20.0 - std::f64::consts::SQRT_2,
            max_relative = 1e-12
        );
        // Ids ascend front-to-back after the final reindex.
        let ids: Vec<i64> = section.samples.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn resample_arbor_repairs_root_ending_and_child_front() {
        let mut arbor = crowded_arbor();
        let summary = resample_arbor(&mut arbor, &ResampleParams::default()).unwrap();

        assert!(summary.had_changes());
        assert_eq!(summary.sections_visited, 2);
        // Child front repair removed the two crowding samples.
        assert!(summary.samples_removed >= 2);
        // Root ending + child front + child ending each inserted one.
        assert_eq!(summary.samples_inserted, 3);

        for section in &arbor.sections {
            assert!(section.sample_count() >= 2);
            assert!(section.samples.iter().all(|s| s.id != AUXILIARY_SAMPLE_ID));
        }
    }

    #[test]
    fn root_front_is_skipped() {
        let mut arbor = Arbor::with_root(
            SectionKind::Axon,
            vec![sample(0.0, 1.0), sample(0.5, 1.0), sample(30.0, 1.0)],
        );
        let summary = resample_arbor(&mut arbor, &ResampleParams::default()).unwrap();

        // Only the ending was repaired: the crowding sample at 0.5 would
        // have been removed by a front pass, but roots keep their near end.
        let root = arbor.root().unwrap();
        assert_relative_eq!(root.samples[0].position.z, 0.0);
        assert_relative_eq!(root.samples[1].position.z, 0.5);
        assert_eq!(summary.samples_removed, 0);
        assert_eq!(summary.samples_inserted, 1);
    }

    #[test]
    fn single_sample_section_is_unrepairable() {
        let mut arbor = Arbor::with_root(
            SectionKind::Axon,
            vec![sample(0.0, 1.0), sample(10.0, 1.0)],
        );
        arbor.add_child(0, vec![sample(10.0, 1.0)]);
        arbor.label_primary_children();

        let err = resample_arbor(&mut arbor, &ResampleParams::default()).unwrap_err();
        assert!(matches!(err, RepairError::UnrepairableSection { .. }));
    }

    #[test]
    fn coincident_samples_are_degenerate_not_nan() {
        let mut arbor = Arbor::with_root(
            SectionKind::Axon,
            vec![sample(0.0, 1.0), sample(10.0, 1.0)],
        );
        // Child whose surviving samples coincide with its first.
        arbor.add_child(
            0,
            vec![sample(10.0, 1.0), sample(10.0, 1.0), sample(10.0, 1.0)],
        );
        arbor.label_primary_children();

        let err = resample_arbor(&mut arbor, &ResampleParams::default()).unwrap_err();
        // All duplicates sit within the extent, so removal leaves a bare
        // section before any direction can be taken from it.
        assert!(matches!(err, RepairError::UnrepairableSection { .. }));
    }

    #[test]
    fn secondary_resampling_distance_at_right_angle() {
        let params = ResampleParams::default();
        let distance = secondary_resampling_distance(90.0_f64.to_radians(), 1.0, &params);
        assert_relative_eq!(
            distance,
            std::f64::consts::SQRT_2 + 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn secondary_repair_disabled_by_default() {
        let mut arbor = crowded_arbor();
        // Add a secondary sibling crowding the branch point.
        arbor.add_child(
            0,
            vec![
                sample(10.0, 1.0),
                Sample::from_coords(0, 0.2, 0.0, 10.1, 1.0),
                Sample::from_coords(0, 2.0, 0.0, 18.0, 1.0),
            ],
        );
        arbor.label_primary_children();
        let before = arbor.sections[2].samples.clone();

        resample_arbor(&mut arbor, &ResampleParams::default()).unwrap();

        // Secondary section untouched under the default parameters.
        assert_eq!(arbor.sections[2].samples, before);
    }

    #[test]
    fn secondary_repair_pushes_near_parallel_siblings_apart() {
        let mut arbor = Arbor::with_root(
            SectionKind::BasalDendrite,
            vec![sample(0.0, 1.0), sample(10.0, 1.0)],
        );
        // Primary continues along +z.
        arbor.add_child(0, vec![sample(10.0, 1.0), sample(20.0, 1.0)]);
        // Secondary leaves at ~11° to the primary: a collision risk.
        arbor.add_child(
            0,
            vec![
                Sample::from_coords(0, 0.5, 0.0, 10.0, 1.0),
                Sample::from_coords(1, 1.5, 0.0, 15.0, 1.0),
                Sample::from_coords(2, 3.0, 0.0, 25.0, 1.0),
            ],
        );
        arbor.label_primary_children();
        assert!(arbor.sections[1].is_primary);
        assert!(!arbor.sections[2].is_primary);

        let params = ResampleParams::default().with_repair_secondary_sections(true);
        let summary = resample_arbor(&mut arbor, &params).unwrap();
        assert!(summary.had_changes());

        // The secondary's first sample moved away from the primary (+x).
        let secondary_first = &arbor.sections[2].samples[0];
        assert!(secondary_first.position.x > 0.5);
        // An auxiliary sample was rebuilt behind it.
        assert!(arbor.sections[2].sample_count() >= 2);
        assert!(arbor.sections[2]
            .samples
            .iter()
            .all(|s| s.id != AUXILIARY_SAMPLE_ID));
    }

    #[test]
    fn morphology_resample_isolates_failures() {
        let mut morphology = Morphology::new(Soma::new(Point3::origin(), 2.0));

        // A healthy basal dendrite.
        morphology.basal_dendrites.push(crowded_arbor());
        // An unrepairable axon: single-sample child.
        let mut bad = Arbor::with_root(
            SectionKind::Axon,
            vec![sample(0.0, 1.0), sample(10.0, 1.0)],
        );
        bad.add_child(0, vec![sample(10.0, 1.0)]);
        bad.label_primary_children();
        morphology.axons.push(bad);

        let summary = resample_morphology(&mut morphology, &ResampleParams::default());

        assert_eq!(summary.repaired_arbors, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(!summary.is_complete());
        assert_eq!(summary.failures[0].kind, SectionKind::Axon);

        // The healthy arbor was fully repaired despite the failure.
        for section in &morphology.basal_dendrites[0].sections {
            assert!(section.sample_count() >= 2);
        }
    }

    #[test]
    fn repaired_first_and_last_positions_are_preserved() {
        let mut arbor = crowded_arbor();
        let first_before = arbor.sections[1].samples[0].position;
        let last_before = arbor.sections[1].last_sample().unwrap().position;

        resample_arbor(&mut arbor, &ResampleParams::default()).unwrap();

        assert_eq!(arbor.sections[1].samples[0].position, first_before);
        assert_eq!(arbor.sections[1].last_sample().unwrap().position, last_before);
    }

    #[test]
    fn empty_arbor_is_a_noop() {
        let mut arbor = Arbor::new(SectionKind::Axon);
        let summary = resample_arbor(&mut arbor, &ResampleParams::default()).unwrap();
        assert!(!summary.had_changes());
    }

    #[test]
    fn summary_display() {
        let summary = ResampleSummary {
            sections_visited: 4,
            samples_removed: 3,
            samples_inserted: 5,
        };
        let display = format!("{summary}");
        assert!(display.contains("4 sections"));
        assert!(display.contains("3 samples removed"));
    }
}
