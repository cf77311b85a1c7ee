//! Structural verification sweeps.
//!
//! Read-only checks over a tree that flag anomalies the loader let
//! through: degenerate sample counts, short sections and segments,
//! radius inversions, duplicate samples, odd child counts, and branches
//! colliding near the soma. Nothing here mutates the tree or fails;
//! the output is a report the caller decides what to do with.

use arbor_measure::{section_length, segment_length};
use arbor_types::{apply_to_arbor, Arbor, Morphology, Section};

use crate::intersect::{
    axon_intersects_apical_dendrite, axon_intersects_dendrites,
    basal_dendrite_intersects_basal_dendrite, dendrite_intersects_apical_dendrite,
    intersecting_profile_point_pairs,
};
use crate::issues::{Issue, IssueKind, IssueSeverity};

/// Options for structural verification.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Distance below which consecutive samples count as duplicates.
    /// Default: `1.0`
    pub duplicate_distance_threshold: f64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            duplicate_distance_threshold: 1.0,
        }
    }
}

impl VerifyOptions {
    /// Set the duplicate-sample distance threshold.
    #[must_use]
    pub const fn with_duplicate_distance_threshold(mut self, threshold: f64) -> Self {
        self.duplicate_distance_threshold = threshold;
        self
    }
}

/// Report of a verification sweep.
///
/// Contains every issue found, ordered by discovery (pre-order within
/// each arbor, arbors in the canonical apical → basal → axon walk).
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    /// All issues found.
    pub issues: Vec<Issue>,
}

impl VerificationReport {
    /// Check if no issues were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of error-level issues.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    /// Number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_warning()).count()
    }

    /// Get a one-line summary of the report.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return "Morphology is structurally sound".to_string();
        }

        let errors = self.error_count();
        let warnings = self.warning_count();
        let info = self.issues.len() - errors - warnings;

        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{errors} error(s)"));
        }
        if warnings > 0 {
            parts.push(format!("{warnings} warning(s)"));
        }
        if info > 0 {
            parts.push(format!("{info} info"));
        }
        format!("Found {}", parts.join(", "))
    }

    fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }
}

impl std::fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for issue in &self.issues {
            write!(f, "  [{}] {}", issue.severity.as_str(), issue.description)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Verify a single arbor.
///
/// Runs every per-section and parent/child check over the tree in
/// pre-order and returns the collected issues.
#[must_use]
pub fn verify_arbor(arbor: &Arbor, options: &VerifyOptions) -> VerificationReport {
    let mut report = VerificationReport::default();

    apply_to_arbor(arbor, |section| {
        check_sample_count(section, &mut report.issues);
        check_section_length(section, &mut report.issues);
        check_segment_lengths(section, &mut report.issues);
        check_duplicate_samples(section, options, &mut report.issues);
        check_children_count(section, &mut report.issues);
        check_branch_radii(arbor, section, &mut report.issues);
    });

    report
}

/// Verify a whole morphology: every arbor plus the soma-projected
/// intersection checks between arbors and between soma profile points.
#[must_use]
pub fn verify_morphology(morphology: &Morphology, options: &VerifyOptions) -> VerificationReport {
    let mut report = VerificationReport::default();

    for arbor in morphology.arbors() {
        report.merge(verify_arbor(arbor, options));
    }

    check_arbor_intersections(morphology, &mut report.issues);
    check_profile_points(morphology, &mut report.issues);

    report
}

fn check_sample_count(section: &Section, issues: &mut Vec<Issue>) {
    let issue = match section.sample_count() {
        0 => Issue::new(
            IssueKind::EmptySection,
            IssueSeverity::Error,
            format!("section {} has no samples", section.id),
        ),
        1 => Issue::new(
            IssueKind::SingleSampleSection,
            IssueSeverity::Error,
            format!("section {} has a single sample", section.id),
        ),
        2 => Issue::new(
            IssueKind::TwoSampleSection,
            IssueSeverity::Warning,
            format!("section {} has only two samples", section.id),
        ),
        _ => return,
    };

    let issue = match section.first_sample() {
        Some(first) => issue.with_location(first.position),
        None => issue,
    };
    issues.push(issue.with_section(section.id));
}

fn check_section_length(section: &Section, issues: &mut Vec<Issue>) {
    if section.sample_count() < 2 {
        return;
    }
    let (Some(first), Some(last)) = (section.first_sample(), section.last_sample()) else {
        return;
    };

    let length = section_length(section);
    let limit = 2.0 * (first.radius + last.radius);
    if length < limit {
        issues.push(
            Issue::new(
                IssueKind::ShortSection,
                IssueSeverity::Warning,
                format!(
                    "section {} is short: length {length:.3} < 2·(r_first + r_last) = {limit:.3}",
                    section.id
                ),
            )
            .with_location(first.position)
            .with_section(section.id),
        );
    }
}

fn check_segment_lengths(section: &Section, issues: &mut Vec<Issue>) {
    let offending: Vec<usize> = section
        .segments()
        .enumerate()
        .filter(|(_, (start, end))| segment_length(start, end) < start.radius)
        .map(|(index, _)| index)
        .collect();

    if let Some(&first_offending) = offending.first() {
        let location = section.samples[first_offending].position;
        issues.push(
            Issue::new(
                IssueKind::ShortSegment,
                IssueSeverity::Warning,
                format!(
                    "section {}: {} segment(s) shorter than their starting radius",
                    section.id,
                    offending.len()
                ),
            )
            .with_location(location)
            .with_section(section.id),
        );
    }
}

fn check_duplicate_samples(section: &Section, options: &VerifyOptions, issues: &mut Vec<Issue>) {
    let duplicates = section
        .segments()
        .filter(|(a, b)| a.distance_to(b) < options.duplicate_distance_threshold)
        .count();

    if duplicates > 0 {
        issues.push(
            Issue::new(
                IssueKind::DuplicateSamples,
                IssueSeverity::Warning,
                format!(
                    "section {}: {duplicates} consecutive sample pair(s) closer than {}",
                    section.id, options.duplicate_distance_threshold
                ),
            )
            .with_section(section.id),
        );
    }
}

fn check_children_count(section: &Section, issues: &mut Vec<Issue>) {
    let issue = match section.children.len() {
        0 | 2 => return,
        1 => Issue::new(
            IssueKind::SingleChild,
            IssueSeverity::Warning,
            format!(
                "section {} has a single child; expected a bifurcation or a terminal",
                section.id
            ),
        ),
        n => Issue::new(
            IssueKind::ExcessiveChildren,
            IssueSeverity::Warning,
            format!("section {} has {n} children", section.id),
        ),
    };
    issues.push(issue.with_section(section.id));
}

fn check_branch_radii(arbor: &Arbor, section: &Section, issues: &mut Vec<Issue>) {
    let Some(parent) = section.parent.and_then(|p| arbor.sections.get(p)) else {
        return;
    };
    let (Some(own_first), Some(parent_last)) = (section.first_sample(), parent.last_sample())
    else {
        return;
    };

    if own_first.radius > parent_last.radius {
        issues.push(
            Issue::new(
                IssueKind::RadiusInversion,
                IssueSeverity::Warning,
                format!(
                    "section {} starts thicker ({:.3}) than its parent ends ({:.3})",
                    section.id, own_first.radius, parent_last.radius
                ),
            )
            .with_location(own_first.position)
            .with_section(section.id),
        );
    }
}

fn check_arbor_intersections(morphology: &Morphology, issues: &mut Vec<Issue>) {
    let soma = &morphology.soma;

    for (index, axon) in morphology.axons.iter().enumerate() {
        if axon_intersects_dendrites(axon, &morphology.basal_dendrites, soma) {
            issues.push(Issue::new(
                IssueKind::BranchIntersection,
                IssueSeverity::Warning,
                format!("axon {index} intersects a basal dendrite near the soma"),
            ));
        }
        for apical in &morphology.apical_dendrites {
            if axon_intersects_apical_dendrite(axon, apical, soma) {
                issues.push(Issue::new(
                    IssueKind::BranchIntersection,
                    IssueSeverity::Warning,
                    format!("axon {index} intersects the apical dendrite near the soma"),
                ));
            }
        }
    }

    for (index, dendrite) in morphology.basal_dendrites.iter().enumerate() {
        for apical in &morphology.apical_dendrites {
            if dendrite_intersects_apical_dendrite(dendrite, apical, soma) {
                issues.push(Issue::new(
                    IssueKind::BranchIntersection,
                    IssueSeverity::Warning,
                    format!("basal dendrite {index} intersects the apical dendrite near the soma"),
                ));
            }
        }
        for (other_index, other) in morphology.basal_dendrites.iter().enumerate() {
            if other_index != index
                && basal_dendrite_intersects_basal_dendrite(dendrite, other, soma)
            {
                issues.push(Issue::new(
                    IssueKind::BranchIntersection,
                    IssueSeverity::Warning,
                    format!(
                        "basal dendrite {index} intersects basal dendrite {other_index} near the soma"
                    ),
                ));
            }
        }
    }
}

fn check_profile_points(morphology: &Morphology, issues: &mut Vec<Issue>) {
    for (a, b) in intersecting_profile_point_pairs(&morphology.soma) {
        issues.push(
            Issue::new(
                IssueKind::ProfilePointIntersection,
                IssueSeverity::Info,
                format!("soma profile points {a} and {b} overlap"),
            )
            .with_location(morphology.soma.profile_points[a]),
        );
    }
}
