//! Per-section geometric kernels.
//!
//! Section-level quantities sum the per-segment formulas over consecutive
//! sample pairs. Every kernel here is a total function: a degenerate
//! section (fewer than two samples) measures `0.0` and emits a diagnostic
//! instead of failing.

use arbor_types::Section;
use tracing::error;

use crate::segment::{segment_length, segment_surface_area, segment_volume};

/// Tolerance below which a segment is considered zero-length.
pub const DEFAULT_ZERO_LENGTH_TOLERANCE: f64 = 1e-5;

/// Total length of a section.
///
/// Sums the Euclidean lengths of all consecutive sample pairs. A section
/// with fewer than two samples has length `0.0`; this is reported as a
/// non-fatal error diagnostic, never as a failure.
///
/// # Example
///
/// ```
/// use arbor_measure::section_length;
/// use arbor_types::{Sample, Section, SectionKind};
///
/// let mut section = Section::new(0, SectionKind::Axon);
/// section.samples.push(Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0));
/// section.samples.push(Sample::from_coords(1, 0.0, 0.0, 3.0, 1.0));
/// section.samples.push(Sample::from_coords(2, 0.0, 0.0, 7.0, 1.0));
///
/// assert!((section_length(&section) - 7.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn section_length(section: &Section) -> f64 {
    if section.sample_count() < 2 {
        report_degenerate(section, "length");
        return 0.0;
    }
    section.segments().map(|(a, b)| segment_length(a, b)).sum()
}

/// Total surface area of a section, summing the per-segment frustum areas.
///
/// The per-segment formula includes both end caps, so interior joint caps
/// are counted twice across a multi-segment section (each segment is a
/// free-standing frustum; see [`segment_surface_area`]).
#[must_use]
pub fn section_surface_area(section: &Section) -> f64 {
    if section.sample_count() < 2 {
        report_degenerate(section, "surface area");
        return 0.0;
    }
    section
        .segments()
        .map(|(a, b)| segment_surface_area(a, b))
        .sum()
}

/// Total volume of a section, summing the per-segment frustum volumes.
#[must_use]
pub fn section_volume(section: &Section) -> f64 {
    if section.sample_count() < 2 {
        report_degenerate(section, "volume");
        return 0.0;
    }
    section.segments().map(|(a, b)| segment_volume(a, b)).sum()
}

/// Straight-line distance between a section's first and last samples.
///
/// `0.0` for sections with fewer than two samples.
#[must_use]
pub fn section_euclidean_distance(section: &Section) -> f64 {
    match (section.first_sample(), section.last_sample()) {
        (Some(first), Some(last)) if section.sample_count() >= 2 => first.distance_to(last),
        _ => 0.0,
    }
}

/// Contraction ratio of a section: Euclidean distance over path length.
///
/// A perfectly straight section has contraction `1.0`; meandering
/// sections approach `0.0`. Defined only for sections with positive
/// length — returns `None` otherwise.
#[must_use]
pub fn section_contraction(section: &Section) -> Option<f64> {
    let length = section_length(section);
    if length > 0.0 {
        Some(section_euclidean_distance(section) / length)
    } else {
        None
    }
}

/// Whether a section is "short": its length is smaller than twice the sum
/// of its terminal radii (`length < 2·(r_first + r_last)`).
///
/// Short sections collapse to blobs when meshed and are flagged by the
/// verification engine. Sections with fewer than two samples are not
/// classified.
#[must_use]
pub fn is_short_section(section: &Section) -> bool {
    if section.sample_count() < 2 {
        return false;
    }
    let (Some(first), Some(last)) = (section.first_sample(), section.last_sample()) else {
        return false;
    };
    section_length(section) < 2.0 * (first.radius + last.radius)
}

/// Count segments shorter than `tolerance`.
///
/// Zero-length segments contribute nothing to the integrals but produce
/// degenerate geometry downstream; see
/// [`DEFAULT_ZERO_LENGTH_TOLERANCE`] for the conventional threshold.
#[must_use]
pub fn count_zero_length_segments(section: &Section, tolerance: f64) -> usize {
    section
        .segments()
        .filter(|(a, b)| segment_length(a, b) < tolerance)
        .count()
}

/// Mean sample radius of a section, `0.0` when the section is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
// Precision: sample counts are far below 2^52
pub fn average_sample_radius(section: &Section) -> f64 {
    if section.samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = section.samples.iter().map(|s| s.radius).sum();
    sum / section.samples.len() as f64
}

fn report_degenerate(section: &Section, what: &str) {
    error!(
        section_id = section.id,
        sample_count = section.sample_count(),
        "cannot compute {what} of a section with fewer than two samples"
    );
}
