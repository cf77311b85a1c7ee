//! Per-arbor geometric and topological kernels.
//!
//! Every kernel walks the tree through the pre-order traversal
//! combinators, so an arbor is always measured in the same reproducible
//! order. "Total" kernels sum per-section values; "distribution" kernels
//! collect one value per section.

use arbor_types::{apply_to_arbor, Arbor, SkeletonTopology};

use crate::section::{
    count_zero_length_segments, is_short_section, section_contraction, section_length,
    section_surface_area, section_volume, DEFAULT_ZERO_LENGTH_TOLERANCE,
};

/// Total length of an arbor: the sum of its section lengths.
#[must_use]
pub fn arbor_length(arbor: &Arbor) -> f64 {
    let mut total = 0.0;
    apply_to_arbor(arbor, |section| total += section_length(section));
    total
}

/// Total surface area of an arbor.
#[must_use]
pub fn arbor_surface_area(arbor: &Arbor) -> f64 {
    let mut total = 0.0;
    apply_to_arbor(arbor, |section| total += section_surface_area(section));
    total
}

/// Total volume of an arbor.
#[must_use]
pub fn arbor_volume(arbor: &Arbor) -> f64 {
    let mut total = 0.0;
    apply_to_arbor(arbor, |section| total += section_volume(section));
    total
}

/// Per-section length distribution, in traversal order.
#[must_use]
pub fn section_length_distribution(arbor: &Arbor) -> Vec<f64> {
    let mut values = Vec::with_capacity(arbor.section_count());
    apply_to_arbor(arbor, |section| values.push(section_length(section)));
    values
}

/// Per-section surface-area distribution, in traversal order.
#[must_use]
pub fn section_surface_area_distribution(arbor: &Arbor) -> Vec<f64> {
    let mut values = Vec::with_capacity(arbor.section_count());
    apply_to_arbor(arbor, |section| values.push(section_surface_area(section)));
    values
}

/// Per-section volume distribution, in traversal order.
#[must_use]
pub fn section_volume_distribution(arbor: &Arbor) -> Vec<f64> {
    let mut values = Vec::with_capacity(arbor.section_count());
    apply_to_arbor(arbor, |section| values.push(section_volume(section)));
    values
}

/// Contraction ratios of all sections with positive length, in traversal
/// order.
#[must_use]
pub fn contraction_distribution(arbor: &Arbor) -> Vec<f64> {
    let mut values = Vec::new();
    apply_to_arbor(arbor, |section| {
        if let Some(contraction) = section_contraction(section) {
            values.push(contraction);
        }
    });
    values
}

/// Number of sections in an arbor.
#[must_use]
pub fn number_of_sections(arbor: &Arbor) -> usize {
    arbor.section_count()
}

/// Number of samples in an arbor.
#[must_use]
pub fn number_of_samples(arbor: &Arbor) -> usize {
    arbor.sample_count()
}

/// Number of bifurcations (sections with exactly two children).
#[must_use]
pub fn number_of_bifurcations(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        if section.children.len() == 2 {
            count += 1;
        }
    });
    count
}

/// Number of trifurcations (sections with exactly three children).
#[must_use]
pub fn number_of_trifurcations(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        if section.children.len() == 3 {
            count += 1;
        }
    });
    count
}

/// Number of terminal tips (leaf sections).
#[must_use]
pub fn number_of_terminal_tips(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        if section.is_leaf() {
            count += 1;
        }
    });
    count
}

/// Number of terminal segments: the last segment of every leaf section
/// that actually has one.
///
/// Differs from [`number_of_terminal_tips`] only when a leaf section is
/// degenerate (fewer than two samples, hence no segments).
#[must_use]
pub fn number_of_terminal_segments(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        if section.is_leaf() && section.segment_count() > 0 {
            count += 1;
        }
    });
    count
}

/// Maximum branching order reached by any section, `0` for empty arbors.
#[must_use]
pub fn maximum_branching_order(arbor: &Arbor) -> u32 {
    let mut max = 0;
    apply_to_arbor(arbor, |section| max = max.max(section.branching_order));
    max
}

/// Number of short sections (`length < 2·(r_first + r_last)`).
#[must_use]
pub fn number_of_short_sections(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        if is_short_section(section) {
            count += 1;
        }
    });
    count
}

/// Number of zero-length segments across the arbor, using
/// [`DEFAULT_ZERO_LENGTH_TOLERANCE`].
#[must_use]
pub fn number_of_zero_length_segments(arbor: &Arbor) -> usize {
    let mut count = 0;
    apply_to_arbor(arbor, |section| {
        count += count_zero_length_segments(section, DEFAULT_ZERO_LENGTH_TOLERANCE);
    });
    count
}

/// Path distance from the arbor origin to the farthest terminal tip.
///
/// The path distance to a tip is the sum of section lengths along the
/// unique root-to-tip path. `0.0` for empty arbors.
#[must_use]
pub fn maximum_path_distance(arbor: &Arbor) -> f64 {
    tip_path_distances(arbor)
        .into_iter()
        .fold(0.0, f64::max)
}

/// Path distance from the arbor origin to the nearest terminal tip.
///
/// `0.0` for empty arbors.
#[must_use]
pub fn minimum_path_distance(arbor: &Arbor) -> f64 {
    let distances = tip_path_distances(arbor);
    if distances.is_empty() {
        return 0.0;
    }
    distances.into_iter().fold(f64::INFINITY, f64::min)
}

/// Euclidean distance from the arbor origin to the farthest terminal tip.
///
/// The origin is the root section's first sample (the point where the
/// arbor emanates from the soma). `0.0` for empty arbors.
#[must_use]
pub fn maximum_euclidean_distance(arbor: &Arbor) -> f64 {
    tip_euclidean_distances(arbor)
        .into_iter()
        .fold(0.0, f64::max)
}

/// Euclidean distance from the arbor origin to the nearest terminal tip.
///
/// `0.0` for empty arbors.
#[must_use]
pub fn minimum_euclidean_distance(arbor: &Arbor) -> f64 {
    let distances = tip_euclidean_distances(arbor);
    if distances.is_empty() {
        return 0.0;
    }
    distances.into_iter().fold(f64::INFINITY, f64::min)
}

/// Path distances from the root to every terminal tip.
fn tip_path_distances(arbor: &Arbor) -> Vec<f64> {
    fn walk(arbor: &Arbor, index: usize, base: f64, out: &mut Vec<f64>) {
        let Some(section) = arbor.sections.get(index) else {
            return;
        };
        let total = base + section_length(section);
        if section.is_leaf() {
            out.push(total);
        }
        for &child in &section.children {
            walk(arbor, child, total, out);
        }
    }

    let mut distances = Vec::new();
    if !arbor.sections.is_empty() {
        walk(arbor, 0, 0.0, &mut distances);
    }
    distances
}

/// Euclidean distances from the arbor origin to every terminal tip.
fn tip_euclidean_distances(arbor: &Arbor) -> Vec<f64> {
    let Some(origin) = arbor.root().and_then(|root| root.first_sample()) else {
        return Vec::new();
    };
    let origin = origin.position;

    let mut distances = Vec::new();
    apply_to_arbor(arbor, |section| {
        if section.is_leaf() {
            if let Some(tip) = section.last_sample() {
                distances.push((tip.position - origin).norm());
            }
        }
    });
    distances
}
