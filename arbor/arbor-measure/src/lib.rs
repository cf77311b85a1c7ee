//! Geometric analysis kernels for morphology skeletons.
//!
//! This crate measures the trees defined by `arbor-types`:
//!
//! - **Segments**: length, frustum lateral/total surface area, volume
//! - **Sections**: summed integrals, contraction, short-section and
//!   zero-length-segment detection
//! - **Arbors**: totals and distributions, branch counts, path and
//!   Euclidean extents
//! - **Morphologies**: [`invoke_kernel`] fan-out with
//!   total/min/max/average reducers and a [`MorphologyStats`] summary
//!
//! # Failure Semantics
//!
//! Every kernel is a total function. Malformed input (a section with
//! fewer than two samples, an empty arbor) measures `0.0` or an empty
//! list and emits a `tracing` diagnostic; nothing here returns `Err` or
//! panics.
//!
//! # Example
//!
//! ```
//! use arbor_measure::{arbor_length, invoke_kernel, maximum};
//! use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
//!
//! let mut morphology = Morphology::new(Soma::new(Point3::origin(), 3.0));
//! morphology.basal_dendrites.push(Arbor::with_root(
//!     SectionKind::BasalDendrite,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
//!         Sample::from_coords(1, 12.0, 0.0, 0.0, 1.0),
//!     ],
//! ));
//!
//! let longest = invoke_kernel(&morphology, arbor_length, maximum);
//! assert!((longest.morphology_result.unwrap() - 12.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod analysis;
mod arbor;
mod section;
mod segment;
mod stats;

pub use analysis::{
    average, average_ignore_zero, concatenate, invoke_kernel, maximum, minimum,
    minimum_ignore_zero, total, AnalysisResult,
};
pub use arbor::{
    arbor_length, arbor_surface_area, arbor_volume, contraction_distribution,
    maximum_branching_order, maximum_euclidean_distance, maximum_path_distance,
    minimum_euclidean_distance, minimum_path_distance, number_of_bifurcations,
    number_of_samples, number_of_sections, number_of_short_sections,
    number_of_terminal_segments, number_of_terminal_tips, number_of_trifurcations,
    number_of_zero_length_segments, section_length_distribution,
    section_surface_area_distribution, section_volume_distribution,
};
pub use section::{
    average_sample_radius, count_zero_length_segments, is_short_section, section_contraction,
    section_euclidean_distance, section_length, section_surface_area, section_volume,
    DEFAULT_ZERO_LENGTH_TOLERANCE,
};
pub use segment::{segment_lateral_area, segment_length, segment_surface_area, segment_volume};
pub use stats::{morphology_stats, MorphologyStats};
