//! Resampling and topological repair for morphology skeletons.
//!
//! This crate mutates arbors in place so that adjacent branches near a
//! branch point stay geometrically separated once the skeleton is given
//! thickness:
//!
//! - **Front repair** removes samples crowding a section's proximal end
//!   and inserts one corrective sample a resampling distance along the
//!   branch
//! - **Ending repair** applies the same cleanup to the distal end
//! - **Secondary repair** (present but off by default) additionally
//!   pushes near-parallel sibling branches apart
//!
//! # Failure Semantics
//!
//! Repair can genuinely fail — a section with a single sample cannot
//! survive extent removal. Failures are typed
//! ([`RepairError::UnrepairableSection`]) and scoped to one arbor: a
//! morphology-wide pass collects them per arbor instead of aborting, so
//! one malformed neurite never blocks the rest of the cell.
//!
//! # Example
//!
//! ```
//! use arbor_repair::{resample_morphology, ResampleParams};
//! use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
//!
//! let mut morphology = Morphology::new(Soma::new(Point3::origin(), 3.0));
//! let mut arbor = Arbor::with_root(
//!     SectionKind::BasalDendrite,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
//!         Sample::from_coords(1, 0.0, 0.0, 12.0, 1.0),
//!     ],
//! );
//! arbor.add_child(
//!     0,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 12.0, 1.0),
//!         Sample::from_coords(1, 0.0, 0.0, 12.5, 1.0),
//!         Sample::from_coords(2, 0.0, 0.0, 24.0, 1.0),
//!     ],
//! );
//! arbor.label_primary_children();
//! morphology.basal_dendrites.push(arbor);
//!
//! let summary = resample_morphology(&mut morphology, &ResampleParams::default());
//! assert!(summary.is_complete());
//! assert!(summary.samples_removed > 0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(clippy::all)]

mod error;
mod resample;

pub use error::{RepairError, RepairResult};
pub use resample::{
    remove_samples_within_extent, resample_arbor, resample_morphology,
    secondary_resampling_distance, ArborFailure, MorphologyResampleSummary, ResampleParams,
    ResampleSummary, AUXILIARY_SAMPLE_ID,
};
